//! SLA API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use shared::client::{AlertCreate, ThresholdUpdate};
use shared::models::{Alert, SlaMetric, SlaStatus};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::error::{AppResponse, AppResult, ok_with_message};
use crate::utils::validation::{MAX_NAME_LEN, MAX_SUBJECT_LEN, validate_required_text};

/// A metric together with its derived status
#[derive(Serialize)]
pub struct MetricView {
    #[serde(flatten)]
    pub metric: SlaMetric,
    pub status: SlaStatus,
}

/// Full SLA dashboard payload
#[derive(Serialize)]
pub struct SlaOverview {
    pub metrics: Vec<MetricView>,
    pub compliance: f64,
}

fn overview_of(state: &ServerState) -> SlaOverview {
    let metrics = state
        .sla
        .metrics()
        .into_iter()
        .map(|metric| MetricView {
            status: metric.status(),
            metric,
        })
        .collect();
    SlaOverview {
        metrics,
        compliance: state.sla.compliance_score(),
    }
}

/// GET /api/sla - metrics with statuses plus the compliance score
pub async fn overview(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<SlaOverview>> {
    Ok(Json(overview_of(&state)))
}

/// POST /api/sla/refresh - force one refresh step
pub async fn refresh(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<SlaOverview>> {
    let mut rng = StdRng::from_entropy();
    state.sla.recompute(&mut rng);
    Ok(Json(overview_of(&state)))
}

/// POST /api/sla/thresholds - partial target update
pub async fn update_thresholds(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Json(payload): Json<ThresholdUpdate>,
) -> AppResult<Json<SlaOverview>> {
    state.sla.update_thresholds(&payload.targets)?;
    Ok(Json(overview_of(&state)))
}

/// GET /api/sla/alerts - active alerts, newest first
pub async fn list_alerts(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<Vec<Alert>>> {
    Ok(Json(state.sla.alerts()))
}

/// POST /api/sla/alerts - raise a manual alert
pub async fn raise_alert(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<AlertCreate>,
) -> AppResult<Json<Alert>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&payload.description, "description", MAX_SUBJECT_LEN)?;

    let alert = state
        .sla
        .raise_alert(payload.severity, payload.title, payload.description);
    tracing::info!(alert_id = alert.id, operator = user.username, "Manual alert raised");
    Ok(Json(alert))
}

/// DELETE /api/sla/alerts/:id - dismiss one alert
pub async fn dismiss_alert(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<i64>>> {
    state.sla.dismiss_alert(id)?;
    Ok(ok_with_message(id, "Alert dismissed"))
}

/// DELETE /api/sla/alerts - clear all alerts
pub async fn clear_alerts(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<AppResponse<()>>> {
    state.sla.clear_alerts();
    Ok(ok_with_message((), "Alerts cleared"))
}
