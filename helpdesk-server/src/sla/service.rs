use chrono::Utc;
use parking_lot::RwLock;
use rand::Rng;
use shared::models::{Alert, AlertSeverity, MetricDirection, SlaMetric, SlaStatus};

use crate::utils::error::{AppError, AppResult};

/// Per-metric perturbation magnitude for the periodic refresh
fn jitter_magnitude(name: &str) -> f64 {
    match name {
        "firstResponse" => 1.0,
        "resolution" => 0.25,
        "escalation" => 1.5,
        "satisfaction" => 0.1,
        _ => 0.5,
    }
}

fn default_metrics() -> Vec<SlaMetric> {
    vec![
        SlaMetric {
            name: "firstResponse".into(),
            value: 12.3,
            target: 30.0,
            unit: "сек".into(),
            direction: MetricDirection::LowerIsBetter,
        },
        SlaMetric {
            name: "resolution".into(),
            value: 2.8,
            target: 4.0,
            unit: "ч".into(),
            direction: MetricDirection::LowerIsBetter,
        },
        SlaMetric {
            name: "escalation".into(),
            value: 18.5,
            target: 24.0,
            unit: "ч".into(),
            direction: MetricDirection::LowerIsBetter,
        },
        SlaMetric {
            name: "satisfaction".into(),
            value: 4.2,
            target: 4.5,
            unit: "★".into(),
            direction: MetricDirection::HigherIsBetter,
        },
    ]
}

/// SLA compliance evaluator
///
/// Tracks the four service-level metrics, refreshes them with a bounded
/// random walk, and raises an alert whenever a metric crosses into the
/// warning or critical band. Interior mutability so one instance can be
/// shared across handlers and the background refresh task.
pub struct SlaService {
    inner: RwLock<SlaInner>,
}

struct SlaInner {
    metrics: Vec<SlaMetric>,
    /// Status each metric had after the last refresh, by index
    last_status: Vec<SlaStatus>,
    alerts: Vec<Alert>,
    next_alert_id: i64,
}

impl SlaService {
    pub fn new() -> Self {
        let metrics = default_metrics();
        let last_status = metrics.iter().map(SlaMetric::status).collect();
        Self {
            inner: RwLock::new(SlaInner {
                metrics,
                last_status,
                alerts: Vec::new(),
                next_alert_id: 1,
            }),
        }
    }

    pub fn metrics(&self) -> Vec<SlaMetric> {
        self.inner.read().metrics.clone()
    }

    /// Mean per-metric compliance, always within [0, 100]
    pub fn compliance_score(&self) -> f64 {
        let inner = self.inner.read();
        if inner.metrics.is_empty() {
            return 100.0;
        }
        let sum: f64 = inner.metrics.iter().map(SlaMetric::compliance).sum();
        sum / inner.metrics.len() as f64
    }

    /// Apply one refresh step to every metric
    ///
    /// Each value drifts by a bounded random delta, floored at zero.
    /// A metric that moves into a worse-than-good band raises an alert;
    /// staying inside a band does not re-alert.
    pub fn recompute<R: Rng>(&self, rng: &mut R) {
        let mut inner = self.inner.write();
        let SlaInner {
            metrics,
            last_status,
            ..
        } = &mut *inner;
        let mut crossings = Vec::new();

        for (metric, before) in metrics.iter_mut().zip(last_status.iter_mut()) {
            let magnitude = jitter_magnitude(&metric.name);
            let delta = rng.gen_range(-magnitude..=magnitude);
            metric.value = (metric.value + delta).max(0.0);

            let after = metric.status();
            if after != *before {
                match after {
                    SlaStatus::Critical => crossings.push((
                        AlertSeverity::Critical,
                        format!("SLA: {} в критической зоне", metric.name),
                        format!(
                            "Показатель {} = {:.1} {} при цели {:.1} {}",
                            metric.name, metric.value, metric.unit, metric.target, metric.unit
                        ),
                    )),
                    SlaStatus::Warning => crossings.push((
                        AlertSeverity::Warning,
                        format!("SLA: {} приближается к пределу", metric.name),
                        format!(
                            "Показатель {} = {:.1} {} при цели {:.1} {}",
                            metric.name, metric.value, metric.unit, metric.target, metric.unit
                        ),
                    )),
                    SlaStatus::Excellent | SlaStatus::Good => {}
                }
                *before = after;
            }
        }

        for (severity, title, description) in crossings {
            push_alert(&mut inner, severity, title, description);
        }
    }

    /// Partial threshold update; unknown metric names are ignored
    pub fn update_thresholds(
        &self,
        targets: &std::collections::HashMap<String, f64>,
    ) -> AppResult<Vec<SlaMetric>> {
        for (name, target) in targets {
            if !target.is_finite() || *target <= 0.0 {
                return Err(AppError::validation(format!(
                    "Target for '{name}' must be a positive number"
                )));
            }
        }

        let mut inner = self.inner.write();
        for metric in &mut inner.metrics {
            if let Some(target) = targets.get(&metric.name) {
                metric.target = *target;
            }
        }
        Ok(inner.metrics.clone())
    }

    pub fn alerts(&self) -> Vec<Alert> {
        let mut alerts = self.inner.read().alerts.clone();
        alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        alerts
    }

    pub fn raise_alert(
        &self,
        severity: AlertSeverity,
        title: String,
        description: String,
    ) -> Alert {
        let mut inner = self.inner.write();
        push_alert(&mut inner, severity, title, description)
    }

    pub fn dismiss_alert(&self, id: i64) -> AppResult<()> {
        let mut inner = self.inner.write();
        let before = inner.alerts.len();
        inner.alerts.retain(|a| a.id != id);
        if inner.alerts.len() == before {
            return Err(AppError::not_found(format!("Alert {id} not found")));
        }
        Ok(())
    }

    pub fn clear_alerts(&self) {
        self.inner.write().alerts.clear();
    }
}

fn push_alert(
    inner: &mut SlaInner,
    severity: AlertSeverity,
    title: String,
    description: String,
) -> Alert {
    let alert = Alert {
        id: inner.next_alert_id,
        severity,
        title,
        description,
        created_at: Utc::now(),
    };
    inner.next_alert_id += 1;
    inner.alerts.push(alert.clone());
    alert
}

impl Default for SlaService {
    fn default() -> Self {
        Self::new()
    }
}
