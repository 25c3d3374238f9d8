//! Ingest API handlers

use axum::{Json, extract::State};
use shared::client::{AiHelpResponse, IngestRequest, IngestResponse};
use shared::models::{AlertSeverity, Priority};

use crate::core::ServerState;
use crate::triage;
use crate::utils::error::AppResult;
use crate::utils::validation::{
    MAX_BODY_LEN, MAX_SUBJECT_LEN, validate_optional_text, validate_required_text,
};

/// POST /api/ingest - run the triage pipeline and record a ticket
///
/// Auto-resolvable requests come back `closed_auto` with the answer;
/// everything else lands as a `new` ticket carrying a summary and a
/// suggested reply for the operator.
pub async fn ingest(
    State(state): State<ServerState>,
    Json(payload): Json<IngestRequest>,
) -> AppResult<Json<IngestResponse>> {
    validate_required_text(&payload.text, "text", MAX_BODY_LEN)?;
    validate_optional_text(payload.subject.as_deref(), "subject", MAX_SUBJECT_LEN)?;

    let decision = state.rules.classify(&payload.text);
    tracing::info!(
        rule = ?decision.rule_name,
        "Routing decision for inbound request"
    );

    let triaged = triage::triage(&payload.text, decision);
    let escalated = triaged.decision.escalates();
    let ticket = state.tickets.ingest(payload.subject, payload.text, &triaged);

    // a rule-driven escalation that lands on critical is worth an alert
    if escalated && ticket.priority == Priority::Critical {
        state.sla.raise_alert(
            AlertSeverity::from(ticket.priority),
            format!("Эскалация обращения #{}", ticket.id),
            format!(
                "Обращение передано в {} с приоритетом {}",
                ticket.department,
                ticket.priority.as_str()
            ),
        );
    }

    Ok(Json(IngestResponse {
        status: ticket.status,
        ticket_id: ticket.id,
        answer: triaged.answer,
        category: ticket.category,
        priority: ticket.priority,
        department: ticket.department,
        summary: ticket.summary,
        suggested_reply: Some(ticket.suggested_reply),
        language: ticket.language,
    }))
}

/// POST /api/ai-help - instant answer without creating a ticket
pub async fn ai_help(
    State(state): State<ServerState>,
    Json(payload): Json<IngestRequest>,
) -> AppResult<Json<AiHelpResponse>> {
    validate_required_text(&payload.text, "text", MAX_BODY_LEN)?;

    let decision = state.rules.classify(&payload.text);
    let triaged = triage::triage(&payload.text, decision);

    let solution = triaged
        .answer
        .unwrap_or_else(|| triaged.suggested_reply.clone());

    Ok(Json(AiHelpResponse {
        solution,
        category: triaged.category,
        priority: triaged.priority,
        language: triaged.language,
    }))
}
