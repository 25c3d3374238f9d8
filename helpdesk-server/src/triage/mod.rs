//! Triage pipeline
//!
//! Turns inbound request text plus a routing decision into everything a
//! ticket needs: language, category, priority (with rule-driven
//! escalation applied), department, summary, suggested reply, and the
//! auto-resolution answer when the governing rule allows it.

pub mod classify;
pub mod reply;

use shared::models::{Priority, RoutingDecision, RuleAction};

/// Result of triaging one inbound request
#[derive(Debug, Clone)]
pub struct TriageResult {
    pub language: String,
    pub category: String,
    pub priority: Priority,
    pub department: String,
    pub summary: String,
    pub suggested_reply: String,
    /// Set when the request is auto-resolvable; becomes the closing
    /// answer of a `closed_auto` ticket
    pub answer: Option<String>,
    pub decision: RoutingDecision,
}

/// Run the full triage pipeline over a request text
///
/// Pure function of the text and the routing decision; the decision is
/// produced separately by the rule engine so both stay replayable.
pub fn triage(text: &str, decision: RoutingDecision) -> TriageResult {
    let language = classify::detect_language(text).to_string();
    let category = classify::classify_category(text).to_string();
    let mut priority = classify::classify_priority(text);

    let mut answer = None;
    let department = match &decision.action {
        RuleAction::AutoReply { department } => {
            answer = Some(reply::auto_answer(&category).to_string());
            department.clone()
        }
        RuleAction::Escalate { department } => {
            priority = priority.escalate();
            department.clone()
        }
        RuleAction::Route { department: Some(d) } => d.clone(),
        RuleAction::Route { department: None } => classify::department_for(&category).to_string(),
    };

    let summary = reply::summarize(text);
    let suggested_reply = answer
        .clone()
        .unwrap_or_else(|| reply::suggested_reply(&category).to_string());

    TriageResult {
        language,
        category,
        priority,
        department,
        summary,
        suggested_reply,
        answer,
        decision,
    }
}
