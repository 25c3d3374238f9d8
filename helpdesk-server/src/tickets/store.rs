use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;
use shared::client::MetricsResponse;
use shared::models::{Ticket, TicketStatus};

use crate::triage::TriageResult;
use crate::utils::error::{AppError, AppResult};

/// Owned in-memory ticket collection
///
/// Tickets live for the lifetime of the process and are never deleted;
/// the id counter only moves forward. All mutation happens under the
/// write lock so a reader always sees a consistent collection.
pub struct TicketStore {
    inner: RwLock<TicketsInner>,
}

struct TicketsInner {
    tickets: Vec<Ticket>,
    next_id: i64,
}

impl TicketStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TicketsInner {
                tickets: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Record a triaged request as a ticket
    ///
    /// Auto-resolvable requests are born `ClosedAuto` with the answer
    /// attached; they never pass through `New`.
    pub fn ingest(&self, subject: Option<String>, body: String, triage: &TriageResult) -> Ticket {
        let now = Utc::now();
        let status = if triage.answer.is_some() {
            TicketStatus::ClosedAuto
        } else {
            TicketStatus::New
        };

        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;

        let ticket = Ticket {
            id,
            subject: subject.unwrap_or_else(|| triage.summary.clone()),
            body,
            language: triage.language.clone(),
            category: triage.category.clone(),
            priority: triage.priority,
            department: triage.department.clone(),
            status,
            summary: triage.summary.clone(),
            suggested_reply: triage.suggested_reply.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.tickets.push(ticket.clone());
        ticket
    }

    pub fn get(&self, id: i64) -> AppResult<Ticket> {
        self.inner
            .read()
            .tickets
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Ticket {id} not found")))
    }

    /// Move a ticket through its lifecycle
    ///
    /// Illegal moves (out of a terminal state, into `New` or
    /// `ClosedAuto`) are rejected without touching the ticket.
    pub fn transition(&self, id: i64, target: TicketStatus) -> AppResult<Ticket> {
        let mut inner = self.inner.write();
        let ticket = inner
            .tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::not_found(format!("Ticket {id} not found")))?;

        if !ticket.status.can_transition_to(target) {
            return Err(AppError::invalid_transition(format!(
                "Cannot move ticket {id} from {} to {}",
                ticket.status.as_str(),
                target.as_str()
            )));
        }

        ticket.status = target;
        ticket.updated_at = Utc::now();
        Ok(ticket.clone())
    }

    /// List tickets newest-first, optionally filtered by status
    pub fn list(&self, status: Option<TicketStatus>) -> Vec<Ticket> {
        let inner = self.inner.read();
        let mut tickets: Vec<Ticket> = inner
            .tickets
            .iter()
            .filter(|t| status.is_none_or(|s| t.status == s))
            .cloned()
            .collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        tickets
    }

    /// Aggregate counts for the metrics endpoint
    pub fn metrics(&self) -> MetricsResponse {
        let inner = self.inner.read();
        let mut by_category: HashMap<String, usize> = HashMap::new();
        let mut by_status: HashMap<String, usize> = HashMap::new();
        let mut by_priority: HashMap<String, usize> = HashMap::new();
        let mut auto_resolved = 0usize;

        for ticket in &inner.tickets {
            *by_category.entry(ticket.category.clone()).or_default() += 1;
            *by_status.entry(ticket.status.as_str().to_string()).or_default() += 1;
            *by_priority
                .entry(ticket.priority.as_str().to_string())
                .or_default() += 1;
            if ticket.status == TicketStatus::ClosedAuto {
                auto_resolved += 1;
            }
        }

        let total = inner.tickets.len();
        MetricsResponse {
            total,
            auto_resolved,
            manual: total - auto_resolved,
            by_category,
            by_status,
            by_priority,
        }
    }
}

impl Default for TicketStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Priority, RoutingDecision, RuleAction};

    fn manual_triage() -> TriageResult {
        TriageResult {
            language: "ru".into(),
            category: "Network".into(),
            priority: Priority::Medium,
            department: "IT Infrastructure".into(),
            summary: "не работает интернет".into(),
            suggested_reply: "Мы проверим сетевое подключение.".into(),
            answer: None,
            decision: RoutingDecision::fallback(),
        }
    }

    fn auto_triage() -> TriageResult {
        TriageResult {
            answer: Some("Сбросьте пароль через портал самообслуживания.".into()),
            category: "Access".into(),
            department: "IT Support".into(),
            decision: RoutingDecision {
                rule_id: Some(2),
                rule_name: Some("Запросы на смену пароля".into()),
                action: RuleAction::AutoReply {
                    department: "IT Support".into(),
                },
            },
            ..manual_triage()
        }
    }

    #[test]
    fn manual_ticket_is_born_new() {
        let store = TicketStore::new();
        let ticket = store.ingest(None, "не работает интернет".into(), &manual_triage());
        assert_eq!(ticket.id, 1);
        assert_eq!(ticket.status, TicketStatus::New);
        assert_eq!(ticket.subject, "не работает интернет");
    }

    #[test]
    fn auto_resolved_ticket_is_born_closed_auto() {
        let store = TicketStore::new();
        let ticket = store.ingest(Some("пароль".into()), "забыл пароль".into(), &auto_triage());
        assert_eq!(ticket.status, TicketStatus::ClosedAuto);
        assert_eq!(store.metrics().auto_resolved, 1);
    }

    #[test]
    fn legal_transitions_walk_the_lifecycle() {
        let store = TicketStore::new();
        let ticket = store.ingest(None, "x".into(), &manual_triage());

        let t = store.transition(ticket.id, TicketStatus::InProgress).unwrap();
        assert_eq!(t.status, TicketStatus::InProgress);
        let t = store.transition(ticket.id, TicketStatus::Closed).unwrap();
        assert_eq!(t.status, TicketStatus::Closed);
    }

    #[test]
    fn terminal_tickets_reject_every_move() {
        let store = TicketStore::new();
        let ticket = store.ingest(None, "x".into(), &auto_triage());

        for target in [
            TicketStatus::New,
            TicketStatus::InProgress,
            TicketStatus::Closed,
            TicketStatus::ClosedAuto,
        ] {
            let err = store.transition(ticket.id, target).unwrap_err();
            assert!(matches!(err, AppError::InvalidTransition(_)));
        }
    }

    #[test]
    fn rejected_transition_leaves_ticket_untouched() {
        let store = TicketStore::new();
        let ticket = store.ingest(None, "x".into(), &manual_triage());
        let before = store.get(ticket.id).unwrap();

        assert!(store.transition(ticket.id, TicketStatus::ClosedAuto).is_err());
        let after = store.get(ticket.id).unwrap();
        assert_eq!(before.status, after.status);
        assert_eq!(before.updated_at, after.updated_at);
    }

    #[test]
    fn unknown_ticket_is_not_found() {
        let store = TicketStore::new();
        let err = store.transition(41, TicketStatus::InProgress).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.get(41).is_err());
    }

    #[test]
    fn list_is_newest_first_and_filters_by_status() {
        let store = TicketStore::new();
        let a = store.ingest(None, "a".into(), &manual_triage());
        let b = store.ingest(None, "b".into(), &manual_triage());
        let c = store.ingest(None, "c".into(), &auto_triage());

        let all = store.list(None);
        assert_eq!(all.iter().map(|t| t.id).collect::<Vec<_>>(), vec![c.id, b.id, a.id]);

        let open = store.list(Some(TicketStatus::New));
        assert_eq!(open.iter().map(|t| t.id).collect::<Vec<_>>(), vec![b.id, a.id]);
    }

    #[test]
    fn metrics_aggregate_all_dimensions() {
        let store = TicketStore::new();
        store.ingest(None, "a".into(), &manual_triage());
        store.ingest(None, "b".into(), &auto_triage());

        let m = store.metrics();
        assert_eq!(m.total, 2);
        assert_eq!(m.auto_resolved, 1);
        assert_eq!(m.manual, 1);
        assert_eq!(m.by_category.get("Network"), Some(&1));
        assert_eq!(m.by_category.get("Access"), Some(&1));
        assert_eq!(m.by_status.get("new"), Some(&1));
        assert_eq!(m.by_status.get("closed_auto"), Some(&1));
    }
}
