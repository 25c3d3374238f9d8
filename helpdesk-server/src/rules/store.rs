//! Routing rule store
//!
//! Owns the ordered rule collection and its monotonic id counter.
//! Every mutation persists the full collection and counter in a single
//! storage transaction while the write lock is held, so readers never
//! observe a partially persisted state.

use parking_lot::RwLock;

use shared::models::{RoutingDecision, RoutingRule, RuleCreate, RuleUpdate};

use crate::rules::{matcher, seed};
use crate::storage::Storage;
use crate::utils::{AppError, AppResult};
use crate::utils::validation::{self, MAX_NAME_LEN};

struct RulesInner {
    rules: Vec<RoutingRule>,
    next_id: i64,
}

/// Exclusive owner of the routing rule collection
pub struct RuleStore {
    storage: Storage,
    inner: RwLock<RulesInner>,
}

impl RuleStore {
    /// Restore persisted rules, or install and persist the default set
    pub fn load_or_seed(storage: Storage) -> AppResult<Self> {
        let (rules, next_id) = match storage.load_rule_state()? {
            Some(state) => {
                tracing::info!(count = state.0.len(), "Loaded routing rules");
                state
            }
            None => {
                let rules = seed::default_rules();
                storage.save_rule_state(&rules, seed::SEED_NEXT_ID)?;
                tracing::info!(count = rules.len(), "Seeded default routing rules");
                (rules, seed::SEED_NEXT_ID)
            }
        };

        Ok(Self {
            storage,
            inner: RwLock::new(RulesInner { rules, next_id }),
        })
    }

    /// Snapshot of the current collection (insertion order)
    pub fn list(&self) -> Vec<RoutingRule> {
        self.inner.read().rules.clone()
    }

    /// Classify a message against the current rule set
    pub fn classify(&self, text: &str) -> RoutingDecision {
        matcher::classify(&self.inner.read().rules, text)
    }

    /// Create a rule, assigning the next unused id
    pub fn create(&self, payload: RuleCreate) -> AppResult<RoutingRule> {
        validation::validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
        if payload.conditions.iter().all(|kw| kw.trim().is_empty()) {
            return Err(AppError::validation("conditions must not be empty"));
        }
        validate_priority(payload.priority)?;

        let mut inner = self.inner.write();
        let rule = RoutingRule {
            id: inner.next_id,
            name: payload.name,
            conditions: payload.conditions,
            action: payload.action,
            priority: payload.priority,
            active: payload.active,
        };
        inner.next_id += 1;
        inner.rules.push(rule.clone());
        self.persist(&inner)?;

        Ok(rule)
    }

    /// Overwrite the given fields in place, preserving the id
    pub fn update(&self, id: i64, payload: RuleUpdate) -> AppResult<RoutingRule> {
        if let Some(name) = &payload.name {
            validation::validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(conditions) = &payload.conditions
            && conditions.iter().all(|kw| kw.trim().is_empty())
        {
            return Err(AppError::validation("conditions must not be empty"));
        }
        if let Some(priority) = payload.priority {
            validate_priority(priority)?;
        }

        let mut inner = self.inner.write();
        let rule = inner
            .rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::not_found(format!("Rule {id} not found")))?;

        if let Some(name) = payload.name {
            rule.name = name;
        }
        if let Some(conditions) = payload.conditions {
            rule.conditions = conditions;
        }
        if let Some(action) = payload.action {
            rule.action = action;
        }
        if let Some(priority) = payload.priority {
            rule.priority = priority;
        }
        if let Some(active) = payload.active {
            rule.active = active;
        }

        let updated = rule.clone();
        self.persist(&inner)?;
        Ok(updated)
    }

    /// Remove a rule
    ///
    /// The freed id is never reused; the counter only moves forward.
    pub fn delete(&self, id: i64) -> AppResult<()> {
        let mut inner = self.inner.write();
        let pos = inner
            .rules
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| AppError::not_found(format!("Rule {id} not found")))?;
        inner.rules.remove(pos);
        self.persist(&inner)?;

        tracing::info!(rule_id = id, "Routing rule deleted");
        Ok(())
    }

    /// Flip the active flag
    pub fn toggle_active(&self, id: i64) -> AppResult<RoutingRule> {
        let mut inner = self.inner.write();
        let rule = inner
            .rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::not_found(format!("Rule {id} not found")))?;
        rule.active = !rule.active;

        let updated = rule.clone();
        self.persist(&inner)?;
        Ok(updated)
    }

    fn persist(&self, inner: &RulesInner) -> AppResult<()> {
        self.storage.save_rule_state(&inner.rules, inner.next_id)?;
        Ok(())
    }
}

fn validate_priority(priority: u8) -> AppResult<()> {
    if !(1..=10).contains(&priority) {
        return Err(AppError::validation(format!(
            "priority must be within 1..=10, got {priority}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::RuleAction;

    fn store() -> RuleStore {
        RuleStore::load_or_seed(Storage::open_in_memory().unwrap()).unwrap()
    }

    fn payload(name: &str, priority: u8) -> RuleCreate {
        RuleCreate {
            name: name.into(),
            conditions: vec!["vpn".into()],
            action: RuleAction::Route {
                department: Some("IT Infrastructure".into()),
            },
            priority,
            active: true,
        }
    }

    #[test]
    fn seeds_default_rules_on_first_run() {
        let s = store();
        let rules = s.list();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].priority, 10);
        assert_eq!(rules.last().unwrap().priority, 1);
    }

    #[test]
    fn create_assigns_monotonic_ids() {
        let s = store();
        let a = s.create(payload("a", 5)).unwrap();
        let b = s.create(payload("b", 5)).unwrap();
        assert_eq!(a.id, 4);
        assert_eq!(b.id, 5);
    }

    #[test]
    fn create_rejects_bad_fields() {
        let s = store();
        assert!(s.create(payload("", 5)).is_err());
        assert!(s.create(payload("ok", 0)).is_err());
        assert!(s.create(payload("ok", 11)).is_err());

        let mut empty_conditions = payload("ok", 5);
        empty_conditions.conditions = vec![];
        assert!(s.create(empty_conditions).is_err());
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let s = store();
        let a = s.create(payload("a", 5)).unwrap();
        s.delete(a.id).unwrap();
        let b = s.create(payload("b", 5)).unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn update_unknown_rule_is_not_found() {
        let s = store();
        let err = s
            .update(
                999,
                RuleUpdate {
                    name: None,
                    conditions: None,
                    action: None,
                    priority: None,
                    active: Some(false),
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn toggle_changes_classification() {
        let s = store();
        // Password text governed by the seeded auto-reply rule
        let decision = s.classify("забыл пароль");
        assert_eq!(decision.rule_id, Some(2));

        s.toggle_active(2).unwrap();
        let decision = s.classify("забыл пароль");
        // Next governing rule is the catch-all
        assert_eq!(decision.rule_id, Some(3));
    }

    #[test]
    fn state_survives_reopen() {
        let storage = Storage::open_in_memory().unwrap();
        {
            let s = RuleStore::load_or_seed(storage.clone()).unwrap();
            s.create(payload("vpn issues", 6)).unwrap();
        }
        let s = RuleStore::load_or_seed(storage).unwrap();
        assert_eq!(s.list().len(), 4);
        assert_eq!(s.create(payload("next", 2)).unwrap().id, 5);
    }
}
