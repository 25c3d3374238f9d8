//! Routing Rule Matcher
//!
//! Pure selection of the governing rule for an inbound message.
//! Deterministic and side-effect free so decisions can be replayed in
//! tests against a fixed rule set.

use shared::models::{RoutingDecision, RoutingRule};

/// Classify a message against a rule collection
///
/// Filters to active rules, keeps those whose keywords occur in the
/// text, and selects the one with the highest priority; ties are broken
/// by earliest id (first created wins). When nothing matches - including
/// the empty and all-inactive collections - the implicit fallback
/// decision applies.
pub fn classify(rules: &[RoutingRule], text: &str) -> RoutingDecision {
    let governing = rules
        .iter()
        .filter(|r| r.active && r.matches(text))
        .max_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                // max_by keeps the later element on Equal; invert the id
                // order so the earliest id wins ties
                .then_with(|| b.id.cmp(&a.id))
        });

    match governing {
        Some(rule) => RoutingDecision {
            rule_id: Some(rule.id),
            rule_name: Some(rule.name.clone()),
            action: rule.action.clone(),
        },
        None => RoutingDecision::fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::RuleAction;

    fn rule(id: i64, priority: u8, keywords: &[&str], active: bool) -> RoutingRule {
        RoutingRule {
            id,
            name: format!("rule-{id}"),
            conditions: keywords.iter().map(|s| s.to_string()).collect(),
            action: RuleAction::Route {
                department: Some(format!("dept-{id}")),
            },
            priority,
            active,
        }
    }

    #[test]
    fn highest_priority_wins() {
        let rules = vec![
            rule(1, 3, &["принтер"], true),
            rule(2, 9, &["принтер"], true),
        ];
        let decision = classify(&rules, "сломался принтер");
        assert_eq!(decision.rule_id, Some(2));
    }

    #[test]
    fn equal_priority_ties_break_by_earliest_id() {
        let rules = vec![
            rule(5, 7, &["доступ"], true),
            rule(2, 7, &["доступ"], true),
            rule(9, 7, &["доступ"], true),
        ];
        let decision = classify(&rules, "нужен доступ к папке");
        assert_eq!(decision.rule_id, Some(2));
    }

    #[test]
    fn inactive_rules_never_match() {
        let rules = vec![
            rule(1, 9, &["доступ"], false),
            rule(2, 3, &["доступ"], true),
        ];
        let decision = classify(&rules, "нужен доступ");
        assert_eq!(decision.rule_id, Some(2));

        // Deactivating the last matching rule shifts to the fallback
        let rules = vec![rule(1, 9, &["доступ"], false)];
        let decision = classify(&rules, "нужен доступ");
        assert_eq!(decision.rule_id, None);
    }

    #[test]
    fn empty_rule_set_resolves_to_fallback() {
        let decision = classify(&[], "что угодно");
        assert_eq!(decision.rule_id, None);
        assert_eq!(decision.action, RuleAction::Route { department: None });
    }

    #[test]
    fn classification_is_deterministic() {
        let rules = vec![
            rule(1, 10, &["ошибка"], true),
            rule(2, 7, &["пароль"], true),
            rule(3, 1, &[], true),
        ];
        let text = "у меня не работает пароль, забыл его";
        let first = classify(&rules, text);
        let second = classify(&rules, text);
        assert_eq!(first.rule_id, second.rule_id);
        assert_eq!(first.action, second.action);
    }

    #[test]
    fn password_rule_beats_catch_all() {
        let rules = vec![
            rule(1, 10, &["ошибка", "сбой", "авария"], true),
            RoutingRule {
                id: 2,
                name: "Запросы на смену пароля".into(),
                conditions: vec!["пароль".into(), "забыл".into(), "сменить".into()],
                action: RuleAction::AutoReply {
                    department: "IT Support".into(),
                },
                priority: 7,
                active: true,
            },
            rule(3, 1, &[], true),
        ];

        let decision = classify(&rules, "у меня не работает пароль, забыл его");
        assert_eq!(decision.rule_id, Some(2));
        assert!(decision.is_auto_resolvable());
    }
}
