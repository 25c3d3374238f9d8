//! Default routing rules installed on first run

use shared::models::{RoutingRule, RuleAction};

/// The fixed default rule set
///
/// Installed (and persisted immediately) when no rule state exists yet:
/// critical system failures, password reset requests, and a catch-all
/// fallback at the bottom of the priority range.
pub fn default_rules() -> Vec<RoutingRule> {
    vec![
        RoutingRule {
            id: 1,
            name: "Критические системные ошибки".to_string(),
            conditions: vec![
                "ошибка".to_string(),
                "сбой".to_string(),
                "авария".to_string(),
                "критично".to_string(),
            ],
            action: RuleAction::Escalate {
                department: "L2 Support".to_string(),
            },
            priority: 10,
            active: true,
        },
        RoutingRule {
            id: 2,
            name: "Запросы на смену пароля".to_string(),
            conditions: vec![
                "пароль".to_string(),
                "забыл".to_string(),
                "сменить".to_string(),
            ],
            action: RuleAction::AutoReply {
                department: "IT Support".to_string(),
            },
            priority: 7,
            active: true,
        },
        RoutingRule {
            id: 3,
            name: "Общие вопросы".to_string(),
            // No keywords: catch-all for anything the rules above miss
            conditions: vec![],
            action: RuleAction::Route { department: None },
            priority: 1,
            active: true,
        },
    ]
}

/// First id to assign after the seed set
pub const SEED_NEXT_ID: i64 = 4;
