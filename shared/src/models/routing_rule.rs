//! Routing Rule Model

use serde::{Deserialize, Serialize};

use super::Priority;

/// Structured routing action
///
/// Replaces the free-text action strings of the legacy dashboard with an
/// executable variant. `describe()` renders the human-readable form the
/// UI shows in the rule table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleAction {
    /// Send a templated answer and close the ticket automatically,
    /// filing it under the given department for the archive record
    AutoReply { department: String },
    /// Create a ticket routed to the department with priority raised
    /// one step along the ladder
    Escalate { department: String },
    /// Create a ticket routed to the department; `None` means route by
    /// the classified category instead
    Route { department: Option<String> },
}

impl RuleAction {
    pub fn describe(&self) -> String {
        match self {
            Self::AutoReply { department } => {
                format!("Автоответ с инструкцией + направить в {department}")
            }
            Self::Escalate { department } => {
                format!("Немедленная эскалация на {department}")
            }
            Self::Route { department: Some(d) } => format!("Направить в {d}"),
            Self::Route { department: None } => "Базовый AI ответ".to_string(),
        }
    }
}

/// Routing rule entity
///
/// `id` is unique and stable once assigned; `priority` carries no
/// uniqueness constraint - ties are broken by earliest id (first
/// created wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingRule {
    pub id: i64,
    pub name: String,
    /// Condition keywords; the rule matches a message when any keyword
    /// occurs in the text (case-insensitive substring)
    pub conditions: Vec<String>,
    pub action: RuleAction,
    /// 1..=10, higher is evaluated first
    pub priority: u8,
    pub active: bool,
}

impl RoutingRule {
    /// Case-insensitive keyword containment check against a message
    ///
    /// A rule with no keywords is a catch-all and matches any text
    /// (used by the seeded low-priority fallback rule; user-created
    /// rules are validated to carry at least one keyword).
    pub fn matches(&self, text: &str) -> bool {
        let mut keywords = self
            .conditions
            .iter()
            .filter(|kw| !kw.trim().is_empty())
            .peekable();
        if keywords.peek().is_none() {
            return true;
        }
        let haystack = text.to_lowercase();
        keywords.any(|kw| haystack.contains(&kw.to_lowercase()))
    }
}

/// Create routing rule payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleCreate {
    pub name: String,
    pub conditions: Vec<String>,
    pub action: RuleAction,
    pub priority: u8,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// Update routing rule payload (partial, in-place)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<RuleAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Routing decision produced by the matcher
///
/// Pure output: carries the governing rule (if one matched) and the
/// action the lifecycle layer interprets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Id of the governing rule; `None` for the implicit fallback
    pub rule_id: Option<i64>,
    pub rule_name: Option<String>,
    pub action: RuleAction,
}

impl RoutingDecision {
    /// The implicit fallback applied when no rule matches
    pub fn fallback() -> Self {
        Self {
            rule_id: None,
            rule_name: None,
            action: RuleAction::Route { department: None },
        }
    }

    /// Whether the decision resolves the request without an operator
    pub fn is_auto_resolvable(&self) -> bool {
        matches!(self.action, RuleAction::AutoReply { .. })
    }

    /// Escalation requested by the governing rule, if any
    pub fn escalates(&self) -> bool {
        matches!(self.action, RuleAction::Escalate { .. })
    }
}
