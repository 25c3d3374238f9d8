//! SLA Alert Model

use serde::{Deserialize, Serialize};

use super::Priority;

/// Alert severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Critical,
    Warning,
}

impl From<Priority> for AlertSeverity {
    /// Map a ticket/incident priority onto alert severity
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Critical => Self::Critical,
            _ => Self::Warning,
        }
    }
}

/// SLA alert entry
///
/// Created by the evaluator or by manual trigger; dismissed individually
/// or in bulk; never mutated otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub severity: AlertSeverity,
    pub title: String,
    pub description: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
