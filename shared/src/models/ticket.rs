//! Ticket Model

use serde::{Deserialize, Serialize};

/// Ticket lifecycle status
///
/// Manual path: `New -> InProgress -> Closed`.
/// Automatic path: `New` is skipped entirely and the ticket is born
/// `ClosedAuto`. Both closed states are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    New,
    InProgress,
    Closed,
    ClosedAuto,
}

impl TicketStatus {
    /// Terminal states admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::ClosedAuto)
    }

    /// Whether a manual transition from `self` to `target` is legal
    ///
    /// `ClosedAuto` is never a legal target here: it is only reachable
    /// at ingestion time.
    pub fn can_transition_to(&self, target: TicketStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match target {
            TicketStatus::InProgress => *self == TicketStatus::New,
            TicketStatus::Closed => {
                matches!(self, TicketStatus::New | TicketStatus::InProgress)
            }
            TicketStatus::New | TicketStatus::ClosedAuto => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
            Self::ClosedAuto => "closed_auto",
        }
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "in_progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            "closed_auto" => Ok(Self::ClosedAuto),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Ticket priority - a total order used as the escalation ladder
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Raise one step along the ladder, saturating at `Critical`
    ///
    /// Escalating an already-critical item returns `Critical` unchanged.
    pub fn escalate(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Critical,
            Self::Critical => Self::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Parse error for status/priority strings coming off the wire
#[derive(Debug, thiserror::Error)]
#[error("unknown variant: {0}")]
pub struct UnknownVariant(pub String);

/// Ticket entity
///
/// Created by ingestion, mutated only through the lifecycle transition
/// operation, never deleted (closed tickets stay queryable for metrics).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub subject: String,
    pub body: String,
    /// Detected request language ("ru" | "kz")
    pub language: String,
    pub category: String,
    pub priority: Priority,
    pub department: String,
    pub status: TicketStatus,
    pub summary: String,
    /// Suggested operator reply (or the auto-resolution answer)
    pub suggested_reply: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
