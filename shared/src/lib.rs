//! Shared types for the OneWindow helpdesk
//!
//! Common types used by the server and its clients: the ticket and
//! routing-rule data model, SLA metric types, and request/response DTOs.

pub mod client;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Model re-exports (for convenient access)
pub use models::{
    Alert, AlertSeverity, MetricDirection, Priority, RoutingDecision, RoutingRule, RuleAction,
    SlaMetric, SlaStatus, Ticket, TicketStatus, User, UserPublic,
};
