//! Data models shared between server and clients
//!
//! # Modules
//!
//! - [`ticket`] - Ticket entity, lifecycle status and priority ladder
//! - [`routing_rule`] - Routing rule entity and its structured action
//! - [`sla`] - SLA metric types and status derivation inputs
//! - [`alert`] - SLA alert entity
//! - [`user`] - User account entity

pub mod alert;
pub mod routing_rule;
pub mod sla;
pub mod ticket;
pub mod user;

pub use alert::{Alert, AlertSeverity};
pub use routing_rule::{RoutingDecision, RoutingRule, RuleAction, RuleCreate, RuleUpdate};
pub use sla::{MetricDirection, SlaMetric, SlaStatus};
pub use ticket::{Priority, Ticket, TicketStatus, UnknownVariant};
pub use user::{User, UserPublic};
