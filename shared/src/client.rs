//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication. The wire
//! shapes mirror what the dashboard frontend expects.

use serde::{Deserialize, Serialize};

use crate::models::{Priority, TicketStatus, UserPublic};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_user_type")]
    pub user_type: String,
}

fn default_user_type() -> String {
    "client".to_string()
}

/// Auth envelope: `{success, message, data: {access_token, user}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<TokenData>,
}

/// Token payload of a successful auth response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenData {
    pub access_token: String,
    pub token_type: String,
    pub user: UserPublic,
}

// =============================================================================
// Ingest API DTOs
// =============================================================================

/// Inbound request from web form / bot / assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    pub text: String,
    #[serde(default)]
    pub subject: Option<String>,
}

/// Ingest outcome
///
/// `status` is `closed_auto` (with `answer` set) when the request was
/// auto-resolved, `new` otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    pub status: TicketStatus,
    pub ticket_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub category: String,
    pub priority: Priority,
    pub department: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_reply: Option<String>,
    pub language: String,
}

/// Instant-help request (no ticket created)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiHelpResponse {
    pub solution: String,
    pub category: String,
    pub priority: Priority,
    pub language: String,
}

// =============================================================================
// Ticket API DTOs
// =============================================================================

/// Status transition request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: TicketStatus,
}

/// Aggregated helpdesk metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub total: usize,
    pub auto_resolved: usize,
    pub manual: usize,
    pub by_category: std::collections::HashMap<String, usize>,
    pub by_status: std::collections::HashMap<String, usize>,
    pub by_priority: std::collections::HashMap<String, usize>,
}

// =============================================================================
// SLA API DTOs
// =============================================================================

/// Partial threshold update: metric name -> new target
///
/// Unknown metric names are ignored by contract (the map is a partial
/// update, not a strict one).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdUpdate {
    pub targets: std::collections::HashMap<String, f64>,
}

/// Manual alert trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertCreate {
    pub severity: crate::models::AlertSeverity,
    pub title: String,
    pub description: String,
}
