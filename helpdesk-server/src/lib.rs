//! Helpdesk Server - support ticket triage, routing and SLA tracking
//!
//! # Architecture
//!
//! - **Routing rules** (`rules`): keyword rules that decide how an
//!   inbound request is handled, persisted in embedded redb
//! - **Triage** (`triage`): language/category/priority classification,
//!   summaries and reply templates
//! - **Tickets** (`tickets`): in-memory ticket collection with a strict
//!   lifecycle state machine
//! - **SLA** (`sla`): service-level metrics, compliance scoring and
//!   alerting, refreshed by a background task
//! - **Auth** (`auth`): JWT + Argon2 authentication
//! - **HTTP API** (`api`): RESTful interface for the dashboard
//!
//! # Module layout
//!
//! ```text
//! helpdesk-server/src/
//! ├── core/          # config, state, server, background tasks
//! ├── auth/          # JWT auth, password hashing, middleware
//! ├── rules/         # routing rule store and matcher
//! ├── triage/        # classification pipeline
//! ├── tickets/       # ticket lifecycle
//! ├── sla/           # SLA metrics and alerts
//! ├── api/           # HTTP routes and handlers
//! ├── storage.rs     # embedded database layer
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod rules;
pub mod sla;
pub mod storage;
pub mod tickets;
pub mod triage;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use storage::Storage;
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - structured events on the "security" target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Prepare the process environment: dotenv plus logging
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
