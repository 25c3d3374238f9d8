//! Ingest API module
//!
//! Public entry points of the triage pipeline: web forms, bots and the
//! instant-help assistant all post here.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/ingest", post(handler::ingest))
        .route("/api/ai-help", post(handler::ai_help))
}
