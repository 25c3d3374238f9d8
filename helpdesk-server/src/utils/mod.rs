//! Utility module - shared helpers and types
//!
//! # Contents
//!
//! - [`AppError`] / [`AppResponse`] - error type and response envelope
//! - [`logger`] - tracing setup
//! - [`validation`] - input validation helpers

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResponse, AppResult, ok, ok_with_message};
