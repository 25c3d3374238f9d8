//! Authentication module
//!
//! JWT auth, password hashing and middleware:
//! - [`JwtService`] - token generation and validation
//! - [`CurrentUser`] - current user context
//! - [`require_auth`] - authentication middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
pub use password::{hash_password, verify_password};
