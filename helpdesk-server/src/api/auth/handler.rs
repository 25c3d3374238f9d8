//! Auth API handlers

use axum::{Json, extract::State};
use chrono::Utc;
use shared::client::{AuthResponse, LoginRequest, RegisterRequest, TokenData};
use shared::models::{User, UserPublic};

use crate::auth::{hash_password, verify_password};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::error::{AppError, AppResult};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, validate_email, validate_password, validate_required_text,
};

/// POST /api/auth/register - create an account and log in
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    validate_required_text(&payload.username, "username", MAX_NAME_LEN)?;
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    if payload.user_type != "client" && payload.user_type != "company" {
        return Err(AppError::validation(format!(
            "Unknown user type: {}",
            payload.user_type
        )));
    }

    if state.storage.find_user_by_username(&payload.username)?.is_some() {
        return Err(AppError::conflict(format!(
            "Username '{}' is already taken",
            payload.username
        )));
    }
    if state.storage.find_user_by_email(&payload.email)?.is_some() {
        return Err(AppError::conflict(format!(
            "Email '{}' is already registered",
            payload.email
        )));
    }

    let hash_pass = hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let user = User {
        id: state.storage.next_user_id()?,
        username: payload.username,
        email: payload.email.to_lowercase(),
        hash_pass,
        company_name: payload.company_name,
        contact_person: payload.contact_person,
        phone: payload.phone,
        user_type: payload.user_type,
        is_admin: false,
        is_active: true,
        created_at: Utc::now(),
    };
    state.storage.insert_user(&user)?;

    security_log!("INFO", "user_registered", user_id = user.id, username = user.username.clone());

    let token = state
        .jwt_service()
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    Ok(Json(AuthResponse {
        success: true,
        message: "Registration successful".to_string(),
        data: Some(TokenData {
            access_token: token,
            token_type: "bearer".to_string(),
            user: UserPublic::from(&user),
        }),
    }))
}

/// POST /api/auth/login - verify credentials and issue a token
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = state
        .storage
        .find_user_by_email(&payload.email)?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&payload.password, &user.hash_pass) {
        security_log!("WARN", "login_failed", email = payload.email.clone());
        return Err(AppError::invalid_credentials());
    }

    if !user.is_active {
        return Err(AppError::forbidden("Account is deactivated"));
    }

    let token = state
        .jwt_service()
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    security_log!("INFO", "login_succeeded", user_id = user.id, username = user.username.clone());

    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful".to_string(),
        data: Some(TokenData {
            access_token: token,
            token_type: "bearer".to_string(),
            user: UserPublic::from(&user),
        }),
    }))
}
