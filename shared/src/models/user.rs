//! User Account Model

use serde::{Deserialize, Serialize};

/// User account
///
/// `user_type` distinguishes end clients from company operators, as in
/// the registration form. The argon2 hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub hash_pass: String,
    pub company_name: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    /// "client" | "company"
    pub user_type: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// User view returned by the auth endpoints (no credential material)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub company_name: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub user_type: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&User> for UserPublic {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
            company_name: u.company_name.clone(),
            contact_person: u.contact_person.clone(),
            phone: u.phone.clone(),
            user_type: u.user_type.clone(),
            is_admin: u.is_admin,
            is_active: u.is_active,
            created_at: u.created_at,
        }
    }
}
