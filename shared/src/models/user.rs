//! User & Session Models

use serde::{Deserialize, Serialize};

/// User role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum UserRole {
    Admin,
    Member,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Member => "MEMBER",
        }
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    /// Unique login name
    pub name: String,
    pub email: Option<String>,
    /// argon2 PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    /// Residential house number
    pub rh_no: Option<String>,
    pub created_at: i64,
}

/// Public user info (without password)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub rh_no: Option<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            rh_no: user.rh_no.clone(),
        }
    }
}

/// Create user payload (password already hashed)
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
    pub rh_no: Option<String>,
}

/// Stored session (only the token hash is persisted)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Session {
    pub token_hash: String,
    pub user_id: i64,
    pub expires_at: i64,
    pub created_at: i64,
}

/// Member signup request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub password: String,
    pub email: Option<String>,
    pub rh_no: Option<String>,
}

/// Member signin request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigninRequest {
    pub name: String,
    pub password: String,
}

/// Admin signin request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSigninRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: i64,
    pub user: UserInfo,
}
