//! User Model

use super::recipe::RecipeSummary;
use serde::{Deserialize, Serialize};

/// User entity (users table)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Media-relative path of the avatar image
    pub avatar: Option<String>,
    pub created_at: i64,
}

/// Registration payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserCreate {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Response to a successful registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreated {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for UserCreated {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Public user profile as seen by the requester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRead {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Whether the requester follows this user (false for anonymous)
    pub is_subscribed: bool,
    /// Absolute avatar URL
    pub avatar: Option<String>,
}

/// Profile plus a bounded preview of the author's recipes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorCard {
    #[serde(flatten)]
    pub user: UserRead,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: i64,
}

/// Password change payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetPassword {
    pub current_password: String,
    pub new_password: String,
}

/// Token login payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub auth_token: String,
}

/// Avatar upload payload (data URL)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarUpload {
    pub avatar: Option<String>,
}

/// Avatar response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarResponse {
    pub avatar: Option<String>,
}
