use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A registered account as stored in the `users` table.
///
/// The password hash never leaves the server; `User` is not serialized in any
/// response body.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
}

/// Payload for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Form payload for `POST /auth/token`. The field is named `username` to keep
/// the OAuth2 password-flow shape, but it carries the account email.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Response body for both auth endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
