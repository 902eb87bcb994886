use crate::auth::password::UNUSABLE_PASSWORD_HASH;
use crate::error::AppError;
use crate::models::User;
use sqlx::PgPool;

/// Email of the synthetic identity the stdio tool server operates as. Every
/// external agent session shares this one task list.
pub const AGENT_EMAIL: &str = "agent@todo.ai";

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Inserts a new account. Callers check for an existing email first; a race
/// on the unique index still surfaces as `Conflict` through the
/// `From<sqlx::Error>` mapping.
pub async fn create(pool: &PgPool, email: &str, password_hash: &str) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2)
         RETURNING id, email, password_hash",
    )
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Resolves a verified token subject to its account. A subject whose account
/// no longer exists is unauthorized, not an internal error.
pub async fn resolve_subject(pool: &PgPool, email: &str) -> Result<User, AppError> {
    find_by_email(pool, email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".into()))
}

/// Resolves the synthetic agent user, creating it on first use. The stored
/// hash is a non-bcrypt sentinel, so the account can never log in over HTTP.
pub async fn find_or_create_agent(pool: &PgPool) -> Result<User, AppError> {
    if let Some(user) = find_by_email(pool, AGENT_EMAIL).await? {
        return Ok(user);
    }
    create(pool, AGENT_EMAIL, UNUSABLE_PASSWORD_HASH).await
}
