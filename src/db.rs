//!
//! # Database Setup
//!
//! Pool construction and schema bootstrap. The schema is created on startup
//! when it does not exist yet, so a fresh database needs no manual migration
//! step before the server (or the stdio tool server) can run.

use crate::error::AppError;
use sqlx::PgPool;

/// Connects to Postgres using the given connection string.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

// Statements are executed one at a time; the DO blocks swallow the
// duplicate_object error so re-running on an initialized database is a no-op.
const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL
    )",
    "DO $$ BEGIN
        CREATE TYPE todo_priority AS ENUM ('Low', 'Medium', 'High');
    EXCEPTION
        WHEN duplicate_object THEN NULL;
    END $$",
    "DO $$ BEGIN
        CREATE TYPE todo_status AS ENUM ('Incomplete', 'Complete');
    EXCEPTION
        WHEN duplicate_object THEN NULL;
    END $$",
    "CREATE TABLE IF NOT EXISTS todos (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        description TEXT,
        priority todo_priority NOT NULL DEFAULT 'Medium',
        status todo_status NOT NULL DEFAULT 'Incomplete',
        created_at TIMESTAMP NOT NULL DEFAULT (now() AT TIME ZONE 'utc')
    )",
];

/// Creates the `users` and `todos` tables plus the priority/status SQL enums
/// if they are not present already.
pub async fn init_schema(pool: &PgPool) -> Result<(), AppError> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
