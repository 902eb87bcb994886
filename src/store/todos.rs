use crate::error::AppError;
use crate::models::{NewTodo, Todo, TodoPatch, TodoStatus};
use sqlx::PgPool;

const TODO_COLUMNS: &str = "id, user_id, title, description, priority, status, created_at";

/// Creates a todo owned by `owner_id`. Priority defaults to Medium, status to
/// Incomplete, and `created_at` to the database's UTC clock.
pub async fn create(pool: &PgPool, owner_id: i32, input: NewTodo) -> Result<Todo, AppError> {
    let todo = sqlx::query_as::<_, Todo>(&format!(
        "INSERT INTO todos (user_id, title, description, priority)
         VALUES ($1, $2, $3, $4)
         RETURNING {}",
        TODO_COLUMNS
    ))
    .bind(owner_id)
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.priority.unwrap_or_default())
    .fetch_one(pool)
    .await?;

    Ok(todo)
}

/// Lists the owner's todos in insertion order.
pub async fn list(pool: &PgPool, owner_id: i32) -> Result<Vec<Todo>, AppError> {
    let todos = sqlx::query_as::<_, Todo>(&format!(
        "SELECT {} FROM todos WHERE user_id = $1 ORDER BY id",
        TODO_COLUMNS
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(todos)
}

/// Lists the owner's todos filtered to one status, in insertion order.
pub async fn list_by_status(
    pool: &PgPool,
    owner_id: i32,
    status: TodoStatus,
) -> Result<Vec<Todo>, AppError> {
    let todos = sqlx::query_as::<_, Todo>(&format!(
        "SELECT {} FROM todos WHERE user_id = $1 AND status = $2 ORDER BY id",
        TODO_COLUMNS
    ))
    .bind(owner_id)
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(todos)
}

/// Fetches one todo, scoped to the owner. A todo held by a different user is
/// indistinguishable from a missing one: both return `None`.
pub async fn find(pool: &PgPool, owner_id: i32, id: i32) -> Result<Option<Todo>, AppError> {
    let todo = sqlx::query_as::<_, Todo>(&format!(
        "SELECT {} FROM todos WHERE id = $1 AND user_id = $2",
        TODO_COLUMNS
    ))
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    Ok(todo)
}

/// Applies a partial patch: the current row is read (owner-scoped), merged
/// with the supplied fields, and written back.
pub async fn update(
    pool: &PgPool,
    owner_id: i32,
    id: i32,
    patch: &TodoPatch,
) -> Result<Todo, AppError> {
    let mut todo = find(pool, owner_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".into()))?;

    todo.apply(patch);

    let updated = sqlx::query_as::<_, Todo>(&format!(
        "UPDATE todos SET title = $1, description = $2, priority = $3, status = $4
         WHERE id = $5 AND user_id = $6
         RETURNING {}",
        TODO_COLUMNS
    ))
    .bind(&todo.title)
    .bind(&todo.description)
    .bind(todo.priority)
    .bind(todo.status)
    .bind(id)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

/// Deletes a todo, scoped to the owner. Zero affected rows means the id is
/// absent or foreign-owned; both are `NotFound`.
pub async fn delete(pool: &PgPool, owner_id: i32, id: i32) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Todo not found".into()));
    }

    Ok(())
}

/// Sets a todo's status to Complete. Idempotent: completing a completed todo
/// leaves it Complete. The flip-toggle behavior exists only in the standalone
/// CLI, which does not share this store.
pub async fn complete(pool: &PgPool, owner_id: i32, id: i32) -> Result<Todo, AppError> {
    let patch = TodoPatch {
        status: Some(TodoStatus::Complete),
        ..Default::default()
    };
    update(pool, owner_id, id, &patch).await
}
