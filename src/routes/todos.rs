use crate::{
    auth::AuthenticatedSubject,
    error::AppError,
    models::{NewTodo, TodoPatch},
    store::{todos, users},
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;

/// Creates a new todo for the authenticated user.
///
/// ## Request Body:
/// - `title`: text (the HTTP contract does not reject an empty title).
/// - `description` (optional): text.
/// - `priority` (optional): one of `"Low"`, `"Medium"`, `"High"`; defaults to Medium.
///
/// ## Responses:
/// - `201 Created`: the new `Todo` as JSON, status `"Incomplete"`.
/// - `401 Unauthorized`: missing/invalid token, or the account is gone.
#[post("")]
pub async fn create_todo(
    pool: web::Data<PgPool>,
    subject: AuthenticatedSubject,
    body: web::Json<NewTodo>,
) -> Result<impl Responder, AppError> {
    let owner = users::resolve_subject(&pool, &subject.0).await?;
    let todo = todos::create(&pool, owner.id, body.into_inner()).await?;

    Ok(HttpResponse::Created().json(todo))
}

/// Lists the authenticated user's todos in creation order. Another user's
/// todos never appear here.
#[get("")]
pub async fn list_todos(
    pool: web::Data<PgPool>,
    subject: AuthenticatedSubject,
) -> Result<impl Responder, AppError> {
    let owner = users::resolve_subject(&pool, &subject.0).await?;
    let todos = todos::list(&pool, owner.id).await?;

    Ok(HttpResponse::Ok().json(todos))
}

/// Partially updates a todo the authenticated user owns.
///
/// Only the supplied fields change. A todo that does not exist and a todo
/// owned by someone else both answer `404 Not Found`; the two cases are
/// deliberately indistinguishable.
#[patch("/{id}")]
pub async fn update_todo(
    pool: web::Data<PgPool>,
    subject: AuthenticatedSubject,
    todo_id: web::Path<i32>,
    body: web::Json<TodoPatch>,
) -> Result<impl Responder, AppError> {
    let owner = users::resolve_subject(&pool, &subject.0).await?;
    let todo = todos::update(&pool, owner.id, todo_id.into_inner(), &body).await?;

    Ok(HttpResponse::Ok().json(todo))
}

/// Deletes a todo the authenticated user owns. Same not-found semantics as
/// update.
#[delete("/{id}")]
pub async fn delete_todo(
    pool: web::Data<PgPool>,
    subject: AuthenticatedSubject,
    todo_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let owner = users::resolve_subject(&pool, &subject.0).await?;
    todos::delete(&pool, owner.id, todo_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
