use crate::{
    agent,
    auth::AuthenticatedSubject,
    config::AgentConfig,
    error::AppError,
    store::users,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Chat with the todo agent.
///
/// Forwards the message to the language model together with the task tools,
/// bound to the authenticated user, and returns the model's final reply plus
/// a `refresh` flag telling the frontend whether the task list changed.
/// Upstream model failures surface as a fixed apologetic reply, not an error.
#[post("/chat")]
pub async fn chat(
    pool: web::Data<PgPool>,
    http: web::Data<reqwest::Client>,
    config: web::Data<AgentConfig>,
    subject: AuthenticatedSubject,
    body: web::Json<ChatRequest>,
) -> Result<impl Responder, AppError> {
    let owner = users::resolve_subject(&pool, &subject.0).await?;
    let reply = agent::run_chat(&pool, &http, &config, owner.id, &body.message).await?;

    Ok(HttpResponse::Ok().json(reply))
}
