//! Stdio tool server: exposes the task tools over the Model Context Protocol
//! so external agent hosts can drive the same store as the HTTP API.
//!
//! Every session operates as one lazily provisioned synthetic user
//! ([`crate::store::users::AGENT_EMAIL`]); there is no per-caller isolation,
//! and two hosts racing on the same task id can interleave read-modify-write
//! updates. That is an accepted limitation of the single-tenant adapter.

use crate::agent::tools::{self, ToolCommand};
use crate::error::AppError;
use crate::store::users;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_handler, tool_router,
    transport::io::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

const INSTRUCTIONS: &str = "Todo task server. Tools: add_task, list_tasks, complete_task, \
delete_task, update_task. All tools operate on one shared agent-owned task list.";

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddTaskParams {
    /// The title of the task
    pub title: String,
    /// Optional longer description
    pub description: Option<String>,
    /// One of "Low", "Medium", "High"; defaults to Medium
    pub priority: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListTasksParams {
    /// Filter: "all" (default), "pending" or "completed"
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TaskIdParams {
    /// The ID of the task
    pub task_id: i32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateTaskParams {
    /// The ID of the task to update
    pub task_id: i32,
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New priority: "Low", "Medium" or "High"
    pub priority: Option<String>,
    /// New status: "Incomplete" or "Complete"
    pub status: Option<String>,
}

/// The todo MCP server. Holds the shared connection pool; each tool call
/// resolves the synthetic user and runs one unit of work against the store.
#[derive(Clone)]
pub struct TodoToolServer {
    pool: PgPool,
    tool_router: ToolRouter<Self>,
}

fn internal(e: AppError) -> McpError {
    McpError::internal_error(e.to_string(), None)
}

#[tool_router]
impl TodoToolServer {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            tool_router: Self::tool_router(),
        }
    }

    /// Validates the raw arguments through the shared command parser (the
    /// enum checks live there) and runs the command as the synthetic user.
    /// A missing task id yields a textual reply, not a protocol error.
    async fn dispatch(
        &self,
        name: &str,
        args: serde_json::Value,
    ) -> Result<CallToolResult, McpError> {
        let command = ToolCommand::parse(name, &args)
            .map_err(|msg| McpError::invalid_params(msg, None))?;
        let agent_user = users::find_or_create_agent(&self.pool)
            .await
            .map_err(internal)?;
        let outcome = tools::execute(&self.pool, agent_user.id, command)
            .await
            .map_err(internal)?;
        Ok(CallToolResult::success(vec![Content::text(outcome.reply)]))
    }

    #[tool(description = "Create a new task")]
    async fn add_task(
        &self,
        Parameters(params): Parameters<AddTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(
            "add_task",
            json!({
                "title": params.title,
                "description": params.description,
                "priority": params.priority,
            }),
        )
        .await
    }

    #[tool(description = "List todos for the agent user")]
    async fn list_tasks(
        &self,
        Parameters(params): Parameters<ListTasksParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch("list_tasks", json!({ "status": params.status }))
            .await
    }

    #[tool(description = "Mark a task as complete")]
    async fn complete_task(
        &self,
        Parameters(params): Parameters<TaskIdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch("complete_task", json!({ "task_id": params.task_id }))
            .await
    }

    #[tool(description = "Delete a task")]
    async fn delete_task(
        &self,
        Parameters(params): Parameters<TaskIdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch("delete_task", json!({ "task_id": params.task_id }))
            .await
    }

    #[tool(description = "Update title, description, priority or status of a task")]
    async fn update_task(
        &self,
        Parameters(params): Parameters<UpdateTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(
            "update_task",
            json!({
                "task_id": params.task_id,
                "title": params.title,
                "description": params.description,
                "priority": params.priority,
                "status": params.status,
            }),
        )
        .await
    }
}

#[tool_handler]
impl ServerHandler for TodoToolServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.protocol_version = ProtocolVersion::V_2024_11_05;
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info = Implementation::from_build_env();
        info.instructions = Some(INSTRUCTIONS.to_string());
        info
    }
}

/// Runs the tool server over stdio until the host disconnects.
pub async fn run_stdio(pool: PgPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let server = TodoToolServer::new(pool);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
