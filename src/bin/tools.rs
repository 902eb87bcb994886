//! Stdio tool server binary.
//!
//! Speaks the Model Context Protocol over stdin/stdout so an external agent
//! host can manage the shared agent-owned task list. Configure it in the
//! host's server list, e.g.:
//!
//! ```json
//! { "mcpServers": { "todo": { "command": "taskpilot-tools" } } }
//! ```

use taskpilot::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv::dotenv().ok();
    // Log to stderr only; stdout carries the protocol.
    env_logger::init();

    let config = Config::from_env();
    let pool = taskpilot::db::connect(&config.database_url).await?;
    taskpilot::db::init_schema(&pool).await.map_err(|e| e.to_string())?;

    log::info!("taskpilot tool server listening on stdio");
    taskpilot::mcp::run_stdio(pool).await
}
