use dotenv::dotenv;
use serde_json::json;
use sqlx::PgPool;
use taskpilot::agent::tools::{self, ToolCommand};
use taskpilot::store::{todos, users};

async fn setup_pool() -> PgPool {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    taskpilot::db::init_schema(&pool)
        .await
        .expect("Failed to initialize schema");
    pool
}

async fn cleanup_user(pool: &PgPool, email: &str) {
    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await;
}

async fn run(
    pool: &PgPool,
    owner_id: i32,
    name: &str,
    args: serde_json::Value,
) -> tools::ToolOutcome {
    let command = ToolCommand::parse(name, &args).expect("tool arguments should parse");
    tools::execute(pool, owner_id, command)
        .await
        .expect("tool execution should not error")
}

// Walks the whole palette against the store and checks that every write
// reports `mutated` (the chat endpoint ORs these into its `refresh` flag)
// while reads and not-found replies do not.
#[actix_rt::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn test_tool_execution_replies_and_mutation_flags() {
    let pool = setup_pool().await;
    let email = "tool_exec@example.com";
    cleanup_user(&pool, email).await;
    let owner = users::create(&pool, email, "irrelevant-hash")
        .await
        .expect("Failed to create test user");

    // Add mutates and echoes the new task
    let added = run(
        &pool,
        owner.id,
        "add_task",
        json!({ "title": "Water the plants", "priority": "High" }),
    )
    .await;
    assert!(added.mutated);
    assert!(added.reply.contains("'Water the plants'"));
    assert!(added.reply.contains("has been added successfully."));

    let task_id = todos::list(&pool, owner.id).await.unwrap()[0].id;

    // List is read-only
    let listed = run(&pool, owner.id, "list_tasks", json!({})).await;
    assert!(!listed.mutated);
    assert!(listed.reply.contains("Water the plants"));

    // Complete mutates; a missing id answers with text and no mutation
    let completed = run(&pool, owner.id, "complete_task", json!({ "task_id": task_id })).await;
    assert!(completed.mutated);
    assert_eq!(
        completed.reply,
        "Task 'Water the plants' marked as complete."
    );

    let missing_id = task_id + 9999;
    let missed = run(&pool, owner.id, "complete_task", json!({ "task_id": missing_id })).await;
    assert!(!missed.mutated);
    assert_eq!(missed.reply, format!("Task with ID {} not found.", missing_id));

    // The completed task no longer shows up under the pending filter
    let pending = run(&pool, owner.id, "list_tasks", json!({ "status": "pending" })).await;
    assert!(!pending.mutated);
    assert_eq!(pending.reply, "You have no tasks matching the filter.");

    // Update mutates
    let updated = run(
        &pool,
        owner.id,
        "update_task",
        json!({ "task_id": task_id, "title": "Water all the plants" }),
    )
    .await;
    assert!(updated.mutated);
    assert_eq!(updated.reply, format!("Task {} updated successfully.", task_id));

    // Delete mutates once, then reports not found without mutating
    let deleted = run(&pool, owner.id, "delete_task", json!({ "task_id": task_id })).await;
    assert!(deleted.mutated);
    assert_eq!(deleted.reply, "Task 'Water all the plants' has been deleted.");

    let deleted_again = run(&pool, owner.id, "delete_task", json!({ "task_id": task_id })).await;
    assert!(!deleted_again.mutated);
    assert_eq!(
        deleted_again.reply,
        format!("Task with ID {} not found.", task_id)
    );

    cleanup_user(&pool, email).await;
}
