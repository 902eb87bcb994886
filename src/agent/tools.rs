//! The five-tool palette shared by the chat adapter: argument schemas passed
//! to the model, strict argument parsing, and dispatch into the task store.
//!
//! Parsing is separated from execution so the enum and type checks are plain
//! functions; every invocation returns an explicit [`ToolOutcome`] carrying
//! both the reply text and whether state was mutated, instead of signalling
//! side effects through a shared flag.

use crate::error::AppError;
use crate::models::{NewTodo, Priority, TodoPatch, TodoStatus};
use crate::store::todos;
use serde_json::{json, Value};
use sqlx::PgPool;

/// Result of one tool invocation: what to tell the model, and whether the
/// task list changed (so the caller's UI knows to refresh).
#[derive(Debug)]
pub struct ToolOutcome {
    pub reply: String,
    pub mutated: bool,
}

impl ToolOutcome {
    fn mutated(reply: String) -> Self {
        Self {
            reply,
            mutated: true,
        }
    }

    fn read_only(reply: String) -> Self {
        Self {
            reply,
            mutated: false,
        }
    }
}

/// Status filter accepted by `list_tasks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    All,
    Pending,
    Completed,
}

/// A validated tool invocation, ready to run against the store.
#[derive(Debug, PartialEq)]
pub enum ToolCommand {
    Add {
        title: String,
        description: Option<String>,
        priority: Priority,
    },
    List {
        filter: ListFilter,
    },
    Complete {
        task_id: i32,
    },
    Delete {
        task_id: i32,
    },
    Update {
        task_id: i32,
        patch: TodoPatch,
    },
}

fn required_str(args: &Value, key: &str) -> Result<String, String> {
    args.get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| format!("missing required argument '{}'", key))
}

fn optional_str(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

fn required_id(args: &Value, key: &str) -> Result<i32, String> {
    args.get(key)
        .and_then(|v| v.as_i64())
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| format!("argument '{}' must be an integer task id", key))
}

fn parse_priority(raw: &str) -> Result<Priority, String> {
    match raw {
        "Low" => Ok(Priority::Low),
        "Medium" => Ok(Priority::Medium),
        "High" => Ok(Priority::High),
        other => Err(format!("'{}' is not a valid priority", other)),
    }
}

fn parse_status(raw: &str) -> Result<TodoStatus, String> {
    match raw {
        "Incomplete" => Ok(TodoStatus::Incomplete),
        "Complete" => Ok(TodoStatus::Complete),
        other => Err(format!("'{}' is not a valid status", other)),
    }
}

impl ToolCommand {
    /// Validates a named invocation against its schema: argument presence,
    /// integer ids, and enum membership. Errors are plain text handed back to
    /// the model as the tool result.
    pub fn parse(name: &str, args: &Value) -> Result<Self, String> {
        match name {
            "add_task" => {
                let title = required_str(args, "title")?;
                let priority = match optional_str(args, "priority") {
                    Some(raw) => parse_priority(&raw)?,
                    None => Priority::Medium,
                };
                Ok(ToolCommand::Add {
                    title,
                    description: optional_str(args, "description"),
                    priority,
                })
            }
            "list_tasks" => {
                let filter = match optional_str(args, "status").as_deref() {
                    None | Some("all") => ListFilter::All,
                    Some("pending") => ListFilter::Pending,
                    Some("completed") => ListFilter::Completed,
                    Some(other) => return Err(format!("'{}' is not a valid status filter", other)),
                };
                Ok(ToolCommand::List { filter })
            }
            "complete_task" => Ok(ToolCommand::Complete {
                task_id: required_id(args, "task_id")?,
            }),
            "delete_task" => Ok(ToolCommand::Delete {
                task_id: required_id(args, "task_id")?,
            }),
            "update_task" => {
                let task_id = required_id(args, "task_id")?;
                let priority = match optional_str(args, "priority") {
                    Some(raw) => Some(parse_priority(&raw)?),
                    None => None,
                };
                let status = match optional_str(args, "status") {
                    Some(raw) => Some(parse_status(&raw)?),
                    None => None,
                };
                Ok(ToolCommand::Update {
                    task_id,
                    patch: TodoPatch {
                        title: optional_str(args, "title"),
                        description: optional_str(args, "description"),
                        priority,
                        status,
                    },
                })
            }
            other => Err(format!("unknown tool '{}'", other)),
        }
    }
}

/// Runs a validated command against the store as the given owner. Missing or
/// foreign-owned tasks come back as a textual "not found" reply, never as an
/// error; database failures propagate.
pub async fn execute(
    pool: &PgPool,
    owner_id: i32,
    command: ToolCommand,
) -> Result<ToolOutcome, AppError> {
    match command {
        ToolCommand::Add {
            title,
            description,
            priority,
        } => {
            let todo = todos::create(
                pool,
                owner_id,
                NewTodo {
                    title,
                    description,
                    priority: Some(priority),
                },
            )
            .await?;
            Ok(ToolOutcome::mutated(format!(
                "Task '{}' (ID: {}) has been added successfully.",
                todo.title, todo.id
            )))
        }
        ToolCommand::List { filter } => {
            let items = match filter {
                ListFilter::All => todos::list(pool, owner_id).await?,
                ListFilter::Pending => {
                    todos::list_by_status(pool, owner_id, TodoStatus::Incomplete).await?
                }
                ListFilter::Completed => {
                    todos::list_by_status(pool, owner_id, TodoStatus::Complete).await?
                }
            };
            if items.is_empty() {
                return Ok(ToolOutcome::read_only(
                    "You have no tasks matching the filter.".to_string(),
                ));
            }
            let mut output = String::from("Your tasks:\n");
            for todo in &items {
                output.push_str(&format!(
                    "- [{}] {} ({:?})\n",
                    todo.id, todo.title, todo.status
                ));
            }
            Ok(ToolOutcome::read_only(output))
        }
        ToolCommand::Complete { task_id } => match todos::complete(pool, owner_id, task_id).await {
            Ok(todo) => Ok(ToolOutcome::mutated(format!(
                "Task '{}' marked as complete.",
                todo.title
            ))),
            Err(AppError::NotFound(_)) => Ok(ToolOutcome::read_only(not_found_reply(task_id))),
            Err(e) => Err(e),
        },
        ToolCommand::Delete { task_id } => {
            let existing = todos::find(pool, owner_id, task_id).await?;
            match existing {
                Some(todo) => {
                    todos::delete(pool, owner_id, task_id).await?;
                    Ok(ToolOutcome::mutated(format!(
                        "Task '{}' has been deleted.",
                        todo.title
                    )))
                }
                None => Ok(ToolOutcome::read_only(not_found_reply(task_id))),
            }
        }
        ToolCommand::Update { task_id, patch } => {
            match todos::update(pool, owner_id, task_id, &patch).await {
                Ok(_) => Ok(ToolOutcome::mutated(format!(
                    "Task {} updated successfully.",
                    task_id
                ))),
                Err(AppError::NotFound(_)) => Ok(ToolOutcome::read_only(not_found_reply(task_id))),
                Err(e) => Err(e),
            }
        }
    }
}

pub fn not_found_reply(task_id: i32) -> String {
    format!("Task with ID {} not found.", task_id)
}

/// Tool definitions in the chat-completions `tools` format.
pub fn tool_definitions() -> Value {
    json!([
        {
            "type": "function",
            "function": {
                "name": "add_task",
                "description": "Create a new task on the user's todo list",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string", "description": "The title of the task" },
                        "description": { "type": "string", "description": "Optional longer description" },
                        "priority": { "type": "string", "enum": ["Low", "Medium", "High"] }
                    },
                    "required": ["title"]
                }
            }
        },
        {
            "type": "function",
            "function": {
                "name": "list_tasks",
                "description": "List the user's tasks",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "status": { "type": "string", "enum": ["all", "pending", "completed"], "default": "all" }
                    }
                }
            }
        },
        {
            "type": "function",
            "function": {
                "name": "complete_task",
                "description": "Mark a task as complete",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "task_id": { "type": "integer", "description": "The ID of the task to complete" }
                    },
                    "required": ["task_id"]
                }
            }
        },
        {
            "type": "function",
            "function": {
                "name": "delete_task",
                "description": "Delete a task",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "task_id": { "type": "integer", "description": "The ID of the task to delete" }
                    },
                    "required": ["task_id"]
                }
            }
        },
        {
            "type": "function",
            "function": {
                "name": "update_task",
                "description": "Update the title, description, priority or status of a task",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "task_id": { "type": "integer", "description": "The ID of the task to update" },
                        "title": { "type": "string", "description": "New title" },
                        "description": { "type": "string", "description": "New description" },
                        "priority": { "type": "string", "enum": ["Low", "Medium", "High"] },
                        "status": { "type": "string", "enum": ["Incomplete", "Complete"] }
                    },
                    "required": ["task_id"]
                }
            }
        }
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_add_task_defaults_priority() {
        let command = ToolCommand::parse("add_task", &json!({ "title": "Buy milk" })).unwrap();
        match command {
            ToolCommand::Add {
                title,
                description,
                priority,
            } => {
                assert_eq!(title, "Buy milk");
                assert_eq!(description, None);
                assert_eq!(priority, Priority::Medium);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_add_task_requires_title() {
        let err = ToolCommand::parse("add_task", &json!({})).unwrap_err();
        assert!(err.contains("title"));
    }

    #[test]
    fn test_parse_rejects_bad_priority_enum() {
        let err =
            ToolCommand::parse("add_task", &json!({ "title": "x", "priority": "urgent" }))
                .unwrap_err();
        assert!(err.contains("priority"));
    }

    #[test]
    fn test_parse_list_filter_enum() {
        assert_eq!(
            ToolCommand::parse("list_tasks", &json!({})).unwrap(),
            ToolCommand::List {
                filter: ListFilter::All
            }
        );
        assert_eq!(
            ToolCommand::parse("list_tasks", &json!({ "status": "pending" })).unwrap(),
            ToolCommand::List {
                filter: ListFilter::Pending
            }
        );
        assert!(ToolCommand::parse("list_tasks", &json!({ "status": "done" })).is_err());
    }

    #[test]
    fn test_parse_task_id_must_be_integer() {
        let err = ToolCommand::parse("complete_task", &json!({ "task_id": "7" })).unwrap_err();
        assert!(err.contains("task_id"));

        let command = ToolCommand::parse("complete_task", &json!({ "task_id": 7 })).unwrap();
        assert_eq!(command, ToolCommand::Complete { task_id: 7 });
    }

    #[test]
    fn test_parse_update_builds_partial_patch() {
        let command = ToolCommand::parse(
            "update_task",
            &json!({ "task_id": 3, "status": "Complete" }),
        )
        .unwrap();
        match command {
            ToolCommand::Update { task_id, patch } => {
                assert_eq!(task_id, 3);
                assert_eq!(patch.status, Some(TodoStatus::Complete));
                assert_eq!(patch.title, None);
                assert_eq!(patch.description, None);
                assert_eq!(patch.priority, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_tool_outcome_flags() {
        // The chat loop ORs these flags into the `refresh` it hands back, so
        // writes must report mutated and reads must not.
        assert!(ToolOutcome::mutated("done".to_string()).mutated);
        assert!(!ToolOutcome::read_only("listing".to_string()).mutated);
    }

    #[test]
    fn test_parse_unknown_tool() {
        let err = ToolCommand::parse("drop_table", &json!({})).unwrap_err();
        assert!(err.contains("unknown tool"));
    }

    #[test]
    fn test_tool_definitions_cover_the_palette() {
        let definitions = tool_definitions();
        let names: Vec<&str> = definitions
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["function"]["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "add_task",
                "list_tasks",
                "complete_task",
                "delete_task",
                "update_task"
            ]
        );
    }
}
