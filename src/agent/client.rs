//! Minimal client for an OpenAI-compatible chat-completions endpoint.
//!
//! Only the slice of the protocol the chat adapter needs is modelled:
//! messages, tool definitions, and tool-call extraction from the response.

use crate::config::AgentConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Errors from the upstream model call. These never reach HTTP clients; the
/// chat adapter converts all of them into its soft fallback reply.
#[derive(Debug)]
pub enum AgentError {
    MissingApiKey,
    Http(String),
    BadPayload(String),
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AgentError::MissingApiKey => write!(f, "MODEL_API_KEY is not configured"),
            AgentError::Http(msg) => write!(f, "model API call failed: {}", msg),
            AgentError::BadPayload(msg) => write!(f, "unexpected model response: {}", msg),
        }
    }
}

/// A single tool invocation requested by the model.
#[derive(Debug, Clone)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// The assistant turn extracted from a completion response.
#[derive(Debug, Default)]
pub struct AssistantMessage {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

/// One entry of the conversation transcript sent upstream.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: Some(content.to_string()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.to_string()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Echo of the assistant turn, preserving the raw tool_calls block so the
    /// follow-up request pairs tool results with their call ids.
    pub fn assistant_raw(content: Option<String>, tool_calls: Option<Value>) -> Self {
        Self {
            role: "assistant".to_string(),
            content,
            tool_calls,
            tool_call_id: None,
        }
    }

    pub fn tool_result(tool_call_id: &str, content: &str) -> Self {
        Self {
            role: "tool".to_string(),
            content: Some(content.to_string()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.to_string()),
        }
    }
}

/// Parses the first choice of a chat-completions payload into the assistant
/// text plus any requested tool calls. Tool arguments arrive as a JSON string
/// and are decoded here; an unparseable argument string fails the whole turn.
pub fn parse_assistant_message(payload: &Value) -> Result<AssistantMessage, AgentError> {
    let message = payload
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .ok_or_else(|| AgentError::BadPayload("no choices[0].message".into()))?;

    let content = message
        .get("content")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    let mut tool_calls = Vec::new();
    if let Some(calls) = message.get("tool_calls").and_then(|v| v.as_array()) {
        for call in calls {
            let id = call
                .get("id")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            let function = call
                .get("function")
                .ok_or_else(|| AgentError::BadPayload("tool call without function".into()))?;
            let name = function
                .get("name")
                .and_then(|v| v.as_str())
                .ok_or_else(|| AgentError::BadPayload("tool call without name".into()))?
                .to_string();
            let arguments = match function.get("arguments") {
                Some(Value::String(raw)) => serde_json::from_str(raw)
                    .map_err(|e| AgentError::BadPayload(format!("bad tool arguments: {}", e)))?,
                Some(other) => other.clone(),
                None => Value::Object(Default::default()),
            };
            tool_calls.push(ToolCall { id, name, arguments });
        }
    }

    Ok(AssistantMessage {
        content,
        tool_calls,
    })
}

/// Raw `message.tool_calls` block of the first choice, if any. Kept verbatim
/// for the assistant echo message.
pub fn raw_tool_calls(payload: &Value) -> Option<Value> {
    payload
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("tool_calls"))
        .filter(|v| v.is_array())
        .cloned()
}

/// Performs one chat-completions call with the given transcript and tool
/// palette, returning the raw response payload.
pub async fn complete(
    http: &reqwest::Client,
    config: &AgentConfig,
    messages: &[ChatMessage],
    tools: &Value,
) -> Result<Value, AgentError> {
    let api_key = config.api_key.as_deref().ok_or(AgentError::MissingApiKey)?;

    let body = serde_json::json!({
        "model": config.model,
        "messages": messages,
        "tools": tools,
    });

    let response = http
        .post(format!("{}/chat/completions", config.api_base))
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| AgentError::Http(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(AgentError::Http(format!("status {}: {}", status, text)));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| AgentError::BadPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_plain_text_reply() {
        let payload = json!({
            "choices": [{
                "message": { "role": "assistant", "content": "Hello there" }
            }]
        });

        let message = parse_assistant_message(&payload).unwrap();
        assert_eq!(message.content.as_deref(), Some("Hello there"));
        assert!(message.tool_calls.is_empty());
        assert!(raw_tool_calls(&payload).is_none());
    }

    #[test]
    fn test_parse_tool_calls_with_string_arguments() {
        let payload = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "add_task",
                            "arguments": "{\"title\": \"Buy milk\"}"
                        }
                    }]
                }
            }]
        });

        let message = parse_assistant_message(&payload).unwrap();
        assert!(message.content.is_none());
        assert_eq!(message.tool_calls.len(), 1);
        assert_eq!(message.tool_calls[0].name, "add_task");
        assert_eq!(message.tool_calls[0].arguments["title"], "Buy milk");
        assert!(raw_tool_calls(&payload).is_some());
    }

    #[test]
    fn test_parse_rejects_empty_payload() {
        let payload = json!({ "choices": [] });
        assert!(parse_assistant_message(&payload).is_err());
    }

    #[test]
    fn test_parse_rejects_garbled_arguments() {
        let payload = json!({
            "choices": [{
                "message": {
                    "tool_calls": [{
                        "id": "call_1",
                        "function": { "name": "add_task", "arguments": "{not json" }
                    }]
                }
            }]
        });
        assert!(parse_assistant_message(&payload).is_err());
    }

    #[test]
    fn test_tool_message_serialization_skips_empty_fields() {
        let message = ChatMessage::tool_result("call_1", "done");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "tool");
        assert_eq!(value["tool_call_id"], "call_1");
        assert!(value.get("tool_calls").is_none());
    }
}
