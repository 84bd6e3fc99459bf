use anyhow::{anyhow, Result};
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::OnceLock;

use crate::errors::AgentError;
use crate::models::message::{Message, MessageContent};
use crate::models::role::Role;
use crate::models::tool::{Tool, ToolCall};

use super::base::Usage;

/// Decoded body of a chat completions response. Only the fields the agent reads are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<UsagePayload>,
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<ResponseToolCall>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseToolCall {
    pub id: String,
    pub function: ResponseFunction,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseFunction {
    pub name: String,
    /// JSON encoded argument object
    pub arguments: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsagePayload {
    pub prompt_tokens: Option<i32>,
    pub completion_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl From<&UsagePayload> for Usage {
    fn from(usage: &UsagePayload) -> Self {
        let total_tokens = usage
            .total_tokens
            .or(match (usage.prompt_tokens, usage.completion_tokens) {
                (Some(input), Some(output)) => Some(input + output),
                _ => None,
            });
        Usage::new(usage.prompt_tokens, usage.completion_tokens, total_tokens)
    }
}

/// Convert internal Message format to OpenAI's API message specification
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    let mut messages_spec = Vec::new();

    for message in messages {
        let mut converted = json!({
            "role": message.role
        });
        let mut tool_calls = Vec::new();
        let mut output = Vec::new();

        for content in &message.content {
            match content {
                MessageContent::Text(text) => {
                    let merged = match converted.get("content").and_then(Value::as_str) {
                        Some(existing) => format!("{}{}", existing, text.text),
                        None => text.text.clone(),
                    };
                    converted["content"] = json!(merged);
                }
                MessageContent::ToolRequest(request) => match &request.tool_call {
                    Ok(tool_call) => {
                        tool_calls.push(json!({
                            "id": request.id,
                            "type": "function",
                            "function": {
                                "name": sanitize_function_name(&tool_call.name),
                                "arguments": tool_call.arguments.to_string(),
                            }
                        }));
                    }
                    Err(e) => {
                        output.push(json!({
                            "role": "tool",
                            "content": format!("Error: {}", e),
                            "tool_call_id": request.id
                        }));
                    }
                },
                MessageContent::ToolResponse(response) => {
                    let content = match &response.tool_result {
                        Ok(text) => text.clone(),
                        // A tool error is shown as output so the model can interpret it
                        Err(e) => format!("The tool call returned the following error:\n{}", e),
                    };
                    output.push(json!({
                        "role": "tool",
                        "content": content,
                        "tool_call_id": response.id
                    }));
                }
            }
        }

        if !tool_calls.is_empty() {
            converted["tool_calls"] = json!(tool_calls);
        }
        if converted.get("content").is_some() || converted.get("tool_calls").is_some() {
            output.insert(0, converted);
        }
        messages_spec.extend(output);
    }

    messages_spec
}

/// Convert internal Tool format to OpenAI's API tool specification
pub fn tools_to_openai_spec(tools: &[Tool]) -> Result<Vec<Value>> {
    let mut tool_names = std::collections::HashSet::new();
    let mut result = Vec::new();

    for tool in tools {
        if !tool_names.insert(&tool.name) {
            return Err(anyhow!("Duplicate tool name: {}", tool.name));
        }

        result.push(json!({
            "type": "function",
            "function": {
                "name": tool.name,
                "description": tool.description,
                "parameters": tool.input_schema,
            }
        }));
    }

    Ok(result)
}

/// Convert OpenAI's API response to internal Message format
pub fn openai_response_to_message(response: &ChatCompletionResponse) -> Result<Message> {
    let original = &response
        .choices
        .first()
        .ok_or_else(|| anyhow!("Completion response contained no choices"))?
        .message;
    let mut message = Message::assistant();

    if let Some(text) = &original.content {
        message = message.with_text(text);
    }

    for tool_call in original.tool_calls.iter().flatten() {
        let id = tool_call.id.clone();
        let function_name = &tool_call.function.name;

        if !is_valid_function_name(function_name) {
            let error = AgentError::ToolNotFound(format!(
                "The provided function name '{}' had invalid characters, it must match this regex [a-zA-Z0-9_-]+",
                function_name
            ));
            message = message.with_tool_request(id, Err(error));
            continue;
        }

        match serde_json::from_str::<Value>(&tool_call.function.arguments) {
            Ok(arguments) => {
                message =
                    message.with_tool_request(id, Ok(ToolCall::new(function_name, arguments)));
            }
            Err(e) => {
                let error = AgentError::InvalidParameters(format!(
                    "Could not interpret tool use parameters for id {}: {}",
                    id, e
                ));
                message = message.with_tool_request(id, Err(error));
            }
        }
    }

    Ok(message)
}

fn invalid_function_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9_-]").expect("function name pattern is valid"))
}

fn sanitize_function_name(name: &str) -> String {
    invalid_function_chars().replace_all(name, "_").to_string()
}

fn is_valid_function_name(name: &str) -> bool {
    !name.is_empty() && !invalid_function_chars().is_match(name)
}

#[derive(Debug, thiserror::Error)]
#[error("Context length exceeded. Message: {0}")]
pub struct ContextLengthExceededError(String);

pub fn check_openai_context_length_error(error: &Value) -> Option<ContextLengthExceededError> {
    let code = error.get("code")?.as_str()?;
    if code == "context_length_exceeded" || code == "string_above_max_length" {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error")
            .to_string();
        Some(ContextLengthExceededError(message))
    } else {
        None
    }
}
