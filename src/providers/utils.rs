use anyhow::{anyhow, Result};
use regex::Regex;
use serde_json::{json, Value};

use super::types::{
    content::{Content, Text, ToolRequest},
    message::{Message, Role},
    tool::ToolDefinition,
};
use crate::errors::ProviderError;

/// Convert internal Message format to OpenAI's API message specification
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    let mut messages_spec = Vec::new();

    for message in messages {
        let mut converted = json!({
            "role": message.role
        });
        let mut tool_calls = Vec::new();

        for content in &message.content {
            match content {
                Content::Text(Text { text }) => {
                    converted["content"] = json!(text);
                }
                Content::ToolRequest(request) => {
                    tool_calls.push(json!({
                        "id": request.id,
                        "type": "function",
                        "function": {
                            "name": sanitize_function_name(&request.name),
                            "arguments": request.arguments,
                        }
                    }));
                }
                Content::ToolResult(result) => {
                    converted["content"] = json!(result.output);
                    converted["tool_call_id"] = json!(result.tool_call_id);
                }
            }
        }

        if !tool_calls.is_empty() {
            converted["tool_calls"] = json!(tool_calls);
        }

        if converted.get("content").is_some() || converted.get("tool_calls").is_some() {
            messages_spec.push(converted);
        }
    }

    messages_spec
}

/// Tool schemas go out exactly as they were loaded
pub fn tools_to_openai_spec(tools: &[ToolDefinition]) -> Vec<Value> {
    tools.iter().map(|tool| tool.as_value().clone()).collect()
}

/// Convert OpenAI's API response to internal Message format
pub fn openai_response_to_message(response: &Value) -> Result<Message> {
    let original = response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .ok_or_else(|| anyhow!("No choices in response: {}", response))?;
    let mut content = Vec::new();

    if let Some(text) = original.get("content").and_then(Value::as_str) {
        content.push(Content::Text(Text {
            text: text.to_string(),
        }));
    }

    if let Some(tool_calls) = original.get("tool_calls").and_then(Value::as_array) {
        for tool_call in tool_calls {
            let id = tool_call["id"].as_str().unwrap_or_default();
            let name = tool_call["function"]["name"].as_str().unwrap_or_default();
            let arguments = tool_call["function"]["arguments"]
                .as_str()
                .unwrap_or_default();
            content.push(Content::ToolRequest(ToolRequest::new(id, name, arguments)));
        }
    }

    Message::new(Role::Assistant, content)
}

fn sanitize_function_name(name: &str) -> String {
    let re = Regex::new(r"[^a-zA-Z0-9_-]").unwrap();
    re.replace_all(name, "_").to_string()
}

/// Map an `error` object from a response body onto a typed provider error
pub fn openai_error(error: &Value) -> ProviderError {
    let code = error.get("code").and_then(Value::as_str);
    match code {
        Some("context_length_exceeded") | Some("string_above_max_length") => {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error");
            ProviderError::ContextLengthExceeded(message.to_string())
        }
        _ => ProviderError::Api(error.clone()),
    }
}
