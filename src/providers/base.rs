use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::types::{message::Message, tool::ToolDefinition};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// A chat-completion backend
pub trait Provider: Send + Sync {
    /// Send the whole conversation and wait for the next assistant message.
    /// An empty `tools` slice means the model is offered no tools.
    fn complete(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<(Message, Usage)>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_usage_serialization() -> Result<()> {
        let usage = Usage::new(Some(10), Some(20), Some(30));
        let json_value = serde_json::to_value(&usage)?;
        assert_eq!(json_value["input_tokens"], json!(10));
        assert_eq!(json_value["output_tokens"], json!(20));
        assert_eq!(json_value["total_tokens"], json!(30));

        let empty = serde_json::to_value(Usage::default())?;
        assert!(empty["total_tokens"].is_null());
        Ok(())
    }
}
