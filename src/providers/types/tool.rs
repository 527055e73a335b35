use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool schema handed to the model verbatim.
///
/// The program never looks inside the schema beyond [`ToolDefinition::function_name`],
/// which only feeds the registry's log lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolDefinition(Value);

impl ToolDefinition {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// `function.name` when the schema follows the chat-completions tool shape
    pub fn function_name(&self) -> Option<&str> {
        self.0.pointer("/function/name").and_then(Value::as_str)
    }
}

impl From<Value> for ToolDefinition {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_function_name() {
        let tool = ToolDefinition::new(json!({
            "type": "function",
            "function": {
                "name": "get_concert_info",
                "parameters": {"type": "object"}
            }
        }));
        assert_eq!(tool.function_name(), Some("get_concert_info"));

        let opaque = ToolDefinition::from(json!(["not", "a", "tool"]));
        assert_eq!(opaque.function_name(), None);
    }

    #[test]
    fn test_serializes_unchanged() -> serde_json::Result<()> {
        let value = json!({"anything": [1, 2, {"nested": true}]});
        let tool = ToolDefinition::new(value.clone());
        assert_eq!(serde_json::to_value(&tool)?, value);
        Ok(())
    }
}
