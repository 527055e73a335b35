use serde::{Deserialize, Serialize};
use serde_json::Value;

// Text content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
}

impl Text {
    pub fn summary(&self) -> String {
        format!("content:text\n{}", self.text)
    }
}

/// A function invocation the model asked us to run locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Correlation id, echoed back as `tool_call_id` on the result
    pub id: String,
    pub name: String,
    /// JSON-encoded arguments exactly as the model sent them
    pub arguments: String,
}

impl ToolRequest {
    pub fn new<I, N, A>(id: I, name: N, arguments: A) -> Self
    where
        I: Into<String>,
        N: Into<String>,
        A: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    pub fn parse_arguments(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.arguments)
    }

    pub fn summary(&self) -> String {
        format!(
            "content:tool_request:{}:{}\narguments:{}",
            self.name, self.id, self.arguments
        )
    }
}

// Tool result content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub output: String,
}

impl ToolResult {
    pub fn summary(&self) -> String {
        format!(
            "content:tool_result:{}\noutput:{}",
            self.tool_call_id, self.output
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    Text(Text),
    ToolRequest(ToolRequest),
    ToolResult(ToolResult),
}

impl Content {
    pub fn summary(&self) -> String {
        match self {
            Content::Text(t) => t.summary(),
            Content::ToolRequest(t) => t.summary(),
            Content::ToolResult(t) => t.summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_arguments() {
        let request = ToolRequest::new("call_1", "get_concert_info", r#"{"user_name": "jack"}"#);
        assert_eq!(request.parse_arguments().unwrap(), json!({"user_name": "jack"}));

        let broken = ToolRequest::new("call_2", "get_concert_info", "{user_name");
        assert!(broken.parse_arguments().is_err());
    }

    #[test]
    fn test_content_tagging() -> serde_json::Result<()> {
        let content = Content::ToolResult(ToolResult {
            tool_call_id: "call_1".to_string(),
            output: "[]".to_string(),
        });
        let value = serde_json::to_value(&content)?;
        assert_eq!(value["type"], "ToolResult");
        assert!(content.summary().starts_with("content:tool_result:call_1"));
        Ok(())
    }
}
