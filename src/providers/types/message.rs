use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use super::content::{Content, Text, ToolRequest, ToolResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// One role-tagged turn of a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<Content>,
}

impl Message {
    pub fn new(role: Role, content: Vec<Content>) -> Result<Self> {
        let msg = Self { role, content };
        msg.validate()?;
        Ok(msg)
    }

    fn validate(&self) -> Result<()> {
        match self.role {
            Role::System | Role::User => {
                if !self.has_text() {
                    return Err(anyhow!("{:?} message must include Text", self.role));
                }
                if self.has_tool_request() || self.has_tool_result() {
                    return Err(anyhow!("{:?} message only supports Text", self.role));
                }
            }
            // An empty assistant message is a final answer without content
            Role::Assistant => {
                if self.has_tool_result() {
                    return Err(anyhow!("Assistant message does not support ToolResult"));
                }
            }
            Role::Tool => {
                let results = self.content.iter().filter(|c| matches!(c, Content::ToolResult(_)));
                if results.count() != 1 || self.content.len() != 1 {
                    return Err(anyhow!("Tool message must hold exactly one ToolResult"));
                }
            }
        }
        Ok(())
    }

    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|content| match content {
                Content::Text(text) => Some(text.text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn tool_requests(&self) -> Vec<&ToolRequest> {
        self.content
            .iter()
            .filter_map(|content| match content {
                Content::ToolRequest(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn tool_result(&self) -> Option<&ToolResult> {
        self.content.iter().find_map(|content| match content {
            Content::ToolResult(result) => Some(result),
            _ => None,
        })
    }

    fn has_text(&self) -> bool {
        self.content.iter().any(|c| matches!(c, Content::Text(_)))
    }

    fn has_tool_request(&self) -> bool {
        self.content.iter().any(|c| matches!(c, Content::ToolRequest(_)))
    }

    fn has_tool_result(&self) -> bool {
        self.content.iter().any(|c| matches!(c, Content::ToolResult(_)))
    }

    fn text_content(text: &str) -> Vec<Content> {
        vec![Content::Text(Text {
            text: text.to_string(),
        })]
    }

    pub fn system(text: &str) -> Result<Self> {
        Self::new(Role::System, Self::text_content(text))
    }

    pub fn user(text: &str) -> Result<Self> {
        Self::new(Role::User, Self::text_content(text))
    }

    pub fn assistant(text: &str) -> Result<Self> {
        Self::new(Role::Assistant, Self::text_content(text))
    }

    pub fn tool(tool_call_id: &str, output: String) -> Result<Self> {
        Self::new(
            Role::Tool,
            vec![Content::ToolResult(ToolResult {
                tool_call_id: tool_call_id.to_string(),
                output,
            })],
        )
    }

    pub fn summary(&self) -> String {
        let content_summaries: Vec<String> = self.content.iter().map(|c| c.summary()).collect();
        format!("message:{:?}\n{}", self.role, content_summaries.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: &str) -> Content {
        Content::ToolRequest(ToolRequest::new(id, "get_concert_info", "{}"))
    }

    #[test]
    fn test_text_messages() -> Result<()> {
        let system = Message::system("be helpful")?;
        assert_eq!(system.role, Role::System);
        assert_eq!(system.text(), "be helpful");

        let user = Message::user("abcd")?;
        assert_eq!(user.role, Role::User);
        assert_eq!(user.text(), "abcd");
        Ok(())
    }

    #[test]
    fn test_assistant_tool_requests() -> Result<()> {
        let message = Message::new(Role::Assistant, vec![request("1"), request("2")])?;
        let requests = message.tool_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].id, "2");
        assert_eq!(message.text(), "");
        Ok(())
    }

    #[test]
    fn test_empty_assistant_message_is_allowed() -> Result<()> {
        let message = Message::new(Role::Assistant, vec![])?;
        assert!(message.text().is_empty());
        assert!(message.tool_requests().is_empty());
        Ok(())
    }

    #[test]
    fn test_tool_result_message() -> Result<()> {
        let message = Message::tool("call_9", "{}".to_string())?;
        assert_eq!(message.role, Role::Tool);
        assert_eq!(message.tool_result().map(|r| r.tool_call_id.as_str()), Some("call_9"));
        Ok(())
    }

    #[test]
    fn test_message_validation() {
        // user with a tool request
        let result = Message::new(
            Role::User,
            vec![
                Content::Text(Text {
                    text: "hi".to_string(),
                }),
                request("1"),
            ],
        );
        assert!(result.is_err());

        // system without text
        assert!(Message::new(Role::System, vec![]).is_err());

        // assistant with a tool result
        let result = Message::new(
            Role::Assistant,
            vec![Content::ToolResult(ToolResult {
                tool_call_id: "1".to_string(),
                output: "out".to_string(),
            })],
        );
        assert!(result.is_err());

        // tool message carrying text
        let result = Message::new(Role::Tool, Message::text_content("loose text"));
        assert!(result.is_err());
    }

    #[test]
    fn test_summary() -> Result<()> {
        let message = Message::new(Role::Assistant, vec![request("call_1")])?;
        let summary = message.summary();
        assert!(summary.starts_with("message:Assistant"));
        assert!(summary.contains("content:tool_request:get_concert_info:call_1"));
        Ok(())
    }
}
