use anyhow::Result;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::base::{Provider, Usage};
use super::types::{
    message::{Message, Role},
    tool::ToolDefinition,
};

/// What a [`MockProvider`] was asked to complete
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub tools: Vec<ToolDefinition>,
}

/// A mock provider that returns pre-configured responses for testing
pub struct MockProvider {
    responses: Mutex<VecDeque<Message>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<Message>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Provider for MockProvider {
    fn complete(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<(Message, Usage)> {
        self.requests.lock().unwrap().push(CompletionRequest {
            messages: messages.to_vec(),
            tools: tools.to_vec(),
        });

        // Empty assistant message once the script runs out
        let response = self.responses.lock().unwrap().pop_front();
        match response {
            Some(message) => Ok((message, Usage::default())),
            None => Ok((Message::new(Role::Assistant, vec![])?, Usage::default())),
        }
    }
}
