//! The fixed two-round concert conversation.
//!
//! The model is offered the loaded tools, asked about Jack's concerts, and is
//! expected to answer with tool calls. Each call is answered from the concert
//! data and the whole transcript goes back for a final answer, this time with
//! no tools on offer.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::concerts::{ConcertLookup, ConcertRecord};
use crate::errors::ConversationError;
use crate::providers::base::{Provider, Usage};
use crate::providers::types::content::ToolRequest;
use crate::providers::types::message::Message;
use crate::providers::types::tool::ToolDefinition;

pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant who fetches concert information for users.";
pub const CONCERT_REQUEST: &str = "Can you fetch the concert info for Jack?";

const USER_NAME_ARGUMENT: &str = "user_name";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    Init,
    AwaitingToolCall,
    ToolExecuted,
    AwaitingFinalAnswer,
    Done,
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConversationState::Init => "init",
            ConversationState::AwaitingToolCall => "awaiting_tool_call",
            ConversationState::ToolExecuted => "tool_executed",
            ConversationState::AwaitingFinalAnswer => "awaiting_final_answer",
            ConversationState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Body of the tool message sent back to the model
#[derive(Debug, Serialize)]
struct ConcertToolResult<'a> {
    user_name: &'a str,
    concert_info: &'a [ConcertRecord],
}

#[derive(Debug, Clone)]
pub struct ConversationOutcome {
    /// The full transcript, final answer included
    pub messages: Vec<Message>,
    pub final_message: Message,
    pub usage: Usage,
}

pub struct ConcertConversation<'a, P: Provider + ?Sized> {
    provider: &'a P,
    tools: &'a [ToolDefinition],
    concerts: &'a ConcertLookup,
    state: ConversationState,
}

impl<'a, P: Provider + ?Sized> ConcertConversation<'a, P> {
    pub fn new(provider: &'a P, tools: &'a [ToolDefinition], concerts: &'a ConcertLookup) -> Self {
        Self {
            provider,
            tools,
            concerts,
            state: ConversationState::Init,
        }
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    fn advance(&mut self, next: ConversationState) {
        debug!("Conversation state {} -> {}", self.state, next);
        self.state = next;
    }

    pub fn run(&mut self) -> Result<ConversationOutcome, ConversationError> {
        let mut messages = vec![Message::system(SYSTEM_PROMPT)?, Message::user(CONCERT_REQUEST)?];

        self.advance(ConversationState::AwaitingToolCall);
        let (response, usage) = self.provider.complete(&messages, self.tools)?;
        info!("\nResponse: {}\n", response.summary());
        debug!("Usage: {:?}", usage);

        let requests = response.tool_requests();
        if requests.is_empty() {
            return Err(ConversationError::NoToolCall);
        }
        if requests.len() > 1 {
            warn!("Model requested {} tool calls, answering each", requests.len());
        }

        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            info!("Tool call: {}\n", request.summary());
            let user_name = user_name_argument(request)?;
            let concerts = self.concerts.lookup(&user_name)?;

            let output = serde_json::to_string(&ConcertToolResult {
                user_name: &user_name,
                concert_info: &concerts,
            })?;
            results.push(Message::tool(&request.id, output)?);
        }
        self.advance(ConversationState::ToolExecuted);

        messages.push(response);
        messages.extend(results);

        self.advance(ConversationState::AwaitingFinalAnswer);
        let (final_message, usage) = self.provider.complete(&messages, &[])?;
        info!("\nComplete Response: {}\n", final_message.summary());

        let text = final_message.text();
        if !text.is_empty() {
            info!("{}", text);
        }

        messages.push(final_message.clone());
        self.advance(ConversationState::Done);

        Ok(ConversationOutcome {
            messages,
            final_message,
            usage,
        })
    }
}

fn user_name_argument(request: &ToolRequest) -> Result<String, ConversationError> {
    let arguments = request
        .parse_arguments()
        .map_err(|source| ConversationError::InvalidArguments {
            tool_call_id: request.id.clone(),
            source,
        })?;

    arguments
        .get(USER_NAME_ARGUMENT)
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ConversationError::MissingArgument {
            argument: USER_NAME_ARGUMENT,
            tool_call_id: request.id.clone(),
        })
}
