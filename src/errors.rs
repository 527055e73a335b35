use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set.")]
    MissingVar(String),

    #[error("Environment variable '{key}' has an invalid value: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Input message too long. Message: {0}")]
    ContextLengthExceeded(String),

    #[error("Server error: {0}")]
    Server(StatusCode),

    #[error("Request failed: {status}\nBody: {body}")]
    RequestFailed { status: StatusCode, body: String },

    #[error("OpenAI API error: {0}")]
    Api(Value),
}

/// Ways the concert conversation can stop before producing a final answer
#[derive(Error, Debug)]
pub enum ConversationError {
    #[error("Argument '{argument}' not found in arguments of tool call {tool_call_id}")]
    MissingArgument {
        argument: &'static str,
        tool_call_id: String,
    },

    #[error("Model response did not request a tool call")]
    NoToolCall,

    #[error("Could not parse arguments of tool call {tool_call_id}: {source}")]
    InvalidArguments {
        tool_call_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConversationError {
    /// The only failure the entry point treats as a graceful stop
    pub fn is_missing_argument(&self) -> bool {
        matches!(self, ConversationError::MissingArgument { .. })
    }
}
