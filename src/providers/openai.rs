use anyhow::Result;
use reqwest::blocking::Client; // we are using blocking API here to make sync calls
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::debug;

use super::{
    base::{Provider, Usage},
    configs::OpenAiProviderConfig,
    types::{message::Message, tool::ToolDefinition},
    utils::{messages_to_openai_spec, openai_error, openai_response_to_message, tools_to_openai_spec},
};
use crate::errors::ProviderError;

#[derive(Debug)]
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiProviderConfig,
}

/// Build a provider for the public endpoint with default model and timeout.
/// No request is made until the first completion.
pub fn build_client(api_key: impl Into<String>) -> Result<OpenAiProvider> {
    OpenAiProvider::new(OpenAiProviderConfig::new(api_key.into()))
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OpenAiProviderConfig {
        &self.config
    }

    fn get_usage(data: &Value) -> Usage {
        let Some(usage) = data.get("usage") else {
            return Usage::default();
        };

        let tokens = |key: &str| {
            usage
                .get(key)
                .and_then(|v| v.as_i64())
                .and_then(|v| i32::try_from(v).ok())
        };

        let input_tokens = tokens("prompt_tokens");
        let output_tokens = tokens("completion_tokens");
        let total_tokens = tokens("total_tokens").or_else(|| match (input_tokens, output_tokens) {
            (Some(input), Some(output)) => input.checked_add(output),
            _ => None,
        });

        Usage::new(input_tokens, output_tokens, total_tokens)
    }

    fn build_payload(&self, messages: &[Message], tools: &[ToolDefinition]) -> Value {
        let mut payload = json!({
            "model": self.config.model,
            "messages": messages_to_openai_spec(messages),
        });

        if !tools.is_empty() {
            payload["tools"] = json!(tools_to_openai_spec(tools));
        }
        payload
    }

    fn post(&self, payload: &Value) -> Result<Value> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        );
        debug!("POST {} with payload {}", url, payload);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(payload)
            .send()?;

        match response.status() {
            StatusCode::OK => Ok(response.json()?),
            status if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() => {
                Err(ProviderError::Server(status).into())
            }
            status => {
                let body = response.text().unwrap_or_default();
                Err(ProviderError::RequestFailed { status, body }.into())
            }
        }
    }
}

impl Provider for OpenAiProvider {
    fn complete(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<(Message, Usage)> {
        let payload = self.build_payload(messages, tools);
        let response = self.post(&payload)?;

        if let Some(error) = response.get("error") {
            return Err(openai_error(error).into());
        }

        let message = openai_response_to_message(&response)?;
        let usage = Self::get_usage(&response);

        Ok((message, usage))
    }
}
