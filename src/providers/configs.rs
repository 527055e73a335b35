use std::fmt;
use std::time::Duration;

use crate::config::EnvConfig;
use crate::errors::ConfigError;

pub const OPENAI_DEFAULT_HOST: &str = "https://api.openai.com";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o";
pub const OPENAI_DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Clone, PartialEq, Eq)]
pub struct OpenAiProviderConfig {
    pub api_key: String,
    pub host: String,
    pub model: String,
    pub timeout: Duration,
}

impl OpenAiProviderConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            host: OPENAI_DEFAULT_HOST.to_string(),
            model: OPENAI_DEFAULT_MODEL.to_string(),
            timeout: OPENAI_DEFAULT_TIMEOUT,
        }
    }
}

// Keep the key out of log lines
impl fmt::Debug for OpenAiProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiProviderConfig")
            .field("api_key", &"<redacted>")
            .field("host", &self.host)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl EnvConfig for OpenAiProviderConfig {
    fn from_source<F>(source: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = Self::get_env(&source, "OPENAI_API_KEY", true, None)?
            .ok_or_else(|| ConfigError::MissingVar("OPENAI_API_KEY".to_string()))?;
        let mut config = Self::new(api_key);

        if let Some(host) = Self::get_env(&source, "OPENAI_API_HOST", false, None)? {
            config.host = host;
        }
        if let Some(model) = Self::get_env(&source, "OPENAI_MODEL", false, None)? {
            config.model = model;
        }
        if let Some(secs) = Self::get_env(&source, "OPENAI_TIMEOUT_SECS", false, None)? {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "OPENAI_TIMEOUT_SECS".to_string(),
                    value: secs.clone(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
