use std::env;
use std::path::PathBuf;

use crate::concerts::NameMatching;
use crate::errors::ConfigError;

pub trait EnvConfig: Sized {
    /// Build the configuration from a key lookup
    fn from_source<F>(source: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>;

    /// Load configuration from environment variables
    fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Helper to read one key; empty values count as unset
    fn get_env<F>(
        source: &F,
        key: &str,
        required: bool,
        default: Option<String>,
    ) -> Result<Option<String>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match source(key).filter(|value| !value.trim().is_empty()) {
            Some(value) => Ok(Some(value)),
            None if !required => Ok(default),
            None => Err(ConfigError::MissingVar(key.to_string())),
        }
    }
}

const MATCH_CASE_INSENSITIVE: &str = "CONCERT_MATCH_CASE_INSENSITIVE";

/// Where the program finds its local inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub tools_dir: PathBuf,
    pub concert_data: PathBuf,
    pub name_matching: NameMatching,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tools_dir: PathBuf::from("."),
            concert_data: PathBuf::from("concert_data.csv"),
            name_matching: NameMatching::AsGiven,
        }
    }
}

impl EnvConfig for AppConfig {
    fn from_source<F>(source: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let tools_dir = Self::get_env(&source, "TOOLS_DIR", false, None)?
            .map(PathBuf::from)
            .unwrap_or(defaults.tools_dir);

        let concert_data = Self::get_env(&source, "CONCERT_DATA_PATH", false, None)?
            .map(PathBuf::from)
            .unwrap_or(defaults.concert_data);

        let name_matching = match Self::get_env(&source, MATCH_CASE_INSENSITIVE, false, None)? {
            None => defaults.name_matching,
            Some(flag) => match flag.trim().to_lowercase() {
                normalized if normalized == "true" => NameMatching::CaseInsensitive,
                normalized if normalized == "false" => NameMatching::AsGiven,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: MATCH_CASE_INSENSITIVE.to_string(),
                        value: flag,
                    })
                }
            },
        };

        Ok(Self {
            tools_dir,
            concert_data,
            name_matching,
        })
    }
}
