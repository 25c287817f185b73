mod env_overrides;
mod loader;
#[cfg(test)]
mod test_env;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

pub const DEFAULT_TEMPERATURE: f64 = 0.9;
pub const DEFAULT_MAX_RESPONSE_TRIES: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory - resolved from `data_dir` or home, not serialized
    #[serde(skip)]
    pub workspace_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub telegram_api_token: String,
    #[serde(default)]
    pub deepl_api_token: Option<String>,
    #[serde(default)]
    pub deepgram_api_token: Option<String>,

    /// Optional override for where sessions, logs and lists are stored.
    #[serde(default)]
    pub data_dir: Option<String>,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub reliability: ReliabilityConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace_dir: PathBuf::new(),
            config_path: PathBuf::new(),
            telegram_api_token: String::new(),
            deepl_api_token: None,
            deepgram_api_token: None,
            data_dir: None,
            backend: BackendConfig::default(),
            telegram: TelegramConfig::default(),
            reliability: ReliabilityConfig::default(),
        }
    }
}

impl Config {
    pub fn deepl_token(&self) -> Option<&str> {
        non_empty(self.deepl_api_token.as_deref())
    }

    pub fn deepgram_token(&self) -> Option<&str> {
        non_empty(self.deepgram_api_token.as_deref())
    }

    pub fn telegram_token(&self) -> Result<&str, ConfigError> {
        non_empty(Some(self.telegram_api_token.as_str())).ok_or(ConfigError::Missing(
            "telegram_api_token (create a bot with @BotFather)",
        ))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let temp = self.backend.default_temperature;
        if !(temp > 0.0 && temp <= 1.0) {
            return Err(ConfigError::Validation(format!(
                "backend.default_temperature must be within (0, 1], got {temp}"
            )));
        }
        if self.backend.max_response_tries == 0 {
            return Err(ConfigError::Validation(
                "backend.max_response_tries must be at least 1".into(),
            ));
        }
        if self.telegram.max_message_chars == 0 {
            return Err(ConfigError::Validation(
                "telegram.max_message_chars must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_base_url")]
    pub base_url: String,
    /// Model to pin new conversations to; the backend default when unset.
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_max_response_tries")]
    pub max_response_tries: u32,
    #[serde(default = "default_temperature")]
    pub default_temperature: f64,
}

fn default_backend_base_url() -> String {
    "https://huggingface.co/chat".into()
}

fn default_max_response_tries() -> u32 {
    DEFAULT_MAX_RESPONSE_TRIES
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_base_url(),
            model: None,
            max_response_tries: default_max_response_tries(),
            default_temperature: default_temperature(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
    /// Replies longer than this are split into several messages.
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".into()
}

fn default_max_message_chars() -> usize {
    3500
}

fn default_poll_timeout_secs() -> u64 {
    30
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: default_telegram_api_base(),
            max_message_chars: default_max_message_chars(),
            poll_timeout_secs: default_poll_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReliabilityConfig {
    #[serde(default = "default_channel_backoff_secs")]
    pub channel_initial_backoff_secs: u64,
    #[serde(default = "default_channel_backoff_max_secs")]
    pub channel_max_backoff_secs: u64,
}

fn default_channel_backoff_secs() -> u64 {
    2
}

fn default_channel_backoff_max_secs() -> u64 {
    60
}

impl Default for ReliabilityConfig {
    fn default() -> Self {
        Self {
            channel_initial_backoff_secs: default_channel_backoff_secs(),
            channel_max_backoff_secs: default_channel_backoff_max_secs(),
        }
    }
}
