use std::fmt;
use std::str::FromStr;

use config::{Config, Environment};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::providers::configs::{
    OpenAiProviderConfig, OPENAI_COMPATIBLE_HOST, OPENAI_COMPATIBLE_MODEL,
};
use crate::weather::{WeatherConfig, OPENWEATHER_HOST};

pub const ENV_PREFIX: &str = "BREEZE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {env_var}")]
    MissingEnvVar { env_var: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// Map a dotted settings path such as `provider.api_key` to its environment variable
pub fn to_env_var(field: &str) -> String {
    let path = field
        .split('.')
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join("__");
    format!("{}_{}", ENV_PREFIX, path)
}

/// Which dispatcher answers questions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// A completion model that may call the weather tool
    #[default]
    Model,
    /// Fixed keyword rules, no completion model
    Keyword,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "model" => Ok(Strategy::Model),
            "keyword" => Ok(Strategy::Keyword),
            other => Err(format!(
                "unknown strategy '{}', expected 'model' or 'keyword'",
                other
            )),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Model => write!(f, "model"),
            Strategy::Keyword => write!(f, "keyword"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub host: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            host: OPENAI_COMPATIBLE_HOST.to_string(),
            api_key: None,
            model: OPENAI_COMPATIBLE_MODEL.to_string(),
            temperature: None,
            max_tokens: None,
        }
    }
}

impl ProviderSettings {
    pub fn into_config(self) -> Result<OpenAiProviderConfig, ConfigError> {
        Ok(OpenAiProviderConfig {
            host: self.host,
            api_key: required(self.api_key, "provider.api_key")?,
            model: self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    pub host: String,
    pub api_key: Option<String>,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            host: OPENWEATHER_HOST.to_string(),
            api_key: None,
        }
    }
}

impl WeatherSettings {
    pub fn into_config(self) -> Result<WeatherConfig, ConfigError> {
        Ok(WeatherConfig {
            host: self.host,
            api_key: required(self.api_key, "weather.api_key")?,
        })
    }
}

/// Everything needed to build a responder. Keys are only checked for the
/// strategy actually built, so the keyword strategy runs without a provider key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentSettings {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub weather: WeatherSettings,
}

impl AgentSettings {
    pub fn new() -> Result<Self, ConfigError> {
        load()
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, ConfigError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar {
            env_var: to_env_var(field),
        }),
    }
}

/// Deserialize settings from the `BREEZE_` environment variables
pub fn load<T: DeserializeOwned>() -> Result<T, ConfigError> {
    let config = Config::builder()
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    match config.try_deserialize() {
        Ok(settings) => Ok(settings),
        Err(err) => {
            tracing::debug!("Configuration error: {:?}", &err);

            let error_str = err.to_string();
            if error_str.starts_with("missing field") {
                // "missing field `api_key`"
                let field = error_str
                    .trim_start_matches("missing field `")
                    .trim_end_matches('`');
                Err(ConfigError::MissingEnvVar {
                    env_var: to_env_var(field),
                })
            } else if let config::ConfigError::NotFound(field) = &err {
                Err(ConfigError::MissingEnvVar {
                    env_var: to_env_var(field),
                })
            } else {
                Err(ConfigError::Other(err))
            }
        }
    }
}
