//! Configuration management for the boardroom server.
//!
//! Configuration can be set via environment variables:
//! - `GROQ_API_KEY` - Required. API key for the completion provider.
//! - `LLM_BASE_URL` - Optional. OpenAI-compatible base URL. Defaults to Groq.
//! - `BOARDROOM_MODELS` - Optional. Comma-separated model fallback chain.
//! - `BOARDROOM_TEMPERATURE` - Optional. Sampling temperature. Defaults to `0.7`.
//! - `BOARDROOM_MAX_TOKENS` - Optional. Output token cap per agent turn. Defaults to `400`.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Models tried in order until one accepts the request.
pub const DEFAULT_MODELS: [&str; 3] = [
    "openai/gpt-oss-20b",
    "llama3-70b-8192",
    "mixtral-8x7b-32768",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Sampling parameters shared by every agent turn.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_tokens: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 400,
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Completion API key
    pub api_key: String,

    /// OpenAI-compatible base URL (without `/chat/completions`)
    pub base_url: String,

    /// Ordered model fallback chain, never empty
    pub models: Vec<String>,

    pub generation: GenerationConfig,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `GROQ_API_KEY` is not set, and
    /// `ConfigError::InvalidValue` for unparsable numbers or an empty model list.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("GROQ_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("GROQ_API_KEY".to_string()))?;

        let base_url = lookup("LLM_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let models = match lookup("BOARDROOM_MODELS") {
            Some(raw) => parse_model_list(&raw)?,
            None => DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        };

        let defaults = GenerationConfig::default();
        let temperature = parse_or(
            "BOARDROOM_TEMPERATURE",
            lookup("BOARDROOM_TEMPERATURE"),
            defaults.temperature,
        )?;
        let max_tokens = parse_or(
            "BOARDROOM_MAX_TOKENS",
            lookup("BOARDROOM_MAX_TOKENS"),
            defaults.max_tokens,
        )?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or("PORT", lookup("PORT"), 3000u16)?;

        Ok(Self {
            api_key,
            base_url,
            models,
            generation: GenerationConfig {
                temperature,
                max_tokens,
            },
            host,
            port,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            generation: GenerationConfig::default(),
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_model_list(raw: &str) -> Result<Vec<String>, ConfigError> {
    let models: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect();
    if models.is_empty() {
        return Err(ConfigError::InvalidValue(
            "BOARDROOM_MODELS".to_string(),
            "at least one model is required".to_string(),
        ));
    }
    Ok(models)
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = Config::from_lookup(lookup_from(&[("GROQ_API_KEY", "gsk_test")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.models, DEFAULT_MODELS.to_vec());
        assert_eq!(config.generation, GenerationConfig::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "GROQ_API_KEY"));

        let err = Config::from_lookup(lookup_from(&[("GROQ_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn model_chain_is_trimmed_and_ordered() {
        let config = Config::from_lookup(lookup_from(&[
            ("GROQ_API_KEY", "k"),
            ("BOARDROOM_MODELS", " a , ,b,c "),
            ("LLM_BASE_URL", "http://localhost:9000/v1/"),
        ]))
        .unwrap();
        assert_eq!(config.models, vec!["a", "b", "c"]);
        assert_eq!(config.base_url, "http://localhost:9000/v1");
    }

    #[test]
    fn empty_model_chain_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("GROQ_API_KEY", "k"),
            ("BOARDROOM_MODELS", " , "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v, _) if v == "BOARDROOM_MODELS"));
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[("GROQ_API_KEY", "k"), ("PORT", "http")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v, _) if v == "PORT"));

        let err = Config::from_lookup(lookup_from(&[
            ("GROQ_API_KEY", "k"),
            ("BOARDROOM_TEMPERATURE", "warm"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v, _) if v == "BOARDROOM_TEMPERATURE"));
    }
}
