//! Engine configuration read from the environment.
//!
//! `.env` files are loaded by `main` before `EngineConfig::from_env` runs, so
//! every value here can come from either the process environment or a dotenv
//! file.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 3001;
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-sonnet-20240229";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";
pub const DEFAULT_LLM_MAX_RETRIES: u32 = 3;
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_RESOLVE_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a number, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("Invalid server address {0}")]
    InvalidAddress(String),
}

/// Connection details for one LLM provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub model: String,
    /// Absent for local providers such as Ollama
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    /// Allowed CORS origin
    pub frontend_url: String,
    pub openai: Option<ProviderConfig>,
    pub anthropic: Option<ProviderConfig>,
    pub ollama: Option<ProviderConfig>,
    pub llm_max_retries: u32,
    pub llm_timeout: Duration,
    /// Default per-directive bound for a substitution pass
    pub resolve_timeout: Duration,
    /// Optional JSON file that replaces the built-in catalog
    pub catalog_path: Option<PathBuf>,
    /// When set, generation is delegated to this remote backend instead of
    /// calling providers directly
    pub generation_backend_url: Option<String>,
}

impl EngineConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let server_port = match get("SERVER_PORT").or_else(|| get("PORT")) {
            Some(raw) => parse_number("SERVER_PORT", &raw)?,
            None => DEFAULT_SERVER_PORT,
        };

        let openai = get("OPENAI_API_KEY").map(|key| ProviderConfig {
            base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into()),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into()),
            api_key: Some(key),
        });

        let anthropic = get("ANTHROPIC_API_KEY").map(|key| ProviderConfig {
            base_url: get("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE_URL.into()),
            model: get("ANTHROPIC_MODEL").unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.into()),
            api_key: Some(key),
        });

        let ollama = get("OLLAMA_BASE_URL").map(|base_url| ProviderConfig {
            base_url,
            model: get("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.into()),
            api_key: None,
        });

        let llm_max_retries = match get("LLM_MAX_RETRIES") {
            Some(raw) => parse_number("LLM_MAX_RETRIES", &raw)?,
            None => DEFAULT_LLM_MAX_RETRIES,
        };
        let llm_timeout_secs: u64 = match get("LLM_TIMEOUT_SECS") {
            Some(raw) => parse_number("LLM_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };
        let resolve_timeout_ms: u64 = match get("RESOLVE_TIMEOUT_MS") {
            Some(raw) => parse_number("RESOLVE_TIMEOUT_MS", &raw)?,
            None => DEFAULT_RESOLVE_TIMEOUT_MS,
        };

        Ok(Self {
            server_host: get("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.into()),
            server_port,
            frontend_url: get("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.into()),
            openai,
            anthropic,
            ollama,
            llm_max_retries,
            llm_timeout: Duration::from_secs(llm_timeout_secs),
            resolve_timeout: Duration::from_millis(resolve_timeout_ms),
            catalog_path: get("CATALOG_PATH").map(PathBuf::from),
            generation_backend_url: get("GENERATION_BACKEND_URL"),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.server_host, self.server_port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }

    /// Names of the providers that have credentials (or a URL, for Ollama).
    pub fn configured_providers(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.openai.is_some() {
            names.push("openai");
        }
        if self.anthropic.is_some() {
            names.push("anthropic");
        }
        if self.ollama.is_some() {
            names.push("ollama");
        }
        names
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: raw.to_string(),
    })
}

/// Build a lookup over a fixed set of pairs.
#[cfg(test)]
pub fn lookup_from_pairs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}
