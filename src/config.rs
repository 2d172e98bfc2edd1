use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_PATH: &str = "/api/analyze";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_cors")]
    pub cors: bool,
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointConfig {
    pub path: String,
    pub model: String,
}

/// What one relay endpoint needs at request time. Built once at startup.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub model_id: String,
    pub api_key: Option<String>,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: default_api_base(),
            cors: default_cors(),
            endpoints: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path))?;
        Ok(config)
    }

    /// Loads the optional config file and fills in the single default endpoint when none is listed.
    pub fn load(path: Option<&str>, default_model: &str) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if config.endpoints.is_empty() {
            config.endpoints.push(EndpointConfig {
                path: DEFAULT_PATH.to_string(),
                model: default_model.to_string(),
            });
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_base.trim().is_empty() {
            bail!("api_base must not be empty");
        }
        if self.endpoints.is_empty() {
            bail!("at least one endpoint must be configured");
        }
        let mut seen = HashSet::new();
        for endpoint in &self.endpoints {
            if !endpoint.path.starts_with('/') {
                bail!("endpoint path '{}' must start with '/'", endpoint.path);
            }
            if endpoint.model.trim().is_empty() {
                bail!("endpoint '{}' has an empty model", endpoint.path);
            }
            if !seen.insert(endpoint.path.as_str()) {
                bail!("endpoint path '{}' is configured twice", endpoint.path);
            }
        }
        Ok(())
    }
}

impl RelayConfig {
    pub fn for_endpoint(endpoint: &EndpointConfig, api_key: Option<String>) -> Self {
        RelayConfig { model_id: endpoint.model.clone(), api_key }
    }
}

/// Reads the upstream credential. Blank values count as unset.
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}
