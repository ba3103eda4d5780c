//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// GraphQL endpoint URL override.
pub const SUBGRAPH_URL_ENV_VAR: &str = "DAPP_SUBGRAPH_URL";
/// GraphQL API token override.
pub const GRAPH_API_KEY_ENV_VAR: &str = "DAPP_GRAPH_API_KEY";
/// Target chain ID override (decimal).
pub const CHAIN_ENV_VAR: &str = "DAPP_CHAIN";
/// Wallet provider RPC URL override.
pub const PROVIDER_RPC_URL_ENV_VAR: &str = "DAPP_PROVIDER_RPC_URL";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, value } => {
                write!(f, "Invalid value '{}' for environment variable {}", value, var)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration once at startup: file (or defaults), then process
/// environment overrides, then validation.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_with_env(path, |var| std::env::var(var).ok())
}

/// Same as [`load`] with an explicit environment lookup.
pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(
        endpoint_url = %config.data.endpoint_url,
        has_api_token = config.data.api_token.is_some(),
        chain_id = config.network.chain_id,
        "Configuration loaded"
    );

    Ok(config)
}

/// Apply `DAPP_*` overrides. Unset or empty variables leave the value alone.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(url) = get(SUBGRAPH_URL_ENV_VAR) {
        config.data.endpoint_url = url;
    }
    if let Some(token) = get(GRAPH_API_KEY_ENV_VAR) {
        config.data.api_token = Some(token);
    }
    if let Some(chain) = get(CHAIN_ENV_VAR) {
        config.network.chain_id = chain.trim().parse().map_err(|_| ConfigError::Env {
            var: CHAIN_ENV_VAR,
            value: chain.clone(),
        })?;
    }
    if let Some(url) = get(PROVIDER_RPC_URL_ENV_VAR) {
        config.provider.rpc_url = url;
    }

    Ok(())
}
