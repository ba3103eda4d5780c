//! Configuration validation.
//!
//! Serde handles the syntax; this checks the values. All errors are
//! collected rather than stopping at the first one.

use std::fmt;

use crate::config::schema::AppConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `network.chain_id`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.data.endpoint_url.trim().is_empty() {
        errors.push(ValidationError::new("data.endpoint_url", "must not be empty"));
    } else if url::Url::parse(&config.data.endpoint_url).is_err() {
        errors.push(ValidationError::new(
            "data.endpoint_url",
            format!("'{}' is not a valid URL", config.data.endpoint_url),
        ));
    }

    if let Some(token) = &config.data.api_token {
        if token.trim().is_empty() {
            errors.push(ValidationError::new(
                "data.api_token",
                "must be omitted rather than empty",
            ));
        }
    }

    if config.data.request_timeout_secs == 0 {
        errors.push(ValidationError::new("data.request_timeout_secs", "must be > 0"));
    }

    let network = &config.network;
    if network.chain_id == 0 {
        errors.push(ValidationError::new("network.chain_id", "must be > 0"));
    }
    if network.chain_name.trim().is_empty() {
        errors.push(ValidationError::new("network.chain_name", "must not be empty"));
    }
    if network.rpc_urls.is_empty() {
        errors.push(ValidationError::new("network.rpc_urls", "at least one RPC URL is required"));
    }
    for url in network.rpc_urls.iter().chain(&network.block_explorer_urls) {
        if url::Url::parse(url).is_err() {
            errors.push(ValidationError::new("network", format!("'{}' is not a valid URL", url)));
        }
    }

    if !config.provider.rpc_url.is_empty() && url::Url::parse(&config.provider.rpc_url).is_err() {
        errors.push(ValidationError::new(
            "provider.rpc_url",
            format!("'{}' is not a valid URL", config.provider.rpc_url),
        ));
    }
    if config.provider.poll_interval_ms == 0 || config.provider.receipt_poll_interval_ms == 0 {
        errors.push(ValidationError::new("provider", "poll intervals must be > 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
