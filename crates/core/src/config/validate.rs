use reqwest::Url;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Metadata API key is set
/// - Upstream base URLs are absolute http(s) URLs
/// - Timeouts and result limits are positive
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.metadata.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "metadata.api_key cannot be empty".to_string(),
        ));
    }

    validate_url("metadata.base_url", &config.metadata.base_url)?;
    validate_url("release_index.base_url", &config.release_index.base_url)?;

    if config.metadata.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "metadata.timeout_secs cannot be 0".to_string(),
        ));
    }
    if config.release_index.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "release_index.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.torznab.max_results == 0 {
        return Err(ConfigError::ValidationError(
            "torznab.max_results cannot be 0".to_string(),
        ));
    }

    Ok(())
}

fn validate_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::ValidationError(format!("{} is not a valid URL: {}", field, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::ValidationError(format!(
            "{} must use http or https, got {}",
            field, other
        ))),
    }
}
