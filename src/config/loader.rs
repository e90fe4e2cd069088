use std::path::Path;

use anyhow::{anyhow, Context, Result};
use regex::{Captures, Regex};
use tracing::debug;

use crate::config::settings::{LoggingConfig, ServiceConfig};
use crate::config::validator::validate_service_config;

/// Load and validate config from YAML file
pub async fn file_to_config(path: &Path) -> Result<ServiceConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("cannot read config file {}", path.display()))?;

    parse_config(&expand_env_vars(&content)?)
}

/// Parse YAML content, apply defaults, and validate
pub fn parse_config(content: &str) -> Result<ServiceConfig> {
    let mut service_config: ServiceConfig =
        serde_yaml::from_str(content).map_err(|e| anyhow!("Invalid config format: {}", e))?;

    // Apply defaults
    if service_config.logging.is_none() {
        service_config.logging = Some(LoggingConfig::default());
    }

    debug!("validating config ...");
    validate_service_config(&service_config)
        .map_err(|errors| anyhow!("config is not valid: {}", errors.join("; ")))?;

    Ok(service_config)
}

/// Replace `${VAR}` and `${VAR:default}` with environment values.
/// Unset variables without a default expand to an empty string.
pub fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]*))?\}")?;
    let expanded = re.replace_all(input, |caps: &Captures| {
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(&caps[1]).unwrap_or_else(|_| default.to_string())
    });
    Ok(expanded.into_owned())
}
