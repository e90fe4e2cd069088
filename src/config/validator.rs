//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Checks client credentials, token endpoint URL, timeout, cache URL and logging

use crate::config::client::TokenClientConfig;
use crate::config::settings::{CacheConfig, LoggingConfig, ServiceConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_client(&cfg.client, &mut errors);
    validate_cache(&cfg.cache, &mut errors);
    if let Some(logging) = &cfg.logging {
        validate_logging(logging, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_client(client: &TokenClientConfig, errors: &mut Vec<String>) {
    for (name, value) in [
        ("client_id", &client.client_id),
        ("client_secret", &client.client_secret),
        ("audience", &client.audience),
    ] {
        if value.trim().is_empty() {
            errors.push(format!("client.{} must not be empty", name));
        }
    }

    if !(client.token_url.starts_with("http://") || client.token_url.starts_with("https://")) {
        errors.push(format!(
            "client.token_url '{}' must be an http(s) URL",
            client.token_url
        ));
    }

    if client.timeout.is_zero() {
        errors.push("client.timeout must be greater than 0".to_string());
    }
}

fn validate_cache(cache: &CacheConfig, errors: &mut Vec<String>) {
    if !(cache.url.starts_with("redis://")
        || cache.url.starts_with("rediss://")
        || cache.url.starts_with("redis+unix://"))
    {
        errors.push(format!(
            "cache.url '{}' must use the redis://, rediss:// or redis+unix:// scheme",
            cache.url
        ));
    }
}

fn validate_logging(logging: &LoggingConfig, errors: &mut Vec<String>) {
    if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
        errors.push(format!(
            "logging.level '{}' must be one of {:?}",
            logging.level, LOG_LEVELS
        ));
    }
}
