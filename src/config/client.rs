use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::utils::constants::{CACHE_KEY_PREFIX, DEFAULT_HTTP_TIMEOUT_SECS};

/// ================================
/// Token client configuration
/// ================================
///
/// Exactly the options a [`TokenClient`](crate::client::token_client::TokenClient)
/// recognizes. Unknown keys are rejected when loaded from YAML.
#[derive(Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TokenClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    /// API / resource the issued token is meant for
    pub audience: String,
    /// token request timeout, in (fractional) seconds
    #[serde(default = "default_timeout", deserialize_with = "deserialize_timeout")]
    pub timeout: Duration,
}

impl TokenClientConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_url: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: token_url.into(),
            audience: audience.into(),
            timeout: default_timeout(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `oauth_token_cache__{client_id}_{audience}`
    ///
    /// Values are interpolated as-is; ids or audiences containing `_` can make
    /// two distinct pairs share a key.
    pub fn cache_key(&self) -> String {
        format!("{}{}_{}", CACHE_KEY_PREFIX, self.client_id, self.audience)
    }
}

impl fmt::Debug for TokenClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_url", &self.token_url)
            .field("audience", &self.audience)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)
}

fn deserialize_timeout<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(seconds)
        .map_err(|err| serde::de::Error::custom(format!("invalid timeout {}: {}", seconds, err)))
}
