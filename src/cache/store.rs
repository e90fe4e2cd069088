use std::collections::HashMap;
use std::future::Future;

use thiserror::Error;

use crate::utils::constants::MAX_TTL_SECONDS;

/// Hash-map style key-value store holding cached tokens.
///
/// Any store that can read every field of a key and write fields together
/// with a key expiry as one atomic unit can back a
/// [`TokenClient`](crate::client::token_client::TokenClient).
pub trait TokenStore: Send + Sync {
    /// All fields stored under `key`, or `None` when the key is absent or empty.
    fn get_all_fields(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<HashMap<String, String>>, StoreError>> + Send;

    /// Set `fields` under `key` and expire the key after `ttl_seconds`.
    /// Both writes apply together or not at all.
    fn set_fields_with_expiry(
        &self,
        key: &str,
        fields: HashMap<String, String>,
        ttl_seconds: u64,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache store unavailable: {0}")]
    Unavailable(String),

    /// Rejected before anything is written.
    #[error("ttl of {0} seconds exceeds the largest expiry the store accepts")]
    InvalidTtl(u64),

    #[error(transparent)]
    Redis(#[from] redis::RedisError),
}

/// Check a TTL against the store expiry limit before any write is queued.
pub fn checked_ttl(ttl_seconds: u64) -> Result<i64, StoreError> {
    if ttl_seconds > MAX_TTL_SECONDS {
        return Err(StoreError::InvalidTtl(ttl_seconds));
    }
    Ok(ttl_seconds as i64)
}
