use std::collections::HashMap;
use std::fmt;

use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Pipeline};
use tracing::debug;

use crate::cache::store::{checked_ttl, StoreError, TokenStore};

/// Token store backed by a Redis hash per cache key.
///
/// Writes go through a `MULTI`/`EXEC` pipeline so the fields and the key
/// expiry land in one round trip. Connection timeouts and reconnects follow
/// the `redis` client defaults.
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
}

impl RedisStore {
    /// Open a multiplexed connection to `url`, e.g. `redis://127.0.0.1:6379/0`
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let connection = client.get_multiplexed_async_connection().await?;
        debug!("connected to redis token store");
        Ok(Self { connection })
    }

    pub fn from_connection(connection: MultiplexedConnection) -> Self {
        Self { connection }
    }
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

impl TokenStore for RedisStore {
    async fn get_all_fields(&self, key: &str) -> Result<Option<HashMap<String, String>>, StoreError> {
        let mut connection = self.connection.clone();
        let fields: HashMap<String, String> = connection.hgetall(key).await?;
        Ok(non_empty(fields))
    }

    async fn set_fields_with_expiry(
        &self,
        key: &str,
        fields: HashMap<String, String>,
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        let pipeline = write_pipeline(key, fields, ttl_seconds)?;
        let mut connection = self.connection.clone();
        let () = pipeline.query_async(&mut connection).await?;
        Ok(())
    }
}

/// `HGETALL` answers an empty map for a missing key
fn non_empty(fields: HashMap<String, String>) -> Option<HashMap<String, String>> {
    Some(fields).filter(|fields| !fields.is_empty())
}

/// `MULTI` / `HMSET key fields..` / `EXPIRE key ttl` / `EXEC`.
///
/// The TTL is checked up front: Redis only rejects an out-of-range `EXPIRE`
/// at `EXEC`, after the fields were already set.
fn write_pipeline(
    key: &str,
    fields: HashMap<String, String>,
    ttl_seconds: u64,
) -> Result<Pipeline, StoreError> {
    let seconds = checked_ttl(ttl_seconds)?;
    let mut items: Vec<(String, String)> = fields.into_iter().collect();
    items.sort();

    let mut pipeline = redis::pipe();
    pipeline
        .atomic()
        .hset_multiple(key, &items[..])
        .ignore()
        .expire(key, seconds)
        .ignore();
    Ok(pipeline)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cache::token::Token;
    use crate::utils::constants::MAX_TTL_SECONDS;

    const KEY: &str = "oauth_token_cache__client-1_svcA";

    fn packed(token: &Token) -> String {
        let pipeline = write_pipeline(KEY, token.to_field_map(), token.expires_in()).unwrap();
        String::from_utf8(pipeline.get_packed_pipeline()).unwrap()
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} missing from {haystack:?}"))
    }

    #[test]
    fn write_is_one_transaction_setting_fields_then_expiry() {
        let token = Token::new("abc", 3600, "Bearer", "svcA");
        let packed = packed(&token);

        let multi = position(&packed, "MULTI");
        let hmset = position(&packed, "HMSET");
        let expire = position(&packed, "EXPIRE");
        let exec = position(&packed, "EXEC");
        assert!(multi < hmset && hmset < expire && expire < exec, "{packed:?}");

        let hash = &packed[hmset..expire];
        for (field, value) in token.to_field_map() {
            assert!(hash.contains(&format!("\r\n{}\r\n", field)), "{field} missing");
            assert!(hash.contains(&format!("\r\n{}\r\n", value)), "{value} missing");
        }
        assert!(packed[expire..exec].ends_with(&format!("{}\r\n$4\r\n3600\r\n*1\r\n$4\r\n", KEY)));
    }

    #[test]
    fn out_of_range_ttl_queues_nothing() {
        let fields = Token::new("abc", 0, "Bearer", "svcA").to_field_map();

        let err = write_pipeline(KEY, fields.clone(), 10_000_000_000_000_000).err().unwrap();
        assert!(matches!(err, StoreError::InvalidTtl(10_000_000_000_000_000)), "{err:?}");
        assert!(write_pipeline(KEY, fields.clone(), u64::MAX).is_err());
        assert!(write_pipeline(KEY, fields, MAX_TTL_SECONDS).is_ok());
    }

    #[test]
    fn empty_hgetall_is_a_miss() {
        assert_eq!(non_empty(HashMap::new()), None);

        let fields = HashMap::from([("access_token".to_owned(), "abc".to_owned())]);
        assert_eq!(non_empty(fields.clone()), Some(fields));
    }
}
