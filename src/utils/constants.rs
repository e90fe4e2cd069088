//! Shared constants and invariants

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 5;

/// Cache keys have the form `oauth_token_cache__{client_id}_{audience}`
pub const CACHE_KEY_PREFIX: &str = "oauth_token_cache__";

pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

// Field names of a cached token hash
pub const FIELD_ACCESS_TOKEN: &str = "access_token";
pub const FIELD_EXPIRES_IN: &str = "expires_in";
pub const FIELD_TOKEN_TYPE: &str = "token_type";
pub const FIELD_AUDIENCE: &str = "audience";

/// Largest key expiry Redis accepts, in seconds (`LLONG_MAX / 1000`)
pub const MAX_TTL_SECONDS: u64 = (i64::MAX / 1000) as u64;
