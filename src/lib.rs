//! # OAuth Token Cache
//!
//! Issues OAuth 2.0 client-credentials tokens and caches them in a shared
//! key-value store keyed by client identity, so callers reuse a live token
//! instead of calling the token endpoint again.
//!
//! Modules:
//! - `cache` — the `Token` value object, its field-map codec and the store backends
//! - `client` — `TokenClient`: fetch fresh, read cached, write cached
//! - `config` — client and service configuration, YAML loading and validation
//! - `error` — error taxonomy surfaced to callers
//! - `utils` — logging setup and shared constants

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub use crate::cache::{MemoryStore, RedisStore, StoreError, Token, TokenStore};
pub use crate::client::TokenClient;
pub use crate::config::client::TokenClientConfig;
pub use crate::error::{Error, Result};
