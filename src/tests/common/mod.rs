// tests/common/mod.rs
use std::sync::Arc;
use std::time::Duration;

use httpmock::MockServer;

use crate::cache::memory_store::MemoryStore;
use crate::client::token_client::TokenClient;
use crate::config::client::TokenClientConfig;

pub const CLIENT_ID: &str = "client-1";
pub const CLIENT_SECRET: &str = "secret-1";
pub const AUDIENCE: &str = "svcA";
pub const TOKEN_PATH: &str = "/oauth/token";
pub const CACHE_KEY: &str = "oauth_token_cache__client-1_svcA";

pub fn client_config(server: &MockServer) -> TokenClientConfig {
    TokenClientConfig::new(CLIENT_ID, CLIENT_SECRET, server.url(TOKEN_PATH), AUDIENCE)
        .with_timeout(Duration::from_secs(2))
}

/// Token client against `server` backed by a fresh in-memory store
pub fn build_client(server: &MockServer) -> (TokenClient<MemoryStore>, MemoryStore) {
    build_client_with(client_config(server))
}

pub fn build_client_with(config: TokenClientConfig) -> (TokenClient<MemoryStore>, MemoryStore) {
    let store = MemoryStore::new();
    let client = TokenClient::new(config, Arc::new(store.clone())).expect("token client");
    (client, store)
}
