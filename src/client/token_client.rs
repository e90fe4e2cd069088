use std::sync::Arc;

use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::{debug, info};

use crate::cache::store::TokenStore;
use crate::cache::token::Token;
use crate::client::wire::{parse_token_response, ClientCredentialsGrant};
use crate::config::client::TokenClientConfig;
use crate::error::{Error, Result};

/// Issues client-credentials tokens and keeps them in a shared [`TokenStore`].
///
/// The store handle is shared with the caller; the client never closes it.
/// Nothing here retries or deduplicates requests: two callers missing the
/// cache at the same time both hit the token endpoint, and the last write wins.
#[derive(Debug)]
pub struct TokenClient<S> {
    config: TokenClientConfig,
    store: Arc<S>,
    http: Client,
}

impl<S> Clone for TokenClient<S> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            store: Arc::clone(&self.store),
            http: self.http.clone(),
        }
    }
}

impl<S: TokenStore> TokenClient<S> {
    /// Build a client whose HTTP requests never follow redirects and are
    /// bounded by `config.timeout`.
    pub fn new(config: TokenClientConfig, store: Arc<S>) -> Result<Self> {
        let http = Client::builder()
            .redirect(Policy::none())
            .timeout(config.timeout)
            .build()
            .map_err(Error::Network)?;

        Ok(Self { config, store, http })
    }

    pub fn config(&self) -> &TokenClientConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// See [`TokenClientConfig::cache_key`].
    pub fn cache_key(&self) -> String {
        self.config.cache_key()
    }

    /// Request a new token from the token endpoint and write it to the cache.
    pub async fn fresh_token(&self) -> Result<Token> {
        let grant = ClientCredentialsGrant::new(
            &self.config.client_id,
            &self.config.client_secret,
            &self.config.audience,
        );

        let response = self
            .http
            .post(&self.config.token_url)
            .json(&grant)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        let body = response.text().await.map_err(|err| self.transport_error(err))?;
        if !status.is_success() {
            return Err(Error::HttpStatus { status, body });
        }

        let token = parse_token_response(&body, &self.config.audience)?;
        info!(
            client_id = %self.config.client_id,
            audience = %self.config.audience,
            expires_in = token.expires_in(),
            "issued fresh token"
        );

        self.cache_token(token).await
    }

    /// Read the cached token, `None` on a cache miss.
    pub async fn cached_token(&self) -> Result<Option<Token>> {
        let key = self.cache_key();
        let fields = match self.store.get_all_fields(&key).await? {
            Some(fields) if !fields.is_empty() => fields,
            _ => {
                debug!(cache_key = %key, "token cache miss");
                return Ok(None);
            }
        };

        let token = Token::from_field_map(&fields)?;
        debug!(cache_key = %key, "token cache hit");
        Ok(Some(token))
    }

    /// Store `token` under the cache key with a TTL of `token.expires_in()`
    /// and hand it back unchanged.
    pub async fn cache_token(&self, token: Token) -> Result<Token> {
        let key = self.cache_key();
        self.store
            .set_fields_with_expiry(&key, token.to_field_map(), token.expires_in())
            .await?;

        debug!(cache_key = %key, ttl_seconds = token.expires_in(), "token cached");
        Ok(token)
    }

    /// Cached token if present, otherwise a fresh one.
    pub async fn token(&self) -> Result<Token> {
        match self.cached_token().await? {
            Some(token) => Ok(token),
            None => self.fresh_token().await,
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                url: self.config.token_url.to_owned(),
                timeout: self.config.timeout,
            }
        } else {
            Error::Network(err)
        }
    }
}
