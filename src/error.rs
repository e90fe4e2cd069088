use std::time::Duration;

use http::StatusCode;
use thiserror::Error;

use crate::cache::store::StoreError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures surfaced by [`crate::client::token_client::TokenClient`].
///
/// Nothing is retried or logged internally; the caller owns the retry policy.
#[derive(Debug, Error)]
pub enum Error {
    /// The token request did not complete within the configured timeout.
    #[error("token request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// The token request could not be completed (connect, TLS, body read).
    #[error("token request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// The token endpoint answered with a non-success status. Redirects are
    /// never followed and land here too.
    #[error("token endpoint responded with {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    /// A success response that is not JSON or lacks the expected fields.
    #[error("unexpected token endpoint response: {0}")]
    ResponseFormat(String),

    #[error("cache store error: {0}")]
    CacheConnectivity(#[from] StoreError),

    /// Cached fields that cannot be decoded back into a token.
    #[error("malformed cached token: {0}")]
    CacheFormat(String),
}

impl Error {
    /// HTTP status of the token endpoint response, if the error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }
}
