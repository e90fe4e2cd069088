use serde::{Deserialize, Serialize};

use crate::cache::token::{parse_expires_in, Token};
use crate::error::{Error, Result};
use crate::utils::constants::{GRANT_TYPE_CLIENT_CREDENTIALS, MAX_TTL_SECONDS};

/// JSON body of a client-credentials token request
#[derive(Debug, Serialize)]
pub(crate) struct ClientCredentialsGrant<'a> {
    pub grant_type: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub audience: &'a str,
}

impl<'a> ClientCredentialsGrant<'a> {
    pub fn new(client_id: &'a str, client_secret: &'a str, audience: &'a str) -> Self {
        Self {
            grant_type: GRANT_TYPE_CLIENT_CREDENTIALS,
            client_id,
            client_secret,
            audience,
        }
    }
}

/// Fields read from a successful token endpoint response; the rest is ignored.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: ExpiresIn,
    token_type: String,
}

/// Providers send `expires_in` as a number or as a decimal string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExpiresIn {
    Seconds(u64),
    Float(f64),
    Text(String),
}

impl ExpiresIn {
    fn seconds(&self) -> std::result::Result<u64, String> {
        match self {
            ExpiresIn::Seconds(seconds) => Ok(*seconds),
            ExpiresIn::Float(value) if *value >= 0.0 && value.fract() == 0.0 && *value <= u64::MAX as f64 => {
                Ok(*value as u64)
            }
            ExpiresIn::Float(value) => Err(format!("expires_in {} is not a non-negative integer", value)),
            ExpiresIn::Text(raw) => parse_expires_in(raw),
        }
    }
}

/// Build a token for `audience` from a success response body.
pub(crate) fn parse_token_response(body: &str, audience: &str) -> Result<Token> {
    let response: TokenResponse =
        serde_json::from_str(body).map_err(|err| Error::ResponseFormat(err.to_string()))?;
    let expires_in = response.expires_in.seconds().map_err(Error::ResponseFormat)?;
    if expires_in > MAX_TTL_SECONDS {
        return Err(Error::ResponseFormat(format!(
            "expires_in {} exceeds the largest cacheable lifetime of {} seconds",
            expires_in, MAX_TTL_SECONDS
        )));
    }

    Ok(Token::new(response.access_token, expires_in, response.token_type, audience))
}
