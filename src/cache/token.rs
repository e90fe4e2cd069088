use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::utils::constants::{FIELD_ACCESS_TOKEN, FIELD_AUDIENCE, FIELD_EXPIRES_IN, FIELD_TOKEN_TYPE};

/// An issued OAuth 2.0 access token.
///
/// `expires_in` is the lifetime in seconds at issuance time, not an absolute
/// timestamp. The token does not track elapsed time; expiry is left to the
/// cache store TTL.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    access_token: String,
    expires_in: u64,
    token_type: String,
    audience: String,
}

impl Token {
    pub fn new(
        access_token: impl Into<String>,
        expires_in: u64,
        token_type: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            expires_in,
            token_type: token_type.into(),
            audience: audience.into(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Value for an `Authorization` header, e.g. `Bearer eyJ...`
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Encode the token as a string field map, the shape the cache store keeps.
    pub fn to_field_map(&self) -> HashMap<String, String> {
        HashMap::from([
            (FIELD_ACCESS_TOKEN.to_owned(), self.access_token.to_owned()),
            (FIELD_EXPIRES_IN.to_owned(), self.expires_in.to_string()),
            (FIELD_TOKEN_TYPE.to_owned(), self.token_type.to_owned()),
            (FIELD_AUDIENCE.to_owned(), self.audience.to_owned()),
        ])
    }

    /// Decode a field map produced by [`Token::to_field_map`].
    ///
    /// Every value comes back from the store as a string, so `expires_in` is
    /// parsed back into seconds here.
    pub fn from_field_map(fields: &HashMap<String, String>) -> Result<Self> {
        let field = |name: &str| {
            fields
                .get(name)
                .cloned()
                .ok_or_else(|| Error::CacheFormat(format!("field '{}' is missing", name)))
        };

        let raw_expires_in = field(FIELD_EXPIRES_IN)?;
        let expires_in = parse_expires_in(&raw_expires_in).map_err(Error::CacheFormat)?;

        Ok(Self::new(
            field(FIELD_ACCESS_TOKEN)?,
            expires_in,
            field(FIELD_TOKEN_TYPE)?,
            field(FIELD_AUDIENCE)?,
        ))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .field("audience", &self.audience)
            .finish()
    }
}

/// Parse a decimal, non-negative `expires_in` value.
pub(crate) fn parse_expires_in(raw: &str) -> std::result::Result<u64, String> {
    raw.trim()
        .parse::<u64>()
        .map_err(|err| format!("expires_in '{}' is not a non-negative integer: {}", raw, err))
}
