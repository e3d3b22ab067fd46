use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use serde_json::{Map, Value};

use crate::{Post, SessionError};

const JWT_PAYLOAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Claim names checked, in order, for the current user's id.
const USER_ID_CLAIMS: [&str; 3] = ["userId", "sub", "id"];

/// Authentication state handed explicitly to whatever needs it.
///
/// Holds the bearer token (if logged in) and the identity claims read from its payload.
/// The signature is not verified: claims are only used to decide what the UI offers, the backend enforces access.
#[derive(Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    claims: Map<String, Value>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("user_id", &self.user_id())
            .finish()
    }
}

impl Session {
    /// Logged-out session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session for `token`, decoding its claims strictly.
    pub fn decode(token: impl Into<String>) -> Result<Self, SessionError> {
        let token = token.into();
        let claims = decode_claims(&token)?;
        Ok(Self {
            token: Some(token),
            claims,
        })
    }

    /// Session for `token`; an undecodable payload leaves the claims empty.
    ///
    /// The session still counts as authenticated, it just has no known user id.
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let claims = decode_claims(&token).unwrap_or_default();
        Self {
            token: Some(token),
            claims,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }

    /// Current user id: `userId`, else `sub`, else `id`. Numeric ids are stringified.
    pub fn user_id(&self) -> Option<String> {
        USER_ID_CLAIMS.iter().find_map(|name| match self.claims.get(*name)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Returns `true` if the logged-in user wrote `post`.
    pub fn is_author(&self, post: &Post) -> bool {
        self.is_authenticated() && self.user_id().is_some_and(|id| id == post.user_id)
    }
}

fn decode_claims(token: &str) -> Result<Map<String, Value>, SessionError> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(SessionError::Malformed),
    };
    let bytes = JWT_PAYLOAD.decode(payload)?;
    Ok(serde_json::from_slice(&bytes)?)
}
