//! Local, unverified decoding of bearer token payloads
//!
//! The identity extracted here is advisory and only used for display. No
//! signature check and no network I/O happen; the backend still authorizes
//! every request on its own.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::MeetlogError;

/// Display identity projected from a token's claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The `sub` claim; the backend uses the account email here.
    pub subject: String,
    /// The optional `name` claim.
    pub display_name: Option<String>,
}

impl Identity {
    /// Name to show in the UI, falling back to the subject.
    pub fn display(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.subject)
    }
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    name: Option<String>,
}

/// Decodes the payload segment of a JWT-shaped token.
///
/// The token must contain at least two dot-separated segments and the
/// second must be base64url-encoded JSON with a string `sub` claim.
/// Trailing `=` padding is tolerated.
///
/// # Errors
///
/// Returns [`MeetlogError::MalformedToken`] for any other shape.
///
/// # Examples
///
/// ```
/// use meetlog::session::identity::decode;
///
/// // {"sub":"ana@example.com","name":"Ana"}
/// let token = "e30.eyJzdWIiOiJhbmFAZXhhbXBsZS5jb20iLCJuYW1lIjoiQW5hIn0.sig";
/// let identity = decode(token).unwrap();
/// assert_eq!(identity.subject, "ana@example.com");
/// assert_eq!(identity.display(), "Ana");
///
/// assert!(decode("abc.def.ghi").is_err());
/// ```
pub fn decode(token: &str) -> Result<Identity, MeetlogError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| MeetlogError::MalformedToken("missing payload segment".to_string()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| MeetlogError::MalformedToken(format!("payload is not base64url: {}", e)))?;

    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| MeetlogError::MalformedToken(format!("payload is not JSON: {}", e)))?;
    if !value.is_object() {
        return Err(MeetlogError::MalformedToken(
            "payload is not a JSON object".to_string(),
        ));
    }
    let claims: Claims = serde_json::from_value(value)
        .map_err(|e| MeetlogError::MalformedToken(format!("payload is not valid claims: {}", e)))?;

    Ok(Identity {
        subject: claims.sub,
        display_name: claims.name.filter(|name| !name.is_empty()),
    })
}
