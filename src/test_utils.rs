//! Test utilities for Meetlog
//!
//! Helpers for building session tokens and meeting records in unit tests.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::meeting::MeetingRecord;

/// Builds an unsigned token whose payload carries `sub` and, optionally,
/// `name`.
pub fn token_for(sub: &str, name: Option<&str>) -> String {
    let claims = match name {
        Some(name) => serde_json::json!({ "sub": sub, "name": name }),
        None => serde_json::json!({ "sub": sub }),
    };
    format!("e30.{}.sig", URL_SAFE_NO_PAD.encode(claims.to_string()))
}

/// A record with just an id and customer name set.
pub fn record(id: &str, customer_name: &str) -> MeetingRecord {
    MeetingRecord {
        id: id.to_string(),
        customer_name: customer_name.to_string(),
        ..MeetingRecord::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::identity::decode;

    #[test]
    fn test_token_for_decodes() {
        let identity = decode(&token_for("ravi@example.com", Some("Ravi"))).unwrap();
        assert_eq!(identity.subject, "ravi@example.com");
        assert_eq!(identity.display(), "Ravi");
    }

    #[test]
    fn test_record_defaults() {
        let r = record("1", "Acme");
        assert_eq!(r.id, "1");
        assert!(r.photo.is_empty());
    }
}
