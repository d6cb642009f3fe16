//! HTTP clients for the remote services
//!
//! - [`auth`]     -- login and signup against the authentication backend
//! - [`meetings`] -- list and create meeting records
//! - [`geocode`]  -- reverse geocoding of raw coordinates
//!
//! All clients share one `reqwest::Client` built by [`build_http_client`].
//! None of them retries.

pub mod auth;
pub mod geocode;
pub mod meetings;

use std::time::Duration;

use crate::error::{MeetlogError, Result};

pub use auth::AuthClient;
pub use geocode::Geocoder;
pub use meetings::MeetingsClient;

/// Builds the shared HTTP client with a per-request timeout.
///
/// # Errors
///
/// Returns [`MeetlogError::Config`] if TLS initialisation fails.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("meetlog/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| MeetlogError::Config(format!("Failed to build HTTP client: {}", e)).into())
}

/// Appends `path` to a base URL that may itself carry a path prefix.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
