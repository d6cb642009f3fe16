//! Reverse geocoding through an OpenCage-compatible service
//!
//! `GET {base}/geocode/v1/json?q={lat}+{lon}&key={key}`; the address is
//! `results[0].formatted`. Lookups are skipped entirely without an API key.

use serde::Deserialize;

use crate::api::endpoint;
use crate::device::location::Coordinates;
use crate::error::{MeetlogError, Result};

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    formatted: Option<String>,
}

/// Reverse geocoder.
#[derive(Debug, Clone)]
pub struct Geocoder {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl Geocoder {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Looks up a formatted address for `coords`.
    ///
    /// Returns `Ok(None)` when no API key is configured or the service has
    /// no result.
    ///
    /// # Errors
    ///
    /// Returns [`MeetlogError::Fetch`] on transport failure or non-2xx.
    pub async fn reverse(&self, coords: Coordinates) -> Result<Option<String>> {
        let Some(key) = self.api_key.as_deref() else {
            return Ok(None);
        };

        let url = endpoint(&self.base_url, "geocode/v1/json");
        let query = format!("{} {}", coords.latitude, coords.longitude);

        let response = self
            .http
            .get(&url)
            .query(&[("q", query.as_str()), ("key", key)])
            .send()
            .await
            .map_err(|e| MeetlogError::Fetch(format!("geocode request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MeetlogError::Fetch(format!("geocode returned HTTP {}", status)).into());
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| MeetlogError::Fetch(format!("geocode body is malformed: {}", e)))?;

        Ok(body
            .results
            .into_iter()
            .next()
            .and_then(|r| r.formatted)
            .filter(|s| !s.is_empty()))
    }

    /// Human-readable text for `coords`, never failing.
    ///
    /// Falls back to the six-decimal coordinate pair whenever the lookup is
    /// skipped or fails.
    pub async fn describe(&self, coords: Coordinates) -> String {
        match self.reverse(coords).await {
            Ok(Some(address)) => address,
            Ok(None) => coords.to_string(),
            Err(e) => {
                tracing::warn!("Reverse geocoding failed, using coordinates: {}", e);
                coords.to_string()
            }
        }
    }
}
