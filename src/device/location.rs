//! Best-effort location acquisition
//!
//! A [`PositionSource`] yields raw coordinates; [`LocationService`] bounds it
//! with a timeout and turns the fix into text through the [`Geocoder`].
//! Fixes are never cached: every [`LocationService::acquire`] asks the
//! source again.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::Geocoder;
use crate::config::LocationConfig;
use crate::error::{MeetlogError, Result};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Options passed to the position source on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest acceptable cached fix; zero means always take a fresh one.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::ZERO,
        }
    }
}

impl From<&LocationConfig> for PositionOptions {
    fn from(config: &LocationConfig) -> Self {
        Self {
            high_accuracy: config.high_accuracy,
            timeout: Duration::from_secs(config.timeout_seconds),
            maximum_age: Duration::ZERO,
        }
    }
}

/// Platform geolocation.
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Requests a single position fix.
    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinates>;
}

/// Reports the same coordinates every time (from the command line or a
/// fixed installation).
#[derive(Debug, Clone, Copy)]
pub struct FixedPositionSource(pub Coordinates);

#[async_trait]
impl PositionSource for FixedPositionSource {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinates> {
        Ok(self.0)
    }
}

/// A platform without geolocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailablePositionSource;

#[async_trait]
impl PositionSource for UnavailablePositionSource {
    async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinates> {
        Err(MeetlogError::DeviceAccess(
            "Geolocation is not supported on this device".to_string(),
        )
        .into())
    }
}

/// Position source plus reverse geocoding, bounded by a timeout.
#[derive(Clone)]
pub struct LocationService {
    source: Arc<dyn PositionSource>,
    geocoder: Geocoder,
    options: PositionOptions,
}

impl LocationService {
    pub fn new(
        source: Arc<dyn PositionSource>,
        geocoder: Geocoder,
        options: PositionOptions,
    ) -> Self {
        Self {
            source,
            geocoder,
            options,
        }
    }

    /// Takes one fresh fix and describes it.
    ///
    /// # Errors
    ///
    /// Returns [`MeetlogError::DeviceAccess`] when the source refuses, fails,
    /// or does not answer within the configured timeout. Geocoding failures
    /// are not errors; they fall back to the coordinate string.
    pub async fn acquire(&self) -> Result<String> {
        let fix = tokio::time::timeout(
            self.options.timeout,
            self.source.current_position(&self.options),
        )
        .await
        .map_err(|_| {
            MeetlogError::DeviceAccess(format!(
                "no position fix within {}s",
                self.options.timeout.as_secs()
            ))
        })?;

        let coords = fix.map_err(|e| match e.downcast::<MeetlogError>() {
            Ok(MeetlogError::DeviceAccess(msg)) => MeetlogError::DeviceAccess(msg),
            Ok(other) => MeetlogError::DeviceAccess(other.to_string()),
            Err(other) => MeetlogError::DeviceAccess(other.to_string()),
        })?;

        tracing::debug!(%coords, "Position fix acquired");
        Ok(self.geocoder.describe(coords).await)
    }
}
