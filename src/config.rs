//! Configuration management for meetlog
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{MeetlogError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for meetlog
///
/// Holds the endpoints of both remote backends, device and session
/// settings, and logging preferences.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Authentication backend (login, signup)
    #[serde(default)]
    pub auth: AuthConfig,
    /// Meetings backend (record list and create)
    #[serde(default)]
    pub meetings: MeetingsConfig,
    /// Reverse geocoding service
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Location acquisition settings
    #[serde(default)]
    pub location: LocationConfig,
    /// Session token persistence
    #[serde(default)]
    pub session: SessionConfig,
    /// Shared HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
    /// User-facing notice settings
    #[serde(default)]
    pub notices: NoticeConfig,
    /// Entry form settings
    #[serde(default)]
    pub form: FormConfig,
    /// Logging output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Authentication backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base URL; `/login` and `/signup` are appended
    #[serde(default = "default_auth_url")]
    pub base_url: String,
}

fn default_auth_url() -> String {
    "https://staging.webmobrildemo.com/loan-lead-backend".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: default_auth_url(),
        }
    }
}

/// Meetings backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingsConfig {
    /// Base URL; `/meetings` is appended
    #[serde(default = "default_meetings_url")]
    pub base_url: String,
}

fn default_meetings_url() -> String {
    "http://18.188.184.213:8040".to_string()
}

impl Default for MeetingsConfig {
    fn default() -> Self {
        Self {
            base_url: default_meetings_url(),
        }
    }
}

/// Reverse geocoding configuration
///
/// Lookups only happen when an API key is present; otherwise the
/// coordinate string is used as the location text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// OpenCage-compatible service base URL
    #[serde(default = "default_geocode_url")]
    pub base_url: String,

    /// API key for the geocoding service
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_geocode_url() -> String {
    "https://api.opencagedata.com".to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocode_url(),
            api_key: None,
        }
    }
}

/// Location acquisition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Give up on a position fix after this many seconds
    #[serde(default = "default_location_timeout")]
    pub timeout_seconds: u64,

    /// Request a high-accuracy fix
    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,
}

fn default_location_timeout() -> u64 {
    10
}

fn default_high_accuracy() -> bool {
    true
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_location_timeout(),
            high_accuracy: default_high_accuracy(),
        }
    }
}

/// Session token storage backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionBackend {
    /// Plain file in the per-user data directory
    #[default]
    File,
    /// OS native credential store
    Keyring,
    /// Process memory only; nothing survives a restart
    Memory,
}

impl std::str::FromStr for SessionBackend {
    type Err = MeetlogError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "keyring" => Ok(Self::Keyring),
            "memory" => Ok(Self::Memory),
            other => Err(MeetlogError::Config(format!(
                "Invalid session backend: {}. Must be one of: file, keyring, memory",
                other
            ))),
        }
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Where the token lives
    #[serde(default)]
    pub backend: SessionBackend,

    /// Override for the file backend's token path
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u64,
}

fn default_http_timeout() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
        }
    }
}

impl HttpConfig {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Notice configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticeConfig {
    /// Auto-dismiss delay in milliseconds
    #[serde(default = "default_notice_duration")]
    pub duration_ms: u64,
}

fn default_notice_duration() -> u64 {
    3000
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_notice_duration(),
        }
    }
}

/// Entry form configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// UTC offset used for the short display date (minutes, default IST)
    #[serde(default = "default_display_offset")]
    pub display_utc_offset_minutes: i32,
}

fn default_display_offset() -> i32 {
    330
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            display_utc_offset_minutes: default_display_offset(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json_format: bool,

    /// Also append logs to this file
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

fn default_log_level() -> String {
    "meetlog=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
            file_path: None,
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| MeetlogError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| MeetlogError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(url) = std::env::var("MEETLOG_AUTH_URL") {
            self.auth.base_url = url;
        }

        if let Ok(url) = std::env::var("MEETLOG_MEETINGS_URL") {
            self.meetings.base_url = url;
        }

        if let Ok(url) = std::env::var("MEETLOG_GEOCODE_URL") {
            self.geocoding.base_url = url;
        }

        if let Ok(key) = std::env::var("MEETLOG_GEOCODE_API_KEY") {
            if !key.is_empty() {
                self.geocoding.api_key = Some(key);
            }
        }

        if let Ok(backend) = std::env::var("MEETLOG_SESSION_BACKEND") {
            match backend.parse() {
                Ok(value) => self.session.backend = value,
                Err(e) => tracing::warn!("Invalid MEETLOG_SESSION_BACKEND: {}", e),
            }
        }

        if let Ok(path) = std::env::var("MEETLOG_SESSION_PATH") {
            self.session.path = Some(PathBuf::from(path));
        }

        if let Ok(timeout) = std::env::var("MEETLOG_HTTP_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.http.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid MEETLOG_HTTP_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(timeout) = std::env::var("MEETLOG_LOCATION_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.location.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid MEETLOG_LOCATION_TIMEOUT_SECONDS: {}", timeout);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(path) = &cli.session_path {
            tracing::debug!(path = %path.display(), "Session path override from CLI");
            self.session.path = Some(path.clone());
            self.session.backend = SessionBackend::File;
        }

        if cli.verbose {
            self.logging.level = "meetlog=debug".to_string();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any URL does not parse or a duration is zero
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("auth.base_url", &self.auth.base_url),
            ("meetings.base_url", &self.meetings.base_url),
            ("geocoding.base_url", &self.geocoding.base_url),
        ] {
            url::Url::parse(value).map_err(|e| {
                MeetlogError::Config(format!("{} is not a valid URL ({}): {}", name, value, e))
            })?;
        }

        if self.http.timeout_seconds == 0 {
            return Err(MeetlogError::Config(
                "http.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.location.timeout_seconds == 0 {
            return Err(MeetlogError::Config(
                "location.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.notices.duration_ms == 0 {
            return Err(MeetlogError::Config(
                "notices.duration_ms must be greater than 0".to_string(),
            )
            .into());
        }

        if self.form.display_utc_offset_minutes.unsigned_abs() >= 18 * 60 {
            return Err(MeetlogError::Config(
                "form.display_utc_offset_minutes must be within +/- 18 hours".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
