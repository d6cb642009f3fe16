//! Error types for meetlog
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for meetlog operations
///
/// The variants mirror the failure taxonomy of the client: authentication,
/// token decoding, record submission, history fetches, and device access.
/// None of them is fatal at runtime; callers degrade to a notice or an
/// empty state.
#[derive(Error, Debug)]
pub enum MeetlogError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bad credentials or unreachable authentication service
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// A stored or issued token whose payload cannot be decoded locally
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// An operation that requires a session was attempted without one
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    /// Form contents rejected before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record creation failed (transport error or non-2xx)
    #[error("Submission error: {0}")]
    Submission(String),

    /// History load failed (transport error, non-2xx, or bad body)
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Camera or geolocation denied, unavailable, or timed out
    #[error("Device access error: {0}")]
    DeviceAccess(String),

    /// Session token persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Result type alias for meetlog operations
///
/// Uses `anyhow::Error` so that call sites can attach context while the
/// typed [`MeetlogError`] stays recoverable through `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;
