//! Authentication backend client
//!
//! `POST {base}/login` with `{email, password}` returns `{access_token}`.
//! `POST {base}/signup` with `{name, email, password}` creates an account but
//! issues no token. Any non-2xx status is a failure.

use serde::{Deserialize, Serialize};

use crate::api::endpoint;
use crate::error::{MeetlogError, Result};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

/// Client for the authentication backend.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Creates a client rooted at `base_url`.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Exchanges credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`MeetlogError::Authentication`] for a non-2xx status, a
    /// transport failure, or a body without a string `access_token`.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let url = endpoint(&self.base_url, "login");
        tracing::debug!(%url, "Sending login request");

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|e| MeetlogError::Authentication(format!("login request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(
                MeetlogError::Authentication(format!("login returned HTTP {}", status)).into(),
            );
        }

        let body: LoginResponse = response.json().await.map_err(|e| {
            MeetlogError::Authentication(format!("login response is malformed: {}", e))
        })?;

        Ok(body.access_token)
    }

    /// Registers a new account. No session is created.
    ///
    /// # Errors
    ///
    /// Returns [`MeetlogError::Authentication`] for a non-2xx status or a
    /// transport failure.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<()> {
        let url = endpoint(&self.base_url, "signup");
        tracing::debug!(%url, "Sending signup request");

        let response = self
            .http
            .post(&url)
            .json(&SignupRequest {
                name,
                email,
                password,
            })
            .send()
            .await
            .map_err(|e| MeetlogError::Authentication(format!("signup request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(
                MeetlogError::Authentication(format!("signup returned HTTP {}", status)).into(),
            );
        }

        Ok(())
    }
}
