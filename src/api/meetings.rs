//! Meetings backend client
//!
//! Both calls carry `Authorization: Bearer <token>`; the backend derives the
//! principal from the token, so no user id is ever sent.

use crate::api::endpoint;
use crate::error::{MeetlogError, Result};
use crate::meeting::{MeetingRecord, NewMeeting};

/// Client for `{base}/meetings`.
#[derive(Debug, Clone)]
pub struct MeetingsClient {
    http: reqwest::Client,
    base_url: String,
}

impl MeetingsClient {
    /// Creates a client rooted at `base_url`.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetches the caller's records in the order the backend returns them.
    ///
    /// # Errors
    ///
    /// Returns [`MeetlogError::Fetch`] on transport failure, non-2xx, or an
    /// unparseable body.
    pub async fn list(&self, token: &str) -> Result<Vec<MeetingRecord>> {
        let url = endpoint(&self.base_url, "meetings");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| MeetlogError::Fetch(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MeetlogError::Fetch(format!("HTTP {}", status)).into());
        }

        let records: Vec<MeetingRecord> = response
            .json()
            .await
            .map_err(|e| MeetlogError::Fetch(format!("malformed body: {}", e)))?;

        tracing::debug!(count = records.len(), "Fetched meetings");
        Ok(records)
    }

    /// Creates a record.
    ///
    /// # Errors
    ///
    /// Returns [`MeetlogError::Submission`] on transport failure or non-2xx.
    pub async fn create(&self, token: &str, meeting: &NewMeeting) -> Result<()> {
        let url = endpoint(&self.base_url, "meetings");

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(meeting)
            .send()
            .await
            .map_err(|e| MeetlogError::Submission(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MeetlogError::Submission(format!("HTTP {}", status)).into());
        }

        tracing::info!(customer = %meeting.customer_name, "Meeting saved");
        Ok(())
    }
}
