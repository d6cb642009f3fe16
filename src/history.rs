//! Submission history
//!
//! [`HistoryView`] loads the signed-in user's records, most recent first.
//! A failed load is logged and shows as an empty list; nothing is surfaced
//! to the user. Only the latest refresh may write the entries, and loaded
//! entries are only shown while the session that loaded them is current.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::MeetingsClient;
use crate::generation::Generation;
use crate::meeting::MeetingRecord;
use crate::session::SessionController;

/// Records together with the token they were loaded with.
#[derive(Debug)]
struct Loaded {
    token: String,
    records: Vec<MeetingRecord>,
}

pub struct HistoryView {
    session: Arc<SessionController>,
    meetings: MeetingsClient,
    entries: Mutex<Option<Loaded>>,
    generation: Generation,
}

impl HistoryView {
    pub fn new(session: Arc<SessionController>, meetings: MeetingsClient) -> Self {
        Self {
            session,
            meetings,
            entries: Mutex::new(None),
            generation: Generation::new(),
        }
    }

    fn lock_entries(&self) -> MutexGuard<'_, Option<Loaded>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reloads the list.
    ///
    /// Without a token the list is emptied and no request is made. Records
    /// are shown in the reverse of the order the backend returned them.
    /// A response is dropped when a newer refresh started meanwhile or the
    /// session changed while the request was in flight. Returns the entries
    /// as they stand after this call.
    pub async fn refresh(&self) -> Vec<MeetingRecord> {
        let ticket = self.generation.begin();

        let Some(token) = self.session.token() else {
            tracing::debug!("No session, history left empty");
            *self.lock_entries() = None;
            return Vec::new();
        };

        let loaded = match self.meetings.list(&token).await {
            Ok(mut records) => {
                records.reverse();
                records
            }
            Err(e) => {
                tracing::error!("Failed to fetch meetings: {}", e);
                Vec::new()
            }
        };

        let mut entries = self.lock_entries();
        let current = self.session.token();
        if !ticket.is_current() || current.as_deref() != Some(token.as_str()) {
            tracing::debug!(
                generation = ticket.generation(),
                "Discarding superseded history load"
            );
            return visible(&entries, current.as_deref());
        }

        *entries = Some(Loaded {
            token,
            records: loaded.clone(),
        });
        loaded
    }

    /// Entries from the latest completed refresh, or nothing when the
    /// session has changed since.
    pub fn entries(&self) -> Vec<MeetingRecord> {
        let current = self.session.token();
        visible(&self.lock_entries(), current.as_deref())
    }
}

fn visible(entries: &Option<Loaded>, token: Option<&str>) -> Vec<MeetingRecord> {
    match (entries, token) {
        (Some(loaded), Some(token)) if loaded.token == token => loaded.records.clone(),
        _ => Vec::new(),
    }
}
