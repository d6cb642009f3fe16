//! Entry submission flow
//!
//! [`SubmissionFlow`] is the dashboard view: it owns a [`MeetingForm`],
//! fills in the location on mount and after every successful submission,
//! runs camera captures, and posts the finished record.
//!
//! Form state lives behind a mutex so that a location fix can land while
//! the user keeps editing. A fix requested before the form was reset is
//! discarded instead of being written into the fresh form.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::FixedOffset;

use crate::api::MeetingsClient;
use crate::device::{Camera, CaptureSession, LocationService};
use crate::error::MeetlogError;
use crate::form::MeetingForm;
use crate::generation::Generation;
use crate::notice::{Notice, NoticeBoard};
use crate::session::SessionController;

const NOT_LOGGED_IN: &str = "You must be logged in to submit an entry.";
const LOCATION_FAILED: &str = "Could not get location. Please ensure location services are enabled and permissions are granted.";
const CAMERA_FAILED: &str = "Camera access was denied or is not available. Please check your device settings.";

/// What a submit attempt came to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Persisted; the form was reset
    Saved,
    /// No session; nothing was sent
    Unauthenticated,
    /// Field rules failed; nothing was sent
    Invalid,
    /// Another submission is still in flight; nothing was sent
    Busy,
    /// The backend refused or was unreachable; the form is unchanged
    Failed,
}

/// The dashboard's entry form and its side effects.
pub struct SubmissionFlow {
    session: Arc<SessionController>,
    meetings: MeetingsClient,
    location: LocationService,
    notices: NoticeBoard,
    display_offset: FixedOffset,
    form: Mutex<MeetingForm>,
    location_generation: Generation,
    submitting: AtomicBool,
}

impl SubmissionFlow {
    pub fn new(
        session: Arc<SessionController>,
        meetings: MeetingsClient,
        location: LocationService,
        notices: NoticeBoard,
        display_offset: FixedOffset,
    ) -> Self {
        Self {
            session,
            meetings,
            location,
            notices,
            display_offset,
            form: Mutex::new(MeetingForm::fresh(display_offset)),
            location_generation: Generation::new(),
            submitting: AtomicBool::new(false),
        }
    }

    /// Runs the on-mount side effects: one location acquisition.
    pub async fn mount(&self) {
        self.acquire_location().await;
    }

    fn lock_form(&self) -> MutexGuard<'_, MeetingForm> {
        // A panic while holding the lock leaves plain data behind; keep going.
        self.form.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the form.
    pub fn form(&self) -> MeetingForm {
        self.lock_form().clone()
    }

    /// Applies user edits.
    pub fn edit<R>(&self, f: impl FnOnce(&mut MeetingForm) -> R) -> R {
        f(&mut self.lock_form())
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Takes one location fix and writes it into the form.
    ///
    /// On failure the location stays blank and an error notice is posted;
    /// the form remains usable. Returns `true` when a location was applied.
    pub async fn acquire_location(&self) -> bool {
        let ticket = self.location_generation.begin();
        let result = self.location.acquire().await;

        let mut form = self.lock_form();
        if !ticket.is_current() {
            tracing::debug!(
                generation = ticket.generation(),
                "Discarding superseded location fix"
            );
            return false;
        }

        match result {
            Ok(text) => {
                form.location = text;
                true
            }
            Err(e) => {
                drop(form);
                tracing::error!("Error getting location: {}", e);
                self.notices.post(Notice::error(LOCATION_FAILED));
                false
            }
        }
    }

    /// Opens `camera`, captures one frame, and attaches it as the photo.
    ///
    /// The camera is released before this returns, whatever the outcome.
    pub async fn capture_photo(&self, camera: &dyn Camera) -> bool {
        if !self.lock_form().photo_capture_visible() {
            self.notices.post(Notice::warning(
                "Photo capture is only available for OutSource or Other sources.",
            ));
            return false;
        }

        let session = match CaptureSession::start(camera).await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!("Error accessing camera: {}", e);
                self.notices.post(Notice::error(CAMERA_FAILED));
                return false;
            }
        };

        let photo = match session.capture() {
            Ok(photo) => photo,
            Err(e) => {
                tracing::error!("Error capturing photo: {}", e);
                self.notices.post(Notice::error(CAMERA_FAILED));
                return false;
            }
        };

        let attached = self.lock_form().set_photo(photo);
        match attached {
            Ok(()) => {
                self.notices.post(Notice::info("Photo captured."));
                true
            }
            Err(e) => {
                self.notices.post(Notice::warning(e.to_string()));
                false
            }
        }
    }

    /// Submits the form.
    ///
    /// On success, in order: the record is persisted, a success notice is
    /// posted, the form is reset, and a fresh location is acquired. Any
    /// failure before persisting leaves the form untouched and sends
    /// nothing; a persist failure leaves the form untouched too.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(token) = self.session.token() else {
            self.notices.post(Notice::error(NOT_LOGGED_IN));
            return SubmitOutcome::Unauthenticated;
        };

        let payload = {
            let form = self.lock_form();
            if let Err(e) = form.validate() {
                let message = match e.downcast_ref::<MeetlogError>() {
                    Some(MeetlogError::Validation(msg)) => msg.clone(),
                    _ => e.to_string(),
                };
                self.notices.post(Notice::error(message));
                return SubmitOutcome::Invalid;
            }
            form.to_payload()
        };

        if self.submitting.swap(true, Ordering::SeqCst) {
            return SubmitOutcome::Busy;
        }

        let result = self.meetings.create(&token, &payload).await;
        self.submitting.store(false, Ordering::SeqCst);

        if let Err(e) = result {
            tracing::error!("Failed to save meeting: {}", e);
            self.notices
                .post(Notice::error(format!("Failed to save meeting: {}", e)));
            return SubmitOutcome::Failed;
        }

        self.notices.post(Notice::success("Meeting saved!"));
        self.reset();
        self.acquire_location().await;
        SubmitOutcome::Saved
    }

    /// Restores fresh defaults and supersedes any in-flight location fix.
    pub fn reset(&self) {
        let mut form = self.lock_form();
        self.location_generation.invalidate();
        *form = MeetingForm::fresh(self.display_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::api::{AuthClient, Geocoder};
    use crate::device::camera::tests::FakeCamera;
    use crate::device::{
        Coordinates, FixedPositionSource, PositionOptions, PositionSource,
        UnavailablePositionSource,
    };
    use crate::error::Result;
    use crate::form::display_offset;
    use crate::session::MemorySessionStore;
    use crate::test_utils::token_for;

    fn flow(signed_in: bool, source: Arc<dyn PositionSource>) -> SubmissionFlow {
        let http = reqwest::Client::new();
        let store = if signed_in {
            MemorySessionStore::with_token(&token_for("ravi@example.com", None))
        } else {
            MemorySessionStore::default()
        };
        let session = Arc::new(SessionController::new(
            Arc::new(store),
            AuthClient::new(http.clone(), "http://127.0.0.1:9"),
        ));
        SubmissionFlow::new(
            session,
            MeetingsClient::new(http.clone(), "http://127.0.0.1:9"),
            LocationService::new(
                source,
                Geocoder::new(http, "http://127.0.0.1:9", None),
                PositionOptions::default(),
            ),
            NoticeBoard::default(),
            display_offset(330),
        )
    }

    fn here() -> Arc<dyn PositionSource> {
        Arc::new(FixedPositionSource(Coordinates {
            latitude: 12.5,
            longitude: 77.25,
        }))
    }

    /// Answers after `delay` of (paused) Tokio time.
    struct SlowPositionSource {
        delay: Duration,
    }

    #[async_trait]
    impl PositionSource for SlowPositionSource {
        async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinates> {
            tokio::time::sleep(self.delay).await;
            Ok(Coordinates {
                latitude: 1.0,
                longitude: 2.0,
            })
        }
    }

    #[tokio::test]
    async fn test_mount_fills_location() {
        let flow = flow(true, here());
        flow.mount().await;
        assert_eq!(flow.form().location, "12.500000, 77.250000");
    }

    #[tokio::test]
    async fn test_location_failure_is_non_blocking() {
        let flow = flow(true, Arc::new(UnavailablePositionSource));
        assert!(!flow.acquire_location().await);
        assert!(flow.form().location.is_empty());
        let notice = flow.notices().current().unwrap();
        assert_eq!(notice, Notice::error(LOCATION_FAILED));
    }

    #[tokio::test]
    async fn test_submit_without_token_is_unauthenticated() {
        let flow = flow(false, here());
        flow.edit(|f| f.customer_name = "Acme".to_string());
        assert_eq!(flow.submit().await, SubmitOutcome::Unauthenticated);
        assert_eq!(flow.notices().current(), Some(Notice::error(NOT_LOGGED_IN)));
        assert_eq!(flow.form().customer_name, "Acme");
    }

    #[tokio::test]
    async fn test_submit_with_blank_custom_source_is_invalid() {
        let flow = flow(true, here());
        flow.edit(|f| {
            f.customer_name = "Acme".to_string();
            f.select_source("Other")
        })
        .unwrap();
        assert_eq!(flow.submit().await, SubmitOutcome::Invalid);
        assert_eq!(
            flow.notices().current().unwrap().message,
            "Source name is required when source is Other"
        );
    }

    #[tokio::test]
    async fn test_submit_transport_failure_keeps_form() {
        let flow = flow(true, here());
        flow.edit(|f| {
            f.customer_name = "Acme".to_string();
            f.remark2 = "call back".to_string();
        });
        assert_eq!(flow.submit().await, SubmitOutcome::Failed);
        let form = flow.form();
        assert_eq!(form.customer_name, "Acme");
        assert_eq!(form.remark2, "call back");
        assert!(!flow.is_submitting());
    }

    #[tokio::test]
    async fn test_capture_hidden_for_telecaller() {
        let flow = flow(true, here());
        flow.edit(|f| f.select_source("TeleCaller")).unwrap();
        let camera = FakeCamera::new(1);
        assert!(!flow.capture_photo(&camera).await);
        assert_eq!(camera.opened.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_capture_attaches_photo_and_releases_camera() {
        let flow = flow(true, here());
        flow.edit(|f| f.select_source("OutSource")).unwrap();
        let camera = FakeCamera::new(1);
        assert!(flow.capture_photo(&camera).await);
        assert!(flow
            .form()
            .photo
            .unwrap()
            .starts_with("data:image/jpeg;base64,"));
        assert_eq!(camera.stopped.load(Ordering::SeqCst), 1);
        assert_eq!(
            flow.notices().current(),
            Some(Notice::info("Photo captured."))
        );

        flow.edit(|f| f.remove_photo());
        assert!(flow.form().photo.is_none());
    }

    #[tokio::test]
    async fn test_reset_discards_in_flight_location() {
        let flow = flow(true, here());
        let ticket = flow.location_generation.begin();
        flow.reset();
        assert!(!ticket.is_current());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fix_started_before_reset_stays_out_of_fresh_form() {
        let flow = Arc::new(flow(
            true,
            Arc::new(SlowPositionSource {
                delay: Duration::from_secs(2),
            }),
        ));

        let pending = {
            let flow = Arc::clone(&flow);
            tokio::spawn(async move { flow.acquire_location().await })
        };
        tokio::time::sleep(Duration::from_millis(500)).await;

        flow.edit(|f| f.customer_name = "Acme".to_string());
        flow.reset();

        assert!(!pending.await.unwrap());
        let form = flow.form();
        assert!(form.location.is_empty());
        assert!(form.customer_name.is_empty());
        assert!(flow.notices().current().is_none());
    }
}
