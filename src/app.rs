//! Application wiring
//!
//! [`App`] builds every component from a [`Config`] once and hands out the
//! views. All views share one [`SessionController`], one HTTP client, and
//! one [`NoticeBoard`].

use std::sync::Arc;
use std::time::Duration;

use chrono::FixedOffset;

use crate::api::{self, AuthClient, Geocoder, MeetingsClient};
use crate::config::Config;
use crate::device::{LocationService, PositionOptions, PositionSource};
use crate::error::Result;
use crate::form::display_offset;
use crate::history::HistoryView;
use crate::notice::NoticeBoard;
use crate::routes::{self, Navigation, Route};
use crate::session::{store, SessionController, SessionStore};
use crate::submission::SubmissionFlow;

pub struct App {
    session: Arc<SessionController>,
    meetings: MeetingsClient,
    geocoder: Geocoder,
    position_source: Arc<dyn PositionSource>,
    position_options: PositionOptions,
    notices: NoticeBoard,
    display_offset: FixedOffset,
}

impl App {
    /// Builds the application with the session backend named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the session
    /// backend cannot be located.
    pub fn from_config(config: &Config, position_source: Arc<dyn PositionSource>) -> Result<Self> {
        let store: Arc<dyn SessionStore> = Arc::from(store::from_config(&config.session)?);
        Self::with_store(config, store, position_source)
    }

    /// Builds the application around an explicit session store.
    pub fn with_store(
        config: &Config,
        store: Arc<dyn SessionStore>,
        position_source: Arc<dyn PositionSource>,
    ) -> Result<Self> {
        let http = api::build_http_client(config.http.timeout())?;

        let auth = AuthClient::new(http.clone(), config.auth.base_url.clone());
        let session = Arc::new(SessionController::new(store, auth));

        Ok(Self {
            session,
            meetings: MeetingsClient::new(http.clone(), config.meetings.base_url.clone()),
            geocoder: Geocoder::new(
                http,
                config.geocoding.base_url.clone(),
                config.geocoding.api_key.clone(),
            ),
            position_source,
            position_options: PositionOptions::from(&config.location),
            notices: NoticeBoard::new(Duration::from_millis(config.notices.duration_ms)),
            display_offset: display_offset(config.form.display_utc_offset_minutes),
        })
    }

    pub fn session(&self) -> &Arc<SessionController> {
        &self.session
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Applies the route guard to the current session.
    pub fn navigate(&self, route: Route) -> Navigation {
        let navigation = routes::guard(&self.session.session(), route);
        tracing::debug!(?route, ?navigation, "Navigation");
        navigation
    }

    /// A fresh dashboard form. Call [`SubmissionFlow::mount`] to fill in the
    /// location.
    pub fn submission_flow(&self) -> SubmissionFlow {
        SubmissionFlow::new(
            Arc::clone(&self.session),
            self.meetings.clone(),
            LocationService::new(
                Arc::clone(&self.position_source),
                self.geocoder.clone(),
                self.position_options.clone(),
            ),
            self.notices.clone(),
            self.display_offset,
        )
    }

    pub fn history_view(&self) -> HistoryView {
        HistoryView::new(Arc::clone(&self.session), self.meetings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::UnavailablePositionSource;
    use crate::session::MemorySessionStore;
    use crate::test_utils::token_for;

    fn app(store: MemorySessionStore) -> App {
        App::with_store(
            &Config::default(),
            Arc::new(store),
            Arc::new(UnavailablePositionSource),
        )
        .unwrap()
    }

    #[test]
    fn test_navigate_follows_session() {
        let app = app(MemorySessionStore::default());
        assert_eq!(app.navigate(Route::Root), Navigation::Redirect(Route::Auth));

        let app = app_with_token(&token_for("ravi@example.com", None));
        assert_eq!(
            app.navigate(Route::Auth),
            Navigation::Redirect(Route::Dashboard)
        );
        assert_eq!(
            app.navigate(Route::History),
            Navigation::Render(Route::History)
        );
    }

    #[test]
    fn test_navigate_after_logout() {
        let app = app_with_token(&token_for("ravi@example.com", None));
        app.session().logout();
        assert_eq!(
            app.navigate(Route::Dashboard),
            Navigation::Redirect(Route::Auth)
        );
    }

    fn app_with_token(token: &str) -> App {
        app(MemorySessionStore::with_token(token))
    }
}
