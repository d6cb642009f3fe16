//! Session lifecycle
//!
//! [`SessionController`] owns the one [`Session`] of the process. It reads
//! the persisted token at construction, decodes it, and from then on changes
//! token and identity together:
//!
//! ```text
//! Unauthenticated --login ok--> Authenticated --logout / bad token--> Unauthenticated
//! ```
//!
//! Consumers either take a [`SessionController::session`] snapshot or
//! [`SessionController::subscribe`] to a watch channel.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::api::AuthClient;
use crate::generation::{Generation, Ticket};
use crate::session::identity::{self, Identity};
use crate::session::store::SessionStore;

/// Observable session state.
///
/// `identity` is `Some` exactly when `token` is `Some` and decodable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub identity: Option<Identity>,
    /// `true` while a login or signup request is in flight
    pub loading: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Login, signup, logout, and the published session state.
pub struct SessionController {
    store: Arc<dyn SessionStore>,
    auth: AuthClient,
    state: watch::Sender<Session>,
    generation: Generation,
    in_flight: AtomicUsize,
}

impl SessionController {
    /// Restores the session persisted in `store`.
    ///
    /// A stored token that does not decode is purged here. Storage read
    /// errors are logged and treated as "no token".
    pub fn new(store: Arc<dyn SessionStore>, auth: AuthClient) -> Self {
        let stored = match store.get() {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("Failed to read stored session: {}", e);
                None
            }
        };

        let (state, _) = watch::channel(Session::default());
        let controller = Self {
            store,
            auth,
            state,
            generation: Generation::new(),
            in_flight: AtomicUsize::new(0),
        };

        if let Some(token) = stored {
            controller
                .state
                .send_modify(|session| apply_token(controller.store.as_ref(), session, token));
        }
        controller
    }

    /// Current state snapshot.
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receives every subsequent state change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Exchanges credentials for a session.
    ///
    /// Returns `false` on any failure (bad credentials, network, malformed
    /// body, storage) without touching the existing session. A response that
    /// arrives after a later `logout` or `login` is discarded and reported as
    /// `false`.
    ///
    /// On success the token is stored and decoded. A token that does not
    /// decode is purged right away, leaving the session unauthenticated even
    /// though the call itself succeeded.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let ticket = self.generation.begin();
        self.begin_request();

        let outcome = self.auth.login(email, password).await;

        let ok = match outcome {
            Ok(token) => self.establish(token, &ticket),
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                false
            }
        };

        self.end_request();
        ok
    }

    /// Registers an account. Never establishes a session.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> bool {
        self.begin_request();
        let ok = match self.auth.signup(name, email, password).await {
            Ok(()) => {
                tracing::info!("Account created");
                true
            }
            Err(e) => {
                tracing::warn!("Signup failed: {}", e);
                false
            }
        };
        self.end_request();
        ok
    }

    /// Clears token and identity immediately. No network call.
    pub fn logout(&self) {
        self.state.send_modify(|session| {
            self.generation.invalidate();
            if let Err(e) = self.store.clear() {
                tracing::error!("Failed to clear stored session: {}", e);
            }
            session.token = None;
            session.identity = None;
        });
        tracing::info!("Logged out");
    }

    /// Persists and publishes `token` unless `ticket` was superseded.
    ///
    /// The ticket check and the writes happen under the channel's write
    /// lock, the same lock `logout` invalidates under.
    fn establish(&self, token: String, ticket: &Ticket) -> bool {
        let mut stored = false;
        self.state.send_if_modified(|session| {
            if !ticket.is_current() {
                tracing::debug!(
                    generation = ticket.generation(),
                    "Discarding superseded login response"
                );
                return false;
            }
            if let Err(e) = self.store.set(&token) {
                tracing::error!("Failed to persist session: {}", e);
                return false;
            }
            stored = true;
            apply_token(self.store.as_ref(), session, token);
            true
        });
        stored
    }

    fn begin_request(&self) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|session| session.loading = true);
    }

    fn end_request(&self) {
        let remaining = self.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
        if remaining == 0 {
            self.state.send_modify(|session| session.loading = false);
        }
    }
}

/// Decodes `token` into `session`, or purges it from `store` when it does
/// not decode.
fn apply_token(store: &dyn SessionStore, session: &mut Session, token: String) {
    match identity::decode(&token) {
        Ok(identity) => {
            tracing::info!(subject = %identity.subject, "Session established");
            session.token = Some(token);
            session.identity = Some(identity);
        }
        Err(e) => {
            tracing::error!("Error decoding token: {}", e);
            if let Err(e) = store.clear() {
                tracing::error!("Failed to purge undecodable token: {}", e);
            }
            session.token = None;
            session.identity = None;
        }
    }
}
