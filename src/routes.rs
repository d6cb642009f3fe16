//! Navigation targets and the authentication guard
//!
//! The guard is a pure read of session state. There is no "return to"
//! memory: after signing in the user always lands on [`Route::DEFAULT`].

use std::fmt;
use std::str::FromStr;

use crate::error::MeetlogError;
use crate::session::Session;

/// A navigable view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Sign-in / sign-up surface
    Auth,
    /// Index; forwards to the default view
    Root,
    /// Entry form
    Dashboard,
    /// Submission history
    History,
}

impl Route {
    /// Where signed-in users land.
    pub const DEFAULT: Route = Route::Dashboard;

    pub fn path(self) -> &'static str {
        match self {
            Route::Auth => "/auth",
            Route::Root => "/",
            Route::Dashboard => "/dashboard",
            Route::History => "/history",
        }
    }

    /// Everything except the sign-in surface needs a session.
    pub fn is_protected(self) -> bool {
        !matches!(self, Route::Auth)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = MeetlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('/') {
            "auth" => Ok(Route::Auth),
            "" => Ok(Route::Root),
            "dashboard" => Ok(Route::Dashboard),
            "history" => Ok(Route::History),
            other => Err(MeetlogError::Validation(format!("unknown route '{}'", other))),
        }
    }
}

/// Result of a guarded navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

impl Navigation {
    /// The view that ends up on screen.
    pub fn destination(self) -> Route {
        match self {
            Navigation::Render(route) | Navigation::Redirect(route) => route,
        }
    }
}

/// Decides what happens when `session` navigates to `route`.
///
/// # Examples
///
/// ```
/// use meetlog::routes::{guard, Navigation, Route};
/// use meetlog::session::Session;
///
/// let anonymous = Session::default();
/// assert_eq!(guard(&anonymous, Route::History), Navigation::Redirect(Route::Auth));
/// assert_eq!(guard(&anonymous, Route::Auth), Navigation::Render(Route::Auth));
/// ```
pub fn guard(session: &Session, route: Route) -> Navigation {
    match (session.is_authenticated(), route) {
        (false, route) if route.is_protected() => Navigation::Redirect(Route::Auth),
        (true, Route::Auth) | (true, Route::Root) => Navigation::Redirect(Route::DEFAULT),
        (_, route) => Navigation::Render(route),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in() -> Session {
        Session {
            token: Some("t".to_string()),
            identity: None,
            loading: false,
        }
    }

    #[test]
    fn test_anonymous_is_sent_to_auth() {
        let session = Session::default();
        for route in [Route::Root, Route::Dashboard, Route::History] {
            assert_eq!(guard(&session, route), Navigation::Redirect(Route::Auth));
        }
        assert_eq!(guard(&session, Route::Auth), Navigation::Render(Route::Auth));
    }

    #[test]
    fn test_signed_in_is_kept_off_auth() {
        let session = signed_in();
        assert_eq!(
            guard(&session, Route::Auth),
            Navigation::Redirect(Route::Dashboard)
        );
        assert_eq!(
            guard(&session, Route::Root),
            Navigation::Redirect(Route::Dashboard)
        );
        assert_eq!(
            guard(&session, Route::History),
            Navigation::Render(Route::History)
        );
        assert_eq!(
            guard(&session, Route::Dashboard),
            Navigation::Render(Route::Dashboard)
        );
    }

    #[test]
    fn test_loading_does_not_affect_guard() {
        let session = Session {
            loading: true,
            ..Session::default()
        };
        assert_eq!(
            guard(&session, Route::Dashboard),
            Navigation::Redirect(Route::Auth)
        );
    }

    #[test]
    fn test_route_parsing() {
        assert_eq!("/history".parse::<Route>().unwrap(), Route::History);
        assert_eq!("dashboard".parse::<Route>().unwrap(), Route::Dashboard);
        assert_eq!("/".parse::<Route>().unwrap(), Route::Root);
        assert_eq!("auth".parse::<Route>().unwrap(), Route::Auth);
        assert!("settings".parse::<Route>().is_err());
    }

    #[test]
    fn test_destination() {
        assert_eq!(Navigation::Redirect(Route::Auth).destination(), Route::Auth);
        assert_eq!(Route::History.to_string(), "/history");
    }
}
