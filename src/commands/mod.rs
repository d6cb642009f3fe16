/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `auth`    -- login, signup, logout, whoami
- `submit`  -- fill in and submit one meeting entry
- `history` -- list submitted meetings
- `open`    -- resolve a route through the authentication guard

Every handler works on an [`App`](crate::app::App) built by the entrypoint
and reports notices on the terminal.
*/

use colored::Colorize;

use crate::app::App;
use crate::error::{MeetlogError, Result};
use crate::notice::NoticeBoard;
use crate::routes::{Navigation, Route};

pub mod auth;
pub mod history;
pub mod open;
pub mod submit;

/// Prints and drains everything posted to `notices`, then dismisses the
/// visible one since it has been shown.
pub fn print_notices(notices: &NoticeBoard) {
    for notice in notices.take_posted() {
        println!("{}", notice);
    }
    notices.dismiss();
}

/// Resolves `route` for the current session, failing when the guard sends
/// the user to the sign-in surface instead.
fn require_route(app: &App, route: Route) -> Result<()> {
    match app.navigate(route) {
        Navigation::Render(_) => Ok(()),
        Navigation::Redirect(Route::Auth) => {
            println!(
                "{} Run {} first.",
                "Not signed in.".red(),
                "meetlog login".cyan()
            );
            Err(MeetlogError::Unauthenticated(format!("{} requires a session", route)).into())
        }
        Navigation::Redirect(_) => Ok(()),
    }
}
