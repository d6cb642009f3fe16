//! Route resolution for the current session

use colored::Colorize;

use crate::app::App;
use crate::error::Result;
use crate::routes::{Navigation, Route};

/// Prints where navigating to `route` ends up.
///
/// # Errors
///
/// Returns [`crate::MeetlogError::Validation`] for an unknown route.
pub fn run(app: &App, route: &str) -> Result<()> {
    let route: Route = route.parse()?;

    match app.navigate(route) {
        Navigation::Render(target) => println!("{}", target.to_string().green()),
        Navigation::Redirect(target) => println!(
            "{} {} {}",
            route.to_string().dimmed(),
            "->".dimmed(),
            target.to_string().yellow()
        ),
    }
    Ok(())
}
