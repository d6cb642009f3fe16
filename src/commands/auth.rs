//! Session commands: login, signup, logout, whoami

use colored::Colorize;

use crate::app::App;
use crate::error::{MeetlogError, Result};
use crate::routes::Route;

/// Signs in and reports who the session belongs to.
///
/// # Errors
///
/// Returns [`MeetlogError::Authentication`] when the backend refuses the
/// credentials or the issued token cannot be read.
pub async fn login(app: &App, email: &str, password: &str) -> Result<()> {
    let session = app.session();

    if !session.login(email, password).await {
        println!("{}", "Login failed. Check your email and password.".red());
        return Err(MeetlogError::Authentication("login rejected".to_string()).into());
    }

    match session.identity() {
        Some(identity) => {
            println!("{} {}", "Signed in as".green(), identity.display().bold());
            println!(
                "Continue at {}.",
                app.navigate(Route::Auth).destination().to_string().cyan()
            );
            Ok(())
        }
        None => {
            println!(
                "{}",
                "The server issued a session that could not be read. Please sign in again."
                    .yellow()
            );
            Err(MeetlogError::MalformedToken("issued token was purged".to_string()).into())
        }
    }
}

/// Registers an account. The user still has to sign in afterwards.
pub async fn signup(app: &App, name: &str, email: &str, password: &str) -> Result<()> {
    if !app.session().signup(name, email, password).await {
        println!("{}", "Signup failed.".red());
        return Err(MeetlogError::Authentication("signup rejected".to_string()).into());
    }

    println!("{}", "Account created.".green());
    println!("Sign in with {}.", "meetlog login --email <EMAIL>".cyan());
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    app.session().logout();
    println!("{}", "Signed out.".green());
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    match app.session().identity() {
        Some(identity) => {
            println!("{}", identity.display().bold());
            if identity.display_name.is_some() {
                println!("{}", identity.subject.dimmed());
            }
        }
        None => println!("{}", "Not signed in.".yellow()),
    }
    Ok(())
}
