//! Meetlog - field meeting logger library
//!
//! This library provides the core functionality for Meetlog: a bearer-token
//! session, an authentication guard over four routes, a meeting entry form
//! with location and photo capture, and a history of submitted meetings.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: token storage, identity decoding, login/signup/logout
//! - `routes`: navigation targets and the authentication guard
//! - `form` / `submission`: the entry form and its submit flow
//! - `history`: the list of submitted meetings
//! - `api`: HTTP clients for the authentication, meetings, and geocoding services
//! - `device`: location and camera access
//! - `notice`: transient user-facing notices
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli` / `commands`: command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use meetlog::{App, Config};
//! use meetlog::device::UnavailablePositionSource;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let app = App::from_config(&config, Arc::new(UnavailablePositionSource))?;
//!     let entries = app.history_view().refresh().await;
//!     println!("{} meetings", entries.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod device;
pub mod error;
pub mod form;
pub mod generation;
pub mod history;
pub mod logging;
pub mod meeting;
pub mod notice;
pub mod routes;
pub mod session;
pub mod submission;

// Re-export commonly used types
pub use app::App;
pub use config::Config;
pub use error::{MeetlogError, Result};
pub use routes::{guard, Navigation, Route};
pub use session::{Session, SessionController};
pub use submission::{SubmissionFlow, SubmitOutcome};

#[cfg(test)]
pub mod test_utils;
