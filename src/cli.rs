//! Command-line interface definition for Meetlog
//!
//! This module defines the CLI structure using clap's derive API. Each
//! subcommand maps onto one view or session operation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Meetlog - field meeting logger
///
/// Sign in, record customer meetings with location and photo, and review
/// what you have submitted.
#[derive(Parser, Debug, Clone)]
#[command(name = "meetlog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Store the session token in this file instead of the configured backend
    #[arg(long)]
    pub session_path: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Meetlog
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "MEETLOG_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account (does not sign in)
    Signup {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "MEETLOG_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show who is signed in
    Whoami,

    /// Submit a meeting entry
    Submit(SubmitArgs),

    /// List your submitted meetings, most recent first
    History {
        /// Print the records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Resolve where a route leads for the current session
    Open {
        /// Route path: /auth, /, /dashboard or /history
        route: String,
    },
}

/// Fields of the entry form
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SubmitArgs {
    /// Customer name (required)
    #[arg(long)]
    pub customer_name: String,

    /// Customer address
    #[arg(long, default_value = "")]
    pub address: String,

    /// Source: TeleCaller, OutSource or Other
    #[arg(long)]
    pub source: Option<String>,

    /// Replacement source when --source is Other
    #[arg(long)]
    pub source_name: Option<String>,

    /// Customer phone number
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Expected loan amount
    #[arg(long, default_value = "")]
    pub loan_expected: String,

    /// Product: "Personal Loan", "Home Loan", "Lap Loan" or "Business Loan"
    #[arg(long)]
    pub product: Option<String>,

    /// Meeting status, or Other
    #[arg(long)]
    pub status: Option<String>,

    /// Replacement status when --status is Other
    #[arg(long)]
    pub other_status: Option<String>,

    /// Free-text remark
    #[arg(long, default_value = "")]
    pub remark: String,

    /// Image file used as the camera (OutSource or Other sources only)
    #[arg(long)]
    pub photo: Option<PathBuf>,

    /// Latitude of the meeting place
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the meeting place
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
