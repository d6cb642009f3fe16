//! Meetlog - field meeting logger CLI
//!
#![doc = "Meetlog - field meeting logger CLI"]
#![doc = "Main entry point for the Meetlog application."]

use std::sync::Arc;

use anyhow::Result;

use meetlog::app::App;
use meetlog::cli::{Cli, Commands};
use meetlog::commands;
use meetlog::config::Config;
use meetlog::device::{Coordinates, FixedPositionSource, PositionSource, UnavailablePositionSource};
use meetlog::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration; its warnings go to a temporary stderr subscriber
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = logging::with_bootstrap_logging(|| Config::load(config_path, &cli))?;

    // Initialize tracing
    logging::init_logging(&config.logging)?;

    // Validate configuration
    config.validate()?;

    let app = App::from_config(&config, position_source(&cli.command))?;

    // Execute command
    match cli.command {
        Commands::Login { email, password } => {
            tracing::info!("Starting login");
            commands::auth::login(&app, &email, &password).await
        }
        Commands::Signup {
            name,
            email,
            password,
        } => {
            tracing::info!("Starting signup");
            commands::auth::signup(&app, &name, &email, &password).await
        }
        Commands::Logout => commands::auth::logout(&app),
        Commands::Whoami => commands::auth::whoami(&app),
        Commands::Submit(args) => {
            tracing::info!("Starting submission");
            commands::submit::run(&app, args).await
        }
        Commands::History { json } => {
            tracing::info!("Starting history command");
            commands::history::handle_history(&app, json).await
        }
        Commands::Open { route } => commands::open::run(&app, &route),
    }
}

/// Coordinates given on the command line act as the device position;
/// without them no position is available.
fn position_source(command: &Commands) -> Arc<dyn PositionSource> {
    match command {
        Commands::Submit(args) => match (args.lat, args.lon) {
            (Some(latitude), Some(longitude)) => Arc::new(FixedPositionSource(Coordinates {
                latitude,
                longitude,
            })),
            _ => Arc::new(UnavailablePositionSource),
        },
        _ => Arc::new(UnavailablePositionSource),
    }
}
