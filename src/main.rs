//! Armarium - Library Management Client
//!
//! Command-line front end for an Armarium library server.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use armarium_client::{App, AppConfig};

mod cli;
mod commands;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;

    // Initialize tracing; an explicit --log-level wins over config
    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("armarium_client={}", level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(
        server = %config.api.base_url,
        "Armarium client v{}",
        env!("CARGO_PKG_VERSION")
    );

    let app = App::new(config).context("failed to initialize the client")?;

    let result = match args.command {
        Command::Login { email, password } => commands::login(&app, &email, &password).await,
        Command::Logout => commands::logout(&app),
        Command::Whoami => commands::whoami(&app),
        Command::Register {
            name,
            email,
            password,
            confirm_password,
        } => commands::register(&app, name, email, password, confirm_password).await,
        Command::RegisterLibrarian {
            name,
            email,
            password,
            confirm_password,
        } => commands::register_librarian(&app, name, email, password, confirm_password).await,
        Command::Books { command } => commands::books(&app, command).await,
        Command::Loans { command } => commands::loans(&app, command).await,
        Command::People { command } => commands::people(&app, command).await,
        Command::Summary => commands::summary(&app).await,
        Command::Lookup { isbn } => commands::lookup(&app, &isbn).await,
        Command::Scan => commands::scan(&app).await,
    };

    if let Err(e) = result {
        eprintln!("error: {}", e.user_message());
        std::process::exit(1);
    }
    Ok(())
}
