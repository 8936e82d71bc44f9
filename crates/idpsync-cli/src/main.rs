//! idpsync - apply declared htpasswd users to a cluster identity provider

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;

use config::Settings;
use idpsync_ocm::Connection;

#[derive(Parser)]
#[command(name = "idpsync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace the identity provider's htpasswd users with the declared ones
    Apply(commands::ApplyArgs),

    /// Print the usernames currently held by the identity provider
    List(commands::ListArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let settings = Settings::load().context("Failed to load configuration")?;
    debug!("Configuration loaded: {:?}", settings);

    let connection = Connection::new(settings.api.connection_config())
        .context("Failed to create API connection")?;

    match cli.command {
        Commands::Apply(args) => commands::apply(&connection, args).await,
        Commands::List(args) => commands::list(&connection, args).await,
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,idpsync=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
