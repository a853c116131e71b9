//! albumctl - album CRUD service
//!
//! Entry point wiring: `.env` -> database config -> pool -> schema -> router
//! -> listener.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use commands::serve::ServeArgs;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "albumctl",
    author,
    version,
    about = "HTTP service for creating, reading, updating, and deleting albums",
    long_about = "Serve a JSON API over a PostgreSQL albums table. Database connection \
                  parameters come from DB_HOST, DB_PORT, DB_USER, DB_NAME and DB_PASSWORD \
                  (also read from ./.env or ~/.albumctl/.env)."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces to an OTLP endpoint (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Create the albums table if it does not exist, then exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let dotenv = config::load_dotenv();
    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;
    dotenv.log();

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Migrate => commands::migrate::run_migrate().await,
    };

    tracing_setup::shutdown_otel();
    result
}
