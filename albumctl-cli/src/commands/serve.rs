//! HTTP server command

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use albumctl_server::http::{run_server, AppState, ServerConfig};
use albumctl_server::PgAlbumRepo;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "ALBUMCTL_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let pool = super::open_database().await?;
    let state = AppState::new(Arc::new(PgAlbumRepo::new(pool)));

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    tracing::info!("Starting albumctl server on {}", config.bind_addr);

    // Blocks until shutdown
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
