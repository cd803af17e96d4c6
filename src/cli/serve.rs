//! Serve command handler
//!
//! Starts the HTTP server in foreground mode.

use crate::cli::init_tracing;
use crate::config::Config;
use crate::error::Result;
use crate::server;
use clap::Args;
use tracing::info;

/// Serve command arguments
#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Backend base URL
    #[arg(long)]
    pub api_url: Option<String>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    init_tracing("info");

    // Load and optionally override config
    let mut config = Config::load()?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(api_url) = args.api_url {
        config.api.base_url = api_url;
    }

    info!(
        "Starting fitspace server v{} on {} (backend {})",
        env!("CARGO_PKG_VERSION"),
        config.server_addr(),
        config.api_base_url()
    );

    server::run(config).await
}
