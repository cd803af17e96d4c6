//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod auth;
pub mod browse;
pub mod config;
pub mod discover;
pub mod serve;
pub mod workspace;

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::session::{SessionContext, TokenStore};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Find coaches and gyms near you
#[derive(Parser)]
#[command(name = "fitspace")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search for recommended coaches
    Discover(discover::DiscoverArgs),

    /// Show the automatically detected location
    Locate(discover::LocateArgs),

    /// List coaches with roster statistics
    Coaches(browse::BrowseArgs),

    /// List partner gyms
    Gyms(browse::BrowseArgs),

    /// List clients
    Clients(browse::BrowseArgs),

    /// Manage a coach's portfolio, plans and reviews
    Workspace(workspace::WorkspaceArgs),

    /// Store an access token for backend requests
    Login(auth::LoginArgs),

    /// Forget the stored access token
    Logout,

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    if !matches!(cli.command, Commands::Serve(_)) {
        init_tracing("warn");
    }

    match cli.command {
        Commands::Discover(args) => discover::run(args).await,
        Commands::Locate(args) => discover::locate(args).await,
        Commands::Coaches(args) => browse::coaches(args).await,
        Commands::Gyms(args) => browse::gyms(args).await,
        Commands::Clients(args) => browse::clients(args).await,
        Commands::Workspace(args) => workspace::run(args).await,
        Commands::Login(args) => auth::login(args),
        Commands::Logout => auth::logout(),
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}

/// Install the log subscriber, honoring `RUST_LOG`
pub fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Backend client carrying the stored session token
pub(crate) fn connect(config: &Config) -> Result<ApiClient> {
    let session = SessionContext::persistent(TokenStore::new()?)?;
    ApiClient::from_config(config, session)
}
