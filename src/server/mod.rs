//! HTTP server for fitspace
//!
//! Serves the discovery front end and a JSON API over the backend.

pub mod routes;
pub mod state;

use crate::config::Config;
use crate::discovery::LocationMode;
use crate::error::Result;
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Start the HTTP server
///
/// In auto mode the device location is requested once in the background
/// at startup.
pub async fn run(config: Config) -> Result<()> {
    let addr: SocketAddr = config.server_addr().parse().map_err(|e| {
        crate::error::Error::Server(format!("Invalid server address: {}", e))
    })?;

    let initial_mode = config.discovery.location_mode;
    let state = Arc::new(AppState::new(config)?);

    if initial_mode == LocationMode::Auto {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            let geo = state.set_location_mode(LocationMode::Auto).await;
            info!(status = ?geo.status, "{}", geo.message);
        });
    }

    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await.map_err(|e| {
        crate::error::Error::Server(format!("Failed to bind to {}: {}", addr, e))
    })?;

    axum::serve(listener, app).await.map_err(|e| {
        crate::error::Error::Server(format!("Server error: {}", e))
    })?;

    Ok(())
}
