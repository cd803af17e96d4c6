//! fitspace: coach and gym discovery
//!
//! A library, CLI and local web front for a fitness marketplace backend.
//!
//! ## Features
//!
//! - Validated recommendation search by goal, budget, distance and location
//! - Automatic (IP) or manual location with stale-result protection
//! - Coach workspace forms for portfolio posts, training plans and reviews
//! - Bearer token session shared explicitly with the HTTP client
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fitspace::client::ApiClient;
//! use fitspace::discovery::{validate_discovery, DiscoveryForm, RecommendationWorkflow};
//! use fitspace::geo::Coordinates;
//! use fitspace::session::SessionContext;
//! use std::time::Duration;
//!
//! # async fn demo() -> fitspace::Result<()> {
//! let client = ApiClient::new(
//!     "http://localhost:5000",
//!     Duration::from_secs(15),
//!     SessionContext::ephemeral(),
//! )?;
//!
//! let form = DiscoveryForm {
//!     goal: Some("WeightLoss".to_string()),
//!     ..Default::default()
//! };
//! let filter = validate_discovery(&form).map_err(fitspace::Error::Validation)?;
//!
//! let riyadh = Coordinates::new(24.7136, 46.6753);
//! let coaches = RecommendationWorkflow::new(&client)
//!     .execute(&filter, Some(riyadh))
//!     .await?;
//! println!("Found {} coaches", coaches.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod form;
pub mod format;
pub mod geo;
pub mod server;
pub mod session;
pub mod workspace;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use api::{FitnessGoal, RecommendationRequest, RecommendedCoach};
pub use client::ApiClient;
pub use config::Config;
pub use discovery::{DiscoveryFilter, DiscoveryForm, LocationMode};
pub use error::{Error, Result, TransportError};
pub use geo::Coordinates;
pub use session::SessionContext;
