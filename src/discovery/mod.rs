//! Coach discovery
//!
//! The recommendation search: form validation, location resolution, the
//! request workflow and the result summary.
//!
//! ## Flow
//! raw form → [`filter::validate_discovery`] → [`location::LocationResolver`]
//! → [`workflow::RecommendationWorkflow`] → [`workflow::ResultsPanel`]
//! → [`summary::summarize`]

pub mod filter;
pub mod location;
pub mod summary;
pub mod workflow;

pub use filter::{validate_discovery, validate_discovery_with, DiscoveryDefaults, DiscoveryField, DiscoveryFilter, DiscoveryForm};
pub use location::{GeoState, GeoStatus, LocationMode, LocationResolver};
pub use summary::{summarize, ResultSummary};
pub use workflow::{build_request, PanelView, RecommendationWorkflow, ResultsPanel, SearchTicket};
