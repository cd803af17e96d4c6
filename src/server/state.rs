//! Server shared state
//!
//! One location resolver and one results panel, shared by every request.

use crate::client::ApiClient;
use crate::config::Config;
use crate::discovery::location::lookup;
use crate::discovery::{
    validate_discovery_with, DiscoveryForm, GeoState, LocationMode, LocationResolver,
    RecommendationWorkflow, ResultsPanel,
};
use crate::error::{Error, Result};
use crate::format::SearchOutcome;
use crate::geo::{require_device_locator, AnyLocator};
use crate::session::{SessionContext, TokenStore};
use tokio::sync::Mutex;
use tracing::warn;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    /// Backend client
    pub client: ApiClient,

    locator: AnyLocator,
    resolver: Mutex<LocationResolver>,
    panel: Mutex<ResultsPanel>,
}

impl AppState {
    /// Create new application state
    ///
    /// Falls back to an in-memory session when the token store is unusable.
    /// Fails on an unknown `discovery.locator`.
    pub fn new(config: Config) -> Result<Self> {
        let session = TokenStore::new()
            .and_then(SessionContext::persistent)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Token store unavailable, using in-memory session");
                SessionContext::ephemeral()
            });
        let client = ApiClient::from_config(&config, session)?;
        let locator = require_device_locator(&config.discovery.locator)?;
        Ok(Self::with_parts(config, client, locator))
    }

    pub fn with_parts(config: Config, client: ApiClient, locator: AnyLocator) -> Self {
        Self {
            config,
            client,
            locator,
            resolver: Mutex::new(LocationResolver::new()),
            panel: Mutex::new(ResultsPanel::new()),
        }
    }

    /// Current device location state
    pub async fn location(&self) -> GeoState {
        self.resolver.lock().await.state().clone()
    }

    /// Switch location mode; auto mode asks the device once
    ///
    /// The lock is released during the lookup, so a later switch makes this
    /// lookup's result stale rather than waiting for it.
    pub async fn set_location_mode(&self, mode: LocationMode) -> GeoState {
        let (ticket, timeout) = {
            let mut resolver = self.resolver.lock().await;
            (resolver.activate(mode), resolver.timeout())
        };

        if let Some(ticket) = ticket {
            let outcome = lookup(&self.locator, timeout).await;
            self.resolver.lock().await.complete(ticket, outcome);
        }

        self.location().await
    }

    /// Validate, search and record the outcome in the panel
    ///
    /// Validation failures leave the panel untouched. Search failures are
    /// recorded in the panel and returned.
    pub async fn discover(&self, form: &DiscoveryForm) -> Result<SearchOutcome> {
        let filter = validate_discovery_with(form, &self.config.discovery_defaults())
            .map_err(Error::Validation)?;

        let (coordinate, location) = {
            let resolver = self.resolver.lock().await;
            (resolver.coordinate_for(&filter), resolver.state().clone())
        };

        let ticket = self.panel.lock().await.begin();
        let outcome = RecommendationWorkflow::new(&self.client)
            .execute(&filter, coordinate)
            .await;

        let mut panel = self.panel.lock().await;
        match outcome {
            Ok(results) => {
                panel.succeed(ticket, results);
                Ok(SearchOutcome::from_panel(&panel).with_location(location))
            }
            Err(e) => {
                panel.fail(ticket, e.to_string());
                Err(e)
            }
        }
    }

    /// Snapshot of the results panel
    pub async fn results(&self) -> SearchOutcome {
        let location = self.location().await;
        SearchOutcome::from_panel(&*self.panel.lock().await).with_location(location)
    }
}
