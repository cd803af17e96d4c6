//! Recommendation workflow
//!
//! Combines a validated filter and a resolved coordinate into one backend
//! request. Ranking is the backend's job; results are passed through as-is.

use crate::api::{RecommendationApi, RecommendationRequest, RecommendedCoach};
use crate::discovery::filter::{validate_discovery_with, DiscoveryDefaults, DiscoveryFilter, DiscoveryForm};
use crate::discovery::location::LocationResolver;
use crate::discovery::summary::{summarize, ResultSummary};
use crate::error::{Error, Result};
use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Build the backend payload for a search at `at`
pub fn build_request(filter: &DiscoveryFilter, at: Coordinates) -> RecommendationRequest {
    RecommendationRequest {
        goal: filter.goal,
        budget_min: filter.budget_min,
        budget_max: filter.budget_max,
        latitude: at.lat,
        longitude: at.lng,
        max_distance_km: Some(filter.max_distance_km),
        take: Some(filter.take),
    }
}

/// Runs recommendation searches against an API
pub struct RecommendationWorkflow<'a, A> {
    api: &'a A,
}

impl<'a, A: RecommendationApi> RecommendationWorkflow<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Search with a validated filter
    ///
    /// Fails with [`Error::LocationUnavailable`] before any network call when
    /// no coordinate is known. Otherwise makes exactly one request.
    pub async fn execute(
        &self,
        filter: &DiscoveryFilter,
        location: Option<Coordinates>,
    ) -> Result<Vec<RecommendedCoach>> {
        let Some(at) = location else {
            warn!(mode = %filter.location_mode, "No coordinate for search");
            return Err(Error::LocationUnavailable);
        };

        let request = build_request(filter, at);
        info!(
            goal = ?request.goal,
            lat = request.latitude,
            lng = request.longitude,
            max_distance_km = filter.max_distance_km,
            take = filter.take,
            "Requesting recommendations"
        );

        let coaches = self.api.recommend(&request).await?;
        debug!(count = coaches.len(), "Received recommendations");
        Ok(coaches)
    }

    /// Validate a raw form, pick its coordinate and search
    pub async fn submit(
        &self,
        form: &DiscoveryForm,
        defaults: &DiscoveryDefaults,
        resolver: &LocationResolver,
    ) -> Result<Vec<RecommendedCoach>> {
        let filter = validate_discovery_with(form, defaults).map_err(Error::Validation)?;
        self.execute(&filter, resolver.coordinate_for(&filter)).await
    }
}

/// Identifies one search submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// What the results panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelView {
    /// No search submitted yet
    Idle,
    /// Latest search still in flight
    Loading,
    /// Results to list
    Results,
    /// A search finished with nothing to show
    Empty,
}

/// Results of the most recent search
///
/// Each submission gets a higher ticket than the last and only the latest
/// ticket may complete. A failed search keeps the previous results and sets
/// a single error message.
#[derive(Debug, Clone, Default)]
pub struct ResultsPanel {
    latest: u64,
    pending: bool,
    has_requested: bool,
    results: Option<Vec<RecommendedCoach>>,
    error: Option<String>,
}

impl ResultsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a submission
    pub fn begin(&mut self) -> SearchTicket {
        self.latest += 1;
        self.pending = true;
        self.has_requested = true;
        self.error = None;
        SearchTicket(self.latest)
    }

    /// Record a submission's outcome
    ///
    /// Returns false and changes nothing for a superseded ticket.
    pub fn complete(&mut self, ticket: SearchTicket, outcome: Result<Vec<RecommendedCoach>>) -> bool {
        match outcome {
            Ok(results) => self.succeed(ticket, results),
            Err(e) => self.fail(ticket, e.to_string()),
        }
    }

    pub fn succeed(&mut self, ticket: SearchTicket, results: Vec<RecommendedCoach>) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.pending = false;
        self.results = Some(results);
        self.error = None;
        true
    }

    /// Record a failure, keeping whatever results were already shown
    pub fn fail(&mut self, ticket: SearchTicket, message: impl Into<String>) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.pending = false;
        self.error = Some(message.into());
        true
    }

    fn accepts(&self, ticket: SearchTicket) -> bool {
        if ticket.0 != self.latest {
            debug!(ticket = ticket.0, latest = self.latest, "Ignoring superseded search");
            return false;
        }
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn has_requested(&self) -> bool {
        self.has_requested
    }

    pub fn results(&self) -> &[RecommendedCoach] {
        self.results.as_deref().unwrap_or_default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn summary(&self) -> Option<ResultSummary> {
        summarize(self.results())
    }

    pub fn view(&self) -> PanelView {
        if self.pending {
            PanelView::Loading
        } else if !self.results().is_empty() {
            PanelView::Results
        } else if self.has_requested {
            PanelView::Empty
        } else {
            PanelView::Idle
        }
    }
}
