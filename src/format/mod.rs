//! Output formatters
//!
//! Provides trait-based output formatting for search outcomes.

pub mod json;
pub mod text;

use crate::api::RecommendedCoach;
use crate::constants::messages::{NO_MATCHES, NO_SEARCH_YET};
use crate::discovery::{summarize, GeoState, PanelView, ResultSummary, ResultsPanel};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Everything a results view renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub view: PanelView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoState>,
    pub results: Vec<RecommendedCoach>,
    pub summary: Option<ResultSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchOutcome {
    /// Snapshot a results panel
    pub fn from_panel(panel: &ResultsPanel) -> Self {
        Self {
            view: panel.view(),
            location: None,
            results: panel.results().to_vec(),
            summary: panel.summary(),
            error: panel.error().map(str::to_string),
        }
    }

    /// Outcome of a single completed search
    pub fn from_results(results: Vec<RecommendedCoach>) -> Self {
        let view = if results.is_empty() { PanelView::Empty } else { PanelView::Results };
        Self {
            view,
            location: None,
            summary: summarize(&results),
            results,
            error: None,
        }
    }

    pub fn with_location(mut self, location: GeoState) -> Self {
        self.location = Some(location);
        self
    }

    /// Placeholder text when there are no results to list
    pub fn empty_message(&self) -> Option<&'static str> {
        match self.view {
            PanelView::Empty => Some(NO_MATCHES),
            PanelView::Idle => Some(NO_SEARCH_YET),
            PanelView::Loading | PanelView::Results => None,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Render a search outcome
    fn format(&self, outcome: &SearchOutcome) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    vec![
        FormatInfo {
            name: "json".to_string(),
            description: "Results and summary as JSON".to_string(),
        },
        FormatInfo {
            name: "text".to_string(),
            description: "Human-readable result cards".to_string(),
        },
    ]
}

#[cfg(test)]
pub(crate) fn sample_coach(id: i64, rating: f64, price: f64) -> RecommendedCoach {
    RecommendedCoach {
        coach_id: id,
        coach_name: format!("Coach {}", id),
        specialization: "Strength".to_string(),
        distance_km: 3.25,
        gym_id: 40 + id,
        gym_name: "Iron Works".to_string(),
        min_plan_price: price,
        avg_rating: rating,
        reviews_count: 12,
        matching_plan_titles: None,
    }
}
