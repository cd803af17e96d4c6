//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::api::{CoachSummary, FitnessGoal, GymSummary};
use crate::discovery::{DiscoveryForm, GeoState, LocationMode};
use crate::error::Error;
use crate::form::FieldErrors;
use crate::format::SearchOutcome;
use crate::server::state::AppState;
use crate::workspace::RosterStats;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::warn;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Static files: ./static first, then next to the executable
    let static_path = if std::path::Path::new("static").exists() {
        "static".to_string()
    } else if let Ok(exe_path) = std::env::current_exe() {
        exe_path
            .parent()
            .map(|dir| dir.join("static"))
            .filter(|path| path.exists())
            .map(|path| path.to_string_lossy().to_string())
            .unwrap_or_else(|| "static".to_string())
    } else {
        "static".to_string()
    };

    Router::new()
        .route("/api/discover", post(discover_handler))
        .route("/api/results", get(results_handler))
        .route("/api/location", get(location_handler))
        .route("/api/location/mode", post(location_mode_handler))
        .route("/api/goals", get(goals_handler))
        .route("/api/coaches", get(coaches_handler))
        .route("/api/gyms", get(gyms_handler))
        .nest_service("/", ServeDir::new(&static_path).append_index_html_on_directories(true))
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    /// Per-field messages for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
    /// Backend status for transport failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Backend response body for transport failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            fields: None,
            status: None,
            details: None,
        }
    }

    /// HTTP status this error is served with
    pub fn status_code(&self) -> StatusCode {
        match self.code.as_str() {
            "VALIDATION_ERROR" => StatusCode::UNPROCESSABLE_ENTITY,
            "LOCATION_UNAVAILABLE" | "GEOLOCATION_ERROR" => StatusCode::BAD_REQUEST,
            "TRANSPORT_ERROR" | "MALFORMED_RESPONSE" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(fields) => ApiError {
                fields: Some(fields),
                ..ApiError::new("Validation failed", "VALIDATION_ERROR")
            },
            Error::LocationUnavailable => {
                ApiError::new(err.to_string(), "LOCATION_UNAVAILABLE")
            }
            Error::Transport(transport) => ApiError {
                status: transport.status,
                details: transport.details,
                ..ApiError::new(transport.message, "TRANSPORT_ERROR")
            },
            Error::MalformedResponse(_) => ApiError::new(err.to_string(), "MALFORMED_RESPONSE"),
            Error::GeolocationDenied(_) => ApiError::new(err.to_string(), "GEOLOCATION_ERROR"),
            Error::Config(_) => ApiError::new(err.to_string(), "CONFIG_ERROR"),
            _ => ApiError::new(err.to_string(), "INTERNAL_ERROR"),
        }
    }
}

/// Run a recommendation search
///
/// POST /api/discover
async fn discover_handler(
    State(state): State<Arc<AppState>>,
    Json(form): Json<DiscoveryForm>,
) -> Result<Json<SearchOutcome>, ApiError> {
    state.discover(&form).await.map(Json).map_err(|e| {
        warn!(error = %e, "Discovery failed");
        ApiError::from(e)
    })
}

/// Latest search outcome
///
/// GET /api/results
async fn results_handler(State(state): State<Arc<AppState>>) -> Json<SearchOutcome> {
    Json(state.results().await)
}

/// Device location state
///
/// GET /api/location
async fn location_handler(State(state): State<Arc<AppState>>) -> Json<GeoState> {
    Json(state.location().await)
}

/// Location mode switch request
#[derive(Debug, Deserialize)]
pub struct LocationModeRequest {
    pub mode: String,
}

/// Switch location mode
///
/// POST /api/location/mode
async fn location_mode_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LocationModeRequest>,
) -> Result<Json<GeoState>, ApiError> {
    let mode = LocationMode::from_str(&req.mode).map_err(|message| {
        let mut fields = FieldErrors::new();
        fields.insert("locationMode", message);
        ApiError::from(Error::Validation(fields))
    })?;

    Ok(Json(state.set_location_mode(mode).await))
}

/// Goal option for the discovery form
#[derive(Debug, Serialize, Deserialize)]
pub struct GoalOption {
    pub value: String,
    pub label: String,
}

/// List fitness goals
///
/// GET /api/goals
async fn goals_handler() -> Json<Vec<GoalOption>> {
    let goals = FitnessGoal::ALL
        .iter()
        .map(|goal| GoalOption {
            value: goal.as_str().to_string(),
            label: goal.label().to_string(),
        })
        .collect();
    Json(goals)
}

/// Coach directory response
#[derive(Debug, Serialize, Deserialize)]
pub struct CoachesResponse {
    pub coaches: Vec<CoachSummary>,
    pub stats: RosterStats,
}

/// List coaches with roster statistics
///
/// GET /api/coaches
async fn coaches_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CoachesResponse>, ApiError> {
    let coaches = state.client.get_coaches().await?;
    let stats = RosterStats::from(coaches.as_slice());
    Ok(Json(CoachesResponse { coaches, stats }))
}

/// List gyms
///
/// GET /api/gyms
async fn gyms_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GymSummary>>, ApiError> {
    Ok(Json(state.client.get_gyms().await?))
}
