//! Location resolution for discovery searches
//!
//! In auto mode the device is asked once per activation; in manual mode the
//! validated form coordinates are used directly. Every activation bumps a
//! generation counter so a lookup started under an older activation cannot
//! overwrite the current state.

use crate::constants::messages::{GEO_FAILED, GEO_IDLE, GEO_LOADING, GEO_UNSUPPORTED};
use crate::constants::timing::GEOLOCATION_TIMEOUT_SECS;
use crate::discovery::filter::DiscoveryFilter;
use crate::geo::{Coordinates, DeviceLocator, GeolocationFailure};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Where the search coordinate comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    #[default]
    Auto,
    Manual,
}

impl fmt::Display for LocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationMode::Auto => write!(f, "auto"),
            LocationMode::Manual => write!(f, "manual"),
        }
    }
}

impl FromStr for LocationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(LocationMode::Auto),
            "manual" => Ok(LocationMode::Manual),
            _ => Err("Location mode must be auto or manual".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Device location state shown next to the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoState {
    pub status: GeoStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinates>,
    pub message: String,
}

impl GeoState {
    pub fn idle() -> Self {
        Self {
            status: GeoStatus::Idle,
            coordinate: None,
            message: GEO_IDLE.to_string(),
        }
    }

    pub fn loading() -> Self {
        Self {
            status: GeoStatus::Loading,
            coordinate: None,
            message: GEO_LOADING.to_string(),
        }
    }

    pub fn located(coordinate: Coordinates) -> Self {
        Self {
            status: GeoStatus::Success,
            coordinate: Some(coordinate),
            message: format!(
                "Location set (lat {:.2}, lon {:.2})",
                coordinate.lat, coordinate.lng
            ),
        }
    }

    pub fn failed(failure: &GeolocationFailure) -> Self {
        let message = match failure {
            GeolocationFailure::Unsupported => GEO_UNSUPPORTED,
            GeolocationFailure::Denied(_) | GeolocationFailure::Timeout => GEO_FAILED,
        };
        Self {
            status: GeoStatus::Error,
            coordinate: None,
            message: message.to_string(),
        }
    }
}

impl Default for GeoState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Proof that a device lookup belongs to a particular activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocateTicket {
    generation: u64,
}

/// Tracks the location mode and the device lookup for the current activation
#[derive(Debug, Clone)]
pub struct LocationResolver {
    mode: LocationMode,
    state: GeoState,
    generation: u64,
    timeout: Duration,
}

impl LocationResolver {
    /// Resolver in auto mode that has not asked the device yet
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(GEOLOCATION_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            mode: LocationMode::Auto,
            state: GeoState::idle(),
            generation: 0,
            timeout,
        }
    }

    pub fn mode(&self) -> LocationMode {
        self.mode
    }

    pub fn state(&self) -> &GeoState {
        &self.state
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Switch to `mode`, discarding any earlier resolution
    ///
    /// Returns a ticket in auto mode; the caller runs exactly one lookup with
    /// it and hands the outcome to [`complete`](Self::complete).
    pub fn activate(&mut self, mode: LocationMode) -> Option<LocateTicket> {
        self.mode = mode;
        self.generation += 1;
        debug!(%mode, generation = self.generation, "Location mode activated");

        match mode {
            LocationMode::Auto => {
                self.state = GeoState::loading();
                Some(LocateTicket {
                    generation: self.generation,
                })
            }
            LocationMode::Manual => {
                self.state = GeoState::idle();
                None
            }
        }
    }

    /// Apply a lookup outcome
    ///
    /// Returns false and changes nothing when the ticket is from an older
    /// activation.
    pub fn complete(
        &mut self,
        ticket: LocateTicket,
        outcome: Result<Coordinates, GeolocationFailure>,
    ) -> bool {
        if ticket.generation != self.generation || self.mode != LocationMode::Auto {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Dropping stale location result"
            );
            return false;
        }

        self.state = match outcome {
            Ok(coordinate) => {
                info!(lat = coordinate.lat, lng = coordinate.lng, "Device location resolved");
                GeoState::located(coordinate)
            }
            Err(failure) => {
                info!(%failure, "Device location unavailable");
                GeoState::failed(&failure)
            }
        };
        true
    }

    /// Activate `mode` and, in auto mode, run the single device lookup
    pub async fn activate_and_locate<L: DeviceLocator>(
        &mut self,
        mode: LocationMode,
        locator: &L,
    ) -> &GeoState {
        if let Some(ticket) = self.activate(mode) {
            let outcome = lookup(locator, self.timeout).await;
            self.complete(ticket, outcome);
        }
        &self.state
    }

    /// The coordinate a search should use, if one is known
    pub fn coordinate_for(&self, filter: &DiscoveryFilter) -> Option<Coordinates> {
        match filter.location_mode {
            LocationMode::Manual => filter
                .latitude
                .zip(filter.longitude)
                .map(|(lat, lng)| Coordinates::new(lat, lng)),
            LocationMode::Auto if self.mode == LocationMode::Auto => self.state.coordinate,
            LocationMode::Auto => None,
        }
    }
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Ask `locator` for a position once, bounded by `timeout`
pub async fn lookup<L: DeviceLocator>(
    locator: &L,
    timeout: Duration,
) -> Result<Coordinates, GeolocationFailure> {
    if !locator.is_available() {
        return Err(GeolocationFailure::Unsupported);
    }

    match tokio::time::timeout(timeout, locator.current_position()).await {
        Ok(outcome) => outcome,
        Err(_) => Err(GeolocationFailure::Timeout),
    }
}
