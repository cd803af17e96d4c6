//! Location acquisition
//!
//! Coordinates plus the device location capability used in auto mode.

pub mod ip_location;

pub use ip_location::{IpLocation, IpLocator};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(format!("Latitude {} is out of range [-90, 90]", self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(format!("Longitude {} is out of range [-180, 180]", self.lng));
        }
        Ok(())
    }
}

/// Why the device could not supply a position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeolocationFailure {
    #[error("location capability not available")]
    Unsupported,

    #[error("location request declined: {0}")]
    Denied(String),

    #[error("location request timed out")]
    Timeout,
}

impl From<GeolocationFailure> for Error {
    fn from(failure: GeolocationFailure) -> Self {
        Error::GeolocationDenied(failure.to_string())
    }
}

/// A source of the device's current position
pub trait DeviceLocator: Send + Sync {
    /// Whether the capability exists at all
    fn is_available(&self) -> bool {
        true
    }

    /// Ask for the current position once
    fn current_position(
        &self,
    ) -> impl Future<Output = std::result::Result<Coordinates, GeolocationFailure>> + Send;
}

/// Always reports the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub Coordinates);

impl DeviceLocator for FixedLocator {
    async fn current_position(&self) -> std::result::Result<Coordinates, GeolocationFailure> {
        Ok(self.0)
    }
}

/// No location capability
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocator;

impl DeviceLocator for NoLocator {
    fn is_available(&self) -> bool {
        false
    }

    async fn current_position(&self) -> std::result::Result<Coordinates, GeolocationFailure> {
        Err(GeolocationFailure::Unsupported)
    }
}

/// Locator chosen by name at runtime
#[derive(Debug)]
pub enum AnyLocator {
    Ip(ip_location::IpLocator),
    Fixed(FixedLocator),
    None(NoLocator),
}

impl DeviceLocator for AnyLocator {
    fn is_available(&self) -> bool {
        match self {
            AnyLocator::Ip(l) => l.is_available(),
            AnyLocator::Fixed(l) => l.is_available(),
            AnyLocator::None(l) => l.is_available(),
        }
    }

    async fn current_position(&self) -> std::result::Result<Coordinates, GeolocationFailure> {
        match self {
            AnyLocator::Ip(l) => l.current_position().await,
            AnyLocator::Fixed(l) => l.current_position().await,
            AnyLocator::None(l) => l.current_position().await,
        }
    }
}

/// Names accepted by [`get_device_locator`]
pub const LOCATOR_NAMES: [&str; 3] = ["ip", "none", "off"];

/// Get a device locator by name
///
/// "ip" uses IP geolocation; "none" and "off" disable automatic location
pub fn get_device_locator(name: &str) -> Option<AnyLocator> {
    match name.to_lowercase().as_str() {
        "ip" => Some(AnyLocator::Ip(ip_location::IpLocator::new())),
        "none" | "off" => Some(AnyLocator::None(NoLocator)),
        _ => None,
    }
}

/// Like [`get_device_locator`], failing with a config error for unknown names
pub fn require_device_locator(name: &str) -> Result<AnyLocator> {
    get_device_locator(name).ok_or_else(|| {
        Error::Config(format!(
            "Unknown locator: {} (expected one of: {})",
            name,
            LOCATOR_NAMES.join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validation() {
        assert!(Coordinates::new(24.7136, 46.6753).validate().is_ok());
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(90.5, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.1).validate().is_err());
    }

    #[tokio::test]
    async fn test_fixed_locator() {
        let locator = FixedLocator(Coordinates::new(1.0, 2.0));
        assert!(locator.is_available());
        assert_eq!(locator.current_position().await, Ok(Coordinates::new(1.0, 2.0)));
    }

    #[tokio::test]
    async fn test_no_locator() {
        let locator = NoLocator;
        assert!(!locator.is_available());
        assert_eq!(
            locator.current_position().await,
            Err(GeolocationFailure::Unsupported)
        );
    }

    #[test]
    fn test_get_device_locator() {
        assert!(matches!(get_device_locator("none"), Some(AnyLocator::None(_))));
        assert!(matches!(get_device_locator("OFF"), Some(AnyLocator::None(_))));
        assert!(matches!(get_device_locator("ip"), Some(AnyLocator::Ip(_))));
    }

    #[test]
    fn test_unknown_locator_rejected() {
        assert!(get_device_locator("npne").is_none());
        let err = require_device_locator("npne").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("Unknown locator: npne"));
    }

    #[test]
    fn test_failure_becomes_geolocation_error() {
        let err: Error = GeolocationFailure::Timeout.into();
        assert!(matches!(err, Error::GeolocationDenied(_)));
    }
}
