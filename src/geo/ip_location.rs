//! IP-based geolocation
//!
//! Uses ip-api.com as the device location source, with file-based caching.

use crate::config::defaults::APP_DIR_NAME;
use crate::constants::api::IP_API_URL;
use crate::constants::cache::{IP_LOCATION_CACHE_FILE, IP_LOCATION_TTL_SECS};
use crate::error::{Error, Result};
use crate::geo::{Coordinates, DeviceLocator, GeolocationFailure};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// A position resolved from the public IP address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpLocation {
    pub coords: Coordinates,
    /// City, region and country when known
    pub display_name: String,
}

/// IP location service with caching
#[derive(Debug)]
pub struct IpLocator {
    client: reqwest::Client,
    endpoint: String,
    cache_path: Option<PathBuf>,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    country: Option<String>,
    message: Option<String>,
}

/// Cached location data
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedLocation {
    location: IpLocation,
    fetched_at: DateTime<Utc>,
}

impl IpLocator {
    /// Create a new IP locator with default cache path
    pub fn new() -> Self {
        let cache_path = dirs::cache_dir()
            .map(|p| p.join(APP_DIR_NAME).join(IP_LOCATION_CACHE_FILE));

        Self {
            client: reqwest::Client::new(),
            endpoint: IP_API_URL.to_string(),
            cache_path,
        }
    }

    /// Create an IP locator with a specific cache path
    pub fn with_cache_path(cache_path: PathBuf) -> Self {
        Self {
            cache_path: Some(cache_path),
            ..Self::without_cache()
        }
    }

    /// Create an IP locator without caching
    pub fn without_cache() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: IP_API_URL.to_string(),
            cache_path: None,
        }
    }

    /// Query a different endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Get current location based on IP address
    pub async fn locate(&self) -> Result<IpLocation> {
        if let Some(cached) = self.load_cache() {
            debug!(place = %cached.display_name, "Using cached IP location");
            return Ok(cached);
        }

        let location = self.fetch_location().await?;
        self.save_cache(&location);

        Ok(location)
    }

    /// Fetch location from ip-api.com
    async fn fetch_location(&self) -> Result<IpLocation> {
        let response = self.client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| Error::GeolocationDenied(format!("IP location request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::GeolocationDenied(format!(
                "IP location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| Error::MalformedResponse(format!("IP location response: {}", e)))?;

        parse_response(data)
    }

    /// Load cached location if valid
    fn load_cache(&self) -> Option<IpLocation> {
        let cache_path = self.cache_path.as_ref()?;

        if !cache_path.exists() {
            return None;
        }

        let content = fs::read_to_string(cache_path).ok()?;
        let cached: CachedLocation = serde_json::from_str(&content).ok()?;

        if Utc::now() - cached.fetched_at < Self::cache_duration() {
            Some(cached.location)
        } else {
            None
        }
    }

    /// Save location to cache
    fn save_cache(&self, location: &IpLocation) {
        let Some(cache_path) = &self.cache_path else {
            return;
        };

        if let Some(parent) = cache_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let cached = CachedLocation {
            location: location.clone(),
            fetched_at: Utc::now(),
        };

        if let Ok(content) = serde_json::to_string_pretty(&cached) {
            if let Err(e) = fs::write(cache_path, content) {
                warn!(error = %e, "Failed to write IP location cache");
            }
        }
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        if let Some(cache_path) = &self.cache_path {
            let _ = fs::remove_file(cache_path);
        }
    }

    /// Get cache duration
    pub fn cache_duration() -> Duration {
        Duration::seconds(IP_LOCATION_TTL_SECS)
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceLocator for IpLocator {
    async fn current_position(&self) -> std::result::Result<Coordinates, GeolocationFailure> {
        match self.locate().await {
            Ok(location) => Ok(location.coords),
            Err(e) => {
                warn!(error = %e, "IP location lookup failed");
                Err(GeolocationFailure::Denied(e.to_string()))
            }
        }
    }
}

fn parse_response(data: IpApiResponse) -> Result<IpLocation> {
    if data.status != "success" {
        return Err(Error::GeolocationDenied(format!(
            "IP location lookup failed: {}",
            data.message.unwrap_or_else(|| data.status.clone())
        )));
    }

    let lat = data
        .lat
        .ok_or_else(|| Error::MalformedResponse("No latitude in IP location response".to_string()))?;
    let lng = data
        .lon
        .ok_or_else(|| Error::MalformedResponse("No longitude in IP location response".to_string()))?;

    let coords = Coordinates::new(lat, lng);
    coords
        .validate()
        .map_err(|e| Error::MalformedResponse(format!("IP location response: {}", e)))?;

    let display_name = [data.city, data.region_name, data.country]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");

    Ok(IpLocation {
        coords,
        display_name: if display_name.is_empty() {
            "Unknown Location".to_string()
        } else {
            display_name
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{spawn_backend, unreachable_url};
    use axum::routing::get;
    use axum::{Json, Router};
    use tempfile::TempDir;

    fn sample() -> IpLocation {
        IpLocation {
            coords: Coordinates::new(24.7136, 46.6753),
            display_name: "Riyadh, Riyadh Region, Saudi Arabia".to_string(),
        }
    }

    #[test]
    fn test_ip_locator_creation() {
        let locator = IpLocator::new();
        assert!(locator.cache_path.is_some());
        assert!(IpLocator::without_cache().cache_path.is_none());
    }

    #[test]
    fn test_cache_operations() {
        let temp_dir = TempDir::new().unwrap();
        let cache_path = temp_dir.path().join("test_cache.json");
        let locator = IpLocator::with_cache_path(cache_path);

        assert!(locator.load_cache().is_none());

        locator.save_cache(&sample());
        let loaded = locator.load_cache().unwrap();
        assert_eq!(loaded, sample());

        locator.clear_cache();
        assert!(locator.load_cache().is_none());
    }

    #[test]
    fn test_expired_cache_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let cache_path = temp_dir.path().join("stale.json");
        let stale = CachedLocation {
            location: sample(),
            fetched_at: Utc::now() - Duration::hours(2),
        };
        fs::write(&cache_path, serde_json::to_string(&stale).unwrap()).unwrap();

        let locator = IpLocator::with_cache_path(cache_path);
        assert!(locator.load_cache().is_none());
    }

    #[test]
    fn test_parse_failed_lookup() {
        let data = IpApiResponse {
            status: "fail".to_string(),
            lat: None,
            lon: None,
            city: None,
            region_name: None,
            country: None,
            message: Some("private range".to_string()),
        };
        assert!(matches!(parse_response(data), Err(Error::GeolocationDenied(_))));
    }

    #[test]
    fn test_parse_out_of_range_coordinates() {
        let data = IpApiResponse {
            status: "success".to_string(),
            lat: Some(120.0),
            lon: Some(46.6753),
            city: None,
            region_name: None,
            country: None,
            message: None,
        };
        assert!(matches!(parse_response(data), Err(Error::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_device_position_from_endpoint() {
        let router = Router::new().route(
            "/json",
            get(|| async {
                Json(serde_json::json!({
                    "status": "success", "lat": 24.7136, "lon": 46.6753,
                    "city": "Riyadh", "country": "Saudi Arabia"
                }))
            }),
        );
        let base = spawn_backend(router).await;
        let locator = IpLocator::without_cache().with_endpoint(format!("{}/json", base));

        let coords = locator.current_position().await.unwrap();
        assert_eq!(coords, Coordinates::new(24.7136, 46.6753));
        assert_eq!(locator.locate().await.unwrap().display_name, "Riyadh, Saudi Arabia");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_denied() {
        let locator = IpLocator::without_cache().with_endpoint(unreachable_url().await);
        assert!(matches!(
            locator.current_position().await,
            Err(GeolocationFailure::Denied(_))
        ));
    }
}
