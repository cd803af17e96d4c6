//! Centralized constants for the fitspace crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Session storage
pub mod storage {
    /// Key the bearer token is stored under
    pub const TOKEN_KEY: &str = "fitspace.token";

    /// Session file name inside the data directory
    pub const SESSION_FILE_NAME: &str = "session.json";
}

/// Backend routes
pub mod api {
    pub const COACHES: &str = "/api/Coaches";
    pub const GYMS: &str = "/api/Gyms";
    pub const CLIENTS: &str = "/api/Clients";
    pub const RECOMMENDATIONS: &str = "/api/Recommendations";
    pub const PORTFOLIO: &str = "/api/Portfolio";
    pub const TRAINING_PLANS: &str = "/api/TrainingPlans";
    pub const REVIEWS: &str = "/api/Reviews";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";
}

/// Timeouts
pub mod timing {
    /// Backend request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 15;

    /// Device location lookup timeout in seconds
    pub const GEOLOCATION_TIMEOUT_SECS: u64 = 8;
}

/// Cache settings
pub mod cache {
    /// IP location cache duration in seconds (1 hour)
    pub const IP_LOCATION_TTL_SECS: i64 = 3600;

    /// IP location cache file name
    pub const IP_LOCATION_CACHE_FILE: &str = "ip_location_cache.json";
}

/// User-facing messages
pub mod messages {
    pub const LOCATION_UNAVAILABLE: &str =
        "Location not available. Allow automatic access or enter coordinates manually.";
    pub const GEO_IDLE: &str = "Use automatic location or enter coordinates.";
    pub const GEO_LOADING: &str = "Locating...";
    pub const GEO_UNSUPPORTED: &str = "Geolocation not supported. Switch to manual entry.";
    pub const GEO_FAILED: &str = "We could not access your location. Enter coordinates manually.";
    pub const NO_MATCHES: &str =
        "No coaches matched those filters. Try adjusting goal, distance, or budget.";
    pub const NO_SEARCH_YET: &str = "Run a search to view personalised recommendations.";
    pub const REQUEST_FAILED: &str = "Request failed";
}
