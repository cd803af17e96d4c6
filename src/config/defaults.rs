//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default backend base URL
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Environment variable overriding the backend base URL
pub const API_URL_ENV: &str = "FITSPACE_API_URL";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default search radius in kilometers
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 15.0;

/// Default number of recommendations requested
pub const DEFAULT_TAKE: u32 = 6;

/// Default location source
pub const DEFAULT_LOCATION_MODE: &str = "auto";

/// Default device locator
pub const DEFAULT_LOCATOR: &str = "ip";

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Coach the workspace acts on when none is given
pub const DEFAULT_COACH_ID: i64 = 1;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "fitspace";
