//! Application-wide constants
//!
//! Centralized location for annotation keys, status strings and
//! default configuration values shared across the crates.

/// Default dashboard backend URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:4010";

/// How often the connection-type list is re-fetched, in milliseconds
pub const POLL_INTERVAL_MS: u64 = 30_000;

/// Shortest poll interval a config file may ask for, in milliseconds
pub const MIN_POLL_INTERVAL_MS: u64 = 1_000;

/// Upper bound on a single backend request, in milliseconds
pub const REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Creator value used for types shipped with the platform
pub const PRE_INSTALLED_USERNAME: &str = "Pre-installed";

/// Creator shown when the username annotation is missing
pub const UNKNOWN_USERNAME: &str = "unknown";

/// Created column text when no creation timestamp is present
pub const UNKNOWN_CREATED: &str = "Unknown";

// Kubernetes annotations carried by connection-type ConfigMaps
pub mod annotations {
    pub const DISPLAY_NAME: &str = "openshift.io/display-name";
    pub const DESCRIPTION: &str = "openshift.io/description";
    pub const USERNAME: &str = "opendatahub.io/username";
    pub const ENABLED: &str = "opendatahub.io/enabled";
}

// Row status text shown next to the enable switch
pub mod status {
    pub const ENABLING: &str = "Enabling...";
    pub const DISABLING: &str = "Disabling...";
    pub const FAILED: &str = "Failed";
}

// REST endpoints relative to the backend base URL
pub mod endpoints {
    pub const CONNECTION_TYPES: &str = "/api/connection-types";
}
