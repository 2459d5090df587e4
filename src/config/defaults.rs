//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

use url::Url;

/// Default public IP echo service.
pub const PUBLIC_IP_SERVICE_URL: &str = "https://api.ipify.org";

/// Default public lookup timeout in seconds.
pub const TIMEOUT_SECS: u64 = 5;

/// Default output path for `ipscout init`.
pub const CONFIG_PATH: &str = "ipscout.toml";

/// Default public lookup timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Default public IP echo service as a parsed URL.
///
/// # Panics
///
/// Never in practice: [`PUBLIC_IP_SERVICE_URL`] is a valid absolute URL.
#[must_use]
pub fn public_ip_service_url() -> Url {
    Url::parse(PUBLIC_IP_SERVICE_URL).expect("default service URL is valid")
}
