//! Caller-supplied settings for the public IP lookup.

use std::time::Duration;

use url::Url;

use crate::config::defaults;

/// Where to ask for the public address and how long to wait.
///
/// Immutable once built; the fetcher copies what it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Echo service returning the caller's address as plain text.
    pub public_ip_service_url: Url,
    /// Upper bound on the whole exchange.
    pub timeout: Duration,
}

impl ResolverConfig {
    /// Creates a configuration for the given service and timeout.
    #[must_use]
    pub const fn new(public_ip_service_url: Url, timeout: Duration) -> Self {
        Self {
            public_ip_service_url,
            timeout,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new(defaults::public_ip_service_url(), defaults::timeout())
    }
}
