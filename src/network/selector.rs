//! Local IPv4 address selection.
//!
//! Selection is a "first acceptable" policy over the OS enumeration order:
//!
//! 1. Interfaces that are up and neither loopback nor tunnel, in the order
//!    the OS lists them; within each, the first IPv4 address that is not
//!    link-local (APIPA, 169.254.0.0/16) and not loopback.
//! 2. Otherwise the first non-loopback IPv4 address of the local hostname.
//! 3. Otherwise `0.0.0.0`.
//!
//! [`LocalAddressSelector::select`] never fails; the cause of each fallback
//! is logged and also available through the `try_*` methods.

use std::fmt;
use std::io;
use std::net::{IpAddr, Ipv4Addr};

use serde::Serialize;
use thiserror::Error;

use super::filter::{FilterChain, FilteredFetcher, NameRegexFilter};
use super::resolver::{HostResolver, SystemHostResolver};
use super::{FetchError, InterfaceFetcher};

/// Address returned when no usable local address exists.
pub const SENTINEL: Ipv4Addr = Ipv4Addr::UNSPECIFIED;

/// Why a selection step produced no address.
#[derive(Debug, Error)]
pub enum LocalLookupError {
    /// The OS interface query failed.
    #[error("Interface enumeration failed: {0}")]
    InterfaceEnumeration(#[source] FetchError),

    /// Enumeration succeeded but no interface qualified.
    #[error("No active interface has a usable IPv4 address")]
    NoInterfaceFound,

    /// The hostname could not be read or resolved.
    #[error("Local hostname resolution failed: {0}")]
    NameResolution(#[source] io::Error),

    /// The hostname resolved, but only to loopback or IPv6 addresses.
    #[error("Local hostname has no non-loopback IPv4 address")]
    NoHostAddress,
}

/// Where a selected address came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "via", rename_all = "snake_case")]
pub enum SelectionSource {
    /// Found on a network interface.
    Interface {
        /// Interface name.
        name: String,
    },
    /// Found by resolving the local hostname.
    Hostname,
    /// Nothing usable; the address is [`SENTINEL`].
    Fallback,
}

/// Outcome of local address selection.
///
/// Displays as the bare address, which is the string callers show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalSelection {
    /// Selected address, or [`SENTINEL`].
    pub address: Ipv4Addr,
    /// How the address was found.
    pub source: SelectionSource,
}

impl LocalSelection {
    /// The `0.0.0.0` result.
    #[must_use]
    pub const fn sentinel() -> Self {
        Self {
            address: SENTINEL,
            source: SelectionSource::Fallback,
        }
    }
}

impl fmt::Display for LocalSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

/// Returns true for addresses acceptable as the local address.
#[must_use]
pub const fn is_selectable(addr: Ipv4Addr) -> bool {
    !addr.is_link_local() && !addr.is_loopback() && !addr.is_unspecified()
}

/// Selects the local IPv4 address from an injectable fetcher and resolver.
#[derive(Debug)]
pub struct LocalAddressSelector<F, R = SystemHostResolver> {
    fetcher: F,
    resolver: R,
    filter: FilterChain,
}

#[cfg(any(unix, windows))]
impl LocalAddressSelector<super::platform::PlatformFetcher, SystemHostResolver> {
    /// Creates a selector over the platform interfaces and system resolver.
    #[must_use]
    pub fn system() -> Self {
        Self::new(
            super::platform::PlatformFetcher::default(),
            SystemHostResolver,
        )
    }
}

impl<F: InterfaceFetcher, R: HostResolver> LocalAddressSelector<F, R> {
    /// Creates a selector with the default interface filter.
    #[must_use]
    pub fn new(fetcher: F, resolver: R) -> Self {
        Self {
            fetcher,
            resolver,
            filter: FilterChain::selection_defaults(),
        }
    }

    /// Additionally skips interfaces whose names match any of the filters.
    #[must_use]
    pub fn with_name_excludes(
        mut self,
        excludes: impl IntoIterator<Item = NameRegexFilter>,
    ) -> Self {
        for exclude in excludes {
            self.filter = self.filter.exclude(exclude);
        }
        self
    }

    /// Runs all selection steps; never fails.
    pub fn select(&self) -> LocalSelection {
        match self.try_interfaces() {
            Ok(selection) => {
                tracing::debug!("Local IPv4 {selection} from {:?}", selection.source);
                return selection;
            }
            Err(e @ LocalLookupError::InterfaceEnumeration(_)) => {
                tracing::warn!("{e}; falling back to hostname resolution");
            }
            Err(e) => tracing::debug!("{e}; falling back to hostname resolution"),
        }

        match self.try_hostname() {
            Ok(selection) => {
                tracing::debug!("Local IPv4 {selection} from hostname");
                selection
            }
            Err(e) => {
                tracing::warn!("{e}; reporting {SENTINEL}");
                LocalSelection::sentinel()
            }
        }
    }

    /// Selects from network interfaces only.
    ///
    /// # Errors
    ///
    /// Returns [`LocalLookupError::InterfaceEnumeration`] if the fetcher
    /// fails, or [`LocalLookupError::NoInterfaceFound`] if nothing qualifies.
    pub fn try_interfaces(&self) -> Result<LocalSelection, LocalLookupError> {
        let candidates = FilteredFetcher::new(&self.fetcher, &self.filter)
            .fetch()
            .map_err(LocalLookupError::InterfaceEnumeration)?;

        candidates
            .iter()
            .find_map(|iface| {
                iface
                    .ipv4_addresses()
                    .find(|addr| is_selectable(*addr))
                    .map(|address| LocalSelection {
                        address,
                        source: SelectionSource::Interface {
                            name: iface.name.clone(),
                        },
                    })
            })
            .ok_or(LocalLookupError::NoInterfaceFound)
    }

    /// Selects from the local hostname's addresses only.
    ///
    /// # Errors
    ///
    /// Returns [`LocalLookupError::NameResolution`] if resolution fails, or
    /// [`LocalLookupError::NoHostAddress`] if it yields no usable IPv4.
    pub fn try_hostname(&self) -> Result<LocalSelection, LocalLookupError> {
        let addrs = self
            .resolver
            .resolve_local()
            .map_err(LocalLookupError::NameResolution)?;

        addrs
            .into_iter()
            .find_map(|addr| match addr {
                IpAddr::V4(v4) if !v4.is_loopback() && !v4.is_unspecified() => Some(v4),
                _ => None,
            })
            .map(|address| LocalSelection {
                address,
                source: SelectionSource::Hostname,
            })
            .ok_or(LocalLookupError::NoHostAddress)
    }
}

/// Returns the local IPv4 address as text, or `"0.0.0.0"`.
///
/// Uses the platform interface list and the system resolver.
#[cfg(any(unix, windows))]
#[must_use]
pub fn select_local_ipv4() -> String {
    LocalAddressSelector::system().select().to_string()
}
