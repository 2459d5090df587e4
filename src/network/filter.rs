//! Which interfaces take part in local address selection.
//!
//! Matchers ([`KindFilter`], [`NameRegexFilter`], [`OperUpFilter`]) only say
//! whether an interface has some property. [`FilterChain`] turns them into a
//! keep/drop decision: an interface is dropped if any of its excludes
//! matches. [`FilteredFetcher`] wraps an [`InterfaceFetcher`] with such a
//! decision.

use std::collections::HashSet;
use std::fmt;

use regex::Regex;

use super::{FetchError, InterfaceFetcher, InterfaceKind, InterfaceSnapshot};

/// A predicate over interface snapshots.
///
/// `Send + Sync` so a chain can be moved into `spawn_blocking`.
pub trait InterfaceFilter: Send + Sync {
    /// Returns `true` if `interface` has the property this filter tests.
    fn matches(&self, interface: &InterfaceSnapshot) -> bool;
}

impl<T: InterfaceFilter + ?Sized> InterfaceFilter for &T {
    fn matches(&self, interface: &InterfaceSnapshot) -> bool {
        (**self).matches(interface)
    }
}

impl InterfaceFilter for Box<dyn InterfaceFilter> {
    fn matches(&self, interface: &InterfaceSnapshot) -> bool {
        (**self).matches(interface)
    }
}

/// True when the interface kind is one of a fixed set.
///
/// ```
/// use ipscout::network::filter::{InterfaceFilter, KindFilter};
/// use ipscout::network::{InterfaceKind, InterfaceSnapshot, OperStatus};
///
/// let virtual_links = KindFilter::new([InterfaceKind::Loopback, InterfaceKind::Tunnel]);
/// let wg = InterfaceSnapshot::new("wg0", InterfaceKind::Tunnel, OperStatus::Up, vec![]);
/// let wlan = InterfaceSnapshot::new("wlan0", InterfaceKind::Wireless, OperStatus::Up, vec![]);
///
/// assert!(virtual_links.matches(&wg));
/// assert!(!virtual_links.matches(&wlan));
/// ```
#[derive(Debug, Clone)]
pub struct KindFilter {
    kinds: HashSet<InterfaceKind>,
}

impl KindFilter {
    /// An empty set never matches.
    #[must_use]
    pub fn new(kinds: impl IntoIterator<Item = InterfaceKind>) -> Self {
        let kinds = kinds.into_iter().collect();
        Self { kinds }
    }
}

impl InterfaceFilter for KindFilter {
    fn matches(&self, interface: &InterfaceSnapshot) -> bool {
        self.kinds.contains(&interface.kind)
    }
}

/// True for interfaces that are *not* up.
///
/// Meant to be used as an exclude, so that only running interfaces remain.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperUpFilter;

impl InterfaceFilter for OperUpFilter {
    fn matches(&self, interface: &InterfaceSnapshot) -> bool {
        !interface.is_up()
    }
}

/// True when the interface name matches a regular expression.
///
/// Matching is case-sensitive unless the pattern says otherwise (`(?i)`).
///
/// ```
/// use ipscout::network::filter::{InterfaceFilter, NameRegexFilter};
/// use ipscout::network::{InterfaceKind, InterfaceSnapshot, OperStatus};
///
/// let bridges = NameRegexFilter::new(r"^(docker|br-)").unwrap();
/// let br = InterfaceSnapshot::new("br-1a2b", InterfaceKind::Ethernet, OperStatus::Up, vec![]);
/// let enp = InterfaceSnapshot::new("enp3s0", InterfaceKind::Ethernet, OperStatus::Up, vec![]);
///
/// assert!(bridges.matches(&br));
/// assert!(!bridges.matches(&enp));
/// ```
#[derive(Debug, Clone)]
pub struct NameRegexFilter {
    pattern: Regex,
}

impl NameRegexFilter {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Fails with the regex compiler's error for an invalid pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(|pattern| Self { pattern })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl InterfaceFilter for NameRegexFilter {
    fn matches(&self, interface: &InterfaceSnapshot) -> bool {
        self.pattern.is_match(&interface.name)
    }
}

/// Combines matchers into a keep/drop decision.
///
/// Any exclude that matches drops the interface; everything else is kept.
///
/// ```
/// use ipscout::network::filter::{FilterChain, InterfaceFilter};
/// use ipscout::network::{InterfaceKind, InterfaceSnapshot, OperStatus};
///
/// let chain = FilterChain::selection_defaults();
/// let up = InterfaceSnapshot::new("en0", InterfaceKind::Ethernet, OperStatus::Up, vec![]);
/// let down = InterfaceSnapshot::new("en1", InterfaceKind::Ethernet, OperStatus::Down, vec![]);
///
/// assert!(chain.matches(&up));
/// assert!(!chain.matches(&down));
/// ```
#[derive(Default)]
pub struct FilterChain {
    excludes: Vec<Box<dyn InterfaceFilter>>,
}

impl FilterChain {
    /// A chain that keeps everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Up, and neither loopback nor tunnel.
    #[must_use]
    pub fn selection_defaults() -> Self {
        let virtual_links = KindFilter::new([InterfaceKind::Loopback, InterfaceKind::Tunnel]);
        Self::new().exclude(OperUpFilter).exclude(virtual_links)
    }

    #[must_use]
    pub fn exclude(mut self, filter: impl InterfaceFilter + 'static) -> Self {
        self.excludes.push(Box::new(filter));
        self
    }

    #[must_use]
    pub fn exclude_count(&self) -> usize {
        self.excludes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.excludes.is_empty()
    }
}

impl InterfaceFilter for FilterChain {
    fn matches(&self, interface: &InterfaceSnapshot) -> bool {
        !self.excludes.iter().any(|f| f.matches(interface))
    }
}

// Boxed filters have no Debug; show how many there are.
impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("exclude_count", &self.exclude_count())
            .finish()
    }
}

/// An [`InterfaceFetcher`] that only returns interfaces kept by a filter.
///
/// Survivors keep the inner fetcher's order; errors pass through untouched.
#[derive(Debug)]
pub struct FilteredFetcher<F, A> {
    inner: F,
    filter: A,
}

impl<F, A> FilteredFetcher<F, A> {
    #[must_use]
    pub const fn new(inner: F, filter: A) -> Self {
        Self { inner, filter }
    }
}

impl<F: InterfaceFetcher, A: InterfaceFilter> InterfaceFetcher for FilteredFetcher<F, A> {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        let mut interfaces = self.inner.fetch()?;
        interfaces.retain(|interface| {
            let keep = self.filter.matches(interface);
            if !keep {
                tracing::trace!(
                    "Skipping interface {} ({}, {})",
                    interface.name,
                    interface.kind,
                    interface.status
                );
            }
            keep
        });
        Ok(interfaces)
    }
}
