//! Caller-supplied transport bind address.

/// Supplies the bind address of whatever transport the caller runs.
///
/// The resolver never discovers a transport on its own; callers that have
/// one implement this, callers that don't pass [`StaticBindAddress::none`].
pub trait BindAddressProvider: Send + Sync {
    /// Returns the configured bind address, if any.
    fn bind_address(&self) -> Option<String>;
}

impl<F> BindAddressProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn bind_address(&self) -> Option<String> {
        self()
    }
}

/// A bind address fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticBindAddress(Option<String>);

impl StaticBindAddress {
    /// Wraps an optional address.
    #[must_use]
    pub const fn new(address: Option<String>) -> Self {
        Self(address)
    }

    /// No transport configured.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }
}

impl BindAddressProvider for StaticBindAddress {
    fn bind_address(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Queries `provider`, treating blank strings as absent.
pub(crate) fn configured_bind_address<P: BindAddressProvider + ?Sized>(
    provider: &P,
) -> Option<String> {
    provider
        .bind_address()
        .map(|addr| addr.trim().to_string())
        .filter(|addr| !addr.is_empty())
}
