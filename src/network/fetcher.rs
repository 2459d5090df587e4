//! The [`InterfaceFetcher`] seam between selection logic and the OS.

use thiserror::Error;

use super::InterfaceSnapshot;

/// Why the interface list could not be read.
///
/// Selection never surfaces this to its caller; any variant means
/// "try the hostname instead".
#[derive(Debug, Error)]
pub enum FetchError {
    /// `GetAdaptersAddresses` returned an error code.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// `getifaddrs` or a sysfs read failed.
    #[error("Interface enumeration failed: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else, described in words.
    #[error("Platform error: {message}")]
    Platform {
        /// What failed.
        message: String,
    },
}

/// Lists the host's network interfaces.
///
/// [`super::platform::PlatformFetcher`] talks to the OS; tests substitute
/// fixed lists:
///
/// ```
/// use ipscout::network::{FetchError, InterfaceFetcher, InterfaceSnapshot};
///
/// struct Canned(Vec<InterfaceSnapshot>);
///
/// impl InterfaceFetcher for Canned {
///     fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
///         Ok(self.0.clone())
///     }
/// }
///
/// assert!(Canned(Vec::new()).fetch().unwrap().is_empty());
/// ```
pub trait InterfaceFetcher: Send + Sync {
    /// Every interface, unfiltered, in OS order. Each interface's
    /// addresses are in OS order too.
    ///
    /// # Errors
    ///
    /// [`FetchError`] when the platform query fails.
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError>;
}

impl<T: InterfaceFetcher + ?Sized> InterfaceFetcher for &T {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        (**self).fetch()
    }
}
