//! Local hostname resolution used as the selection fallback.

use std::io;
use std::net::{IpAddr, ToSocketAddrs};

/// Resolves the addresses the system associates with the local hostname.
pub trait HostResolver: Send + Sync {
    /// Returns every address the hostname resolves to, in resolver order.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the hostname cannot be read
    /// or the lookup fails.
    fn resolve_local(&self) -> io::Result<Vec<IpAddr>>;
}

/// Resolver backed by `gethostname` and the system name service.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostResolver;

impl SystemHostResolver {
    /// Returns the local hostname.
    ///
    /// # Errors
    ///
    /// Returns an error if the hostname cannot be read or is not valid UTF-8.
    pub fn hostname() -> io::Result<String> {
        hostname::get()?.into_string().map_err(|raw| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("hostname is not valid UTF-8: {raw:?}"),
            )
        })
    }
}

impl HostResolver for SystemHostResolver {
    fn resolve_local(&self) -> io::Result<Vec<IpAddr>> {
        let host = Self::hostname()?;
        tracing::debug!("Resolving local hostname {host}");

        let addrs = (host.as_str(), 0)
            .to_socket_addrs()?
            .map(|sa| sa.ip())
            .collect();
        Ok(addrs)
    }
}

impl<T: HostResolver + ?Sized> HostResolver for &T {
    fn resolve_local(&self) -> io::Result<Vec<IpAddr>> {
        (**self).resolve_local()
    }
}
