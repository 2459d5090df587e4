//! Platform-specific interface fetcher implementations.
//!
//! # Platform Support
//!
//! - **Windows**: `GetAdaptersAddresses` via the `windows` crate.
//! - **Linux**: `getifaddrs` via `if-addrs`, kind and status from sysfs.
//! - **Other Unix**: `getifaddrs` via `if-addrs`, kind from name heuristics.

#[cfg(target_os = "linux")]
pub mod sysfs;
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::UnixFetcher;
#[cfg(windows)]
pub use windows::WindowsFetcher;

#[cfg(unix)]
pub use unix::UnixFetcher as PlatformFetcher;
#[cfg(windows)]
pub use windows::WindowsFetcher as PlatformFetcher;
