//! Combining local, transport and public addresses into one report.
//!
//! This module provides:
//! - The transport bind-address injection point ([`BindAddressProvider`])
//! - The report value and its text/JSON forms ([`NetworkReport`])
//! - Concurrent resolution of all fields ([`resolve`])

mod bind;
mod resolve;
mod summary;

#[cfg(test)]
mod resolve_tests;

pub use bind::{BindAddressProvider, StaticBindAddress};
pub use resolve::resolve;
pub use summary::NetworkReport;
