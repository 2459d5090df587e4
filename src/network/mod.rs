//! Network layer: interface snapshots and local address selection.
//!
//! This module provides types and traits for:
//! - Representing interface snapshots ([`InterfaceSnapshot`])
//! - Interface classification ([`InterfaceKind`], [`OperStatus`])
//! - Fetching interface information ([`InterfaceFetcher`])
//! - Filtering interfaces ([`filter`])
//! - Resolving the local hostname ([`HostResolver`])
//! - Selecting the local IPv4 address ([`LocalAddressSelector`])
//! - Platform-specific implementations ([`platform`])

mod fetcher;
pub mod filter;
mod interface;
pub mod platform;
mod resolver;
mod selector;


pub use fetcher::{FetchError, InterfaceFetcher};
pub use interface::{InterfaceKind, InterfaceSnapshot, OperStatus};
pub use resolver::{HostResolver, SystemHostResolver};
#[cfg(any(unix, windows))]
pub use selector::select_local_ipv4;
pub use selector::{
    LocalAddressSelector, LocalLookupError, LocalSelection, SENTINEL, SelectionSource,
    is_selectable,
};
