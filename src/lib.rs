//! ipscout: local and public IP address discovery
//!
//! A library for picking the host's local IPv4 address from its active
//! network interfaces and for asking an HTTP echo service for the public
//! (WAN) address.

pub mod config;
pub mod network;
pub mod public;
pub mod report;
