//! Core network types for interface representation.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

/// Operational status of an interface as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperStatus {
    /// The interface can pass packets.
    Up,
    /// The interface is down, dormant, or not present.
    Down,
}

impl OperStatus {
    /// Returns true if the interface is operationally up.
    #[must_use]
    pub const fn is_up(self) -> bool {
        matches!(self, Self::Up)
    }
}

impl fmt::Display for OperStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Network interface type classification.
///
/// Only `Loopback` and `Tunnel` influence local address selection;
/// the other variants exist for logging and name-independent filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterfaceKind {
    /// Physical Ethernet interface.
    Ethernet,
    /// Wireless (Wi-Fi) interface.
    Wireless,
    /// Loopback interface (localhost).
    Loopback,
    /// Tunnel interface (VPN, IP-in-IP, GRE, Teredo, `utun`, etc.).
    Tunnel,
    /// Unknown or other interface type, preserving the platform type code.
    Other(u32),
}

impl InterfaceKind {
    /// Returns true if this is a loopback interface.
    #[must_use]
    pub const fn is_loopback(&self) -> bool {
        matches!(self, Self::Loopback)
    }

    /// Returns true if this is a tunnel interface.
    #[must_use]
    pub const fn is_tunnel(&self) -> bool {
        matches!(self, Self::Tunnel)
    }
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ethernet => write!(f, "ethernet"),
            Self::Wireless => write!(f, "wireless"),
            Self::Loopback => write!(f, "loopback"),
            Self::Tunnel => write!(f, "tunnel"),
            Self::Other(code) => write!(f, "other({code})"),
        }
    }
}

/// A read-only snapshot of one network interface at the time it was queried.
///
/// Addresses keep the order in which the OS reported them; selection
/// relies on that order, so it is never sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSnapshot {
    /// The interface name (e.g., "eth0", "Wi-Fi").
    pub name: String,
    /// The type of interface.
    pub kind: InterfaceKind,
    /// Operational status.
    pub status: OperStatus,
    /// Unicast addresses of both families, in enumeration order.
    pub addresses: Vec<IpAddr>,
}

impl InterfaceSnapshot {
    /// Creates a new interface snapshot.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: InterfaceKind,
        status: OperStatus,
        addresses: Vec<IpAddr>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            status,
            addresses,
        }
    }

    /// Returns true if the interface is operationally up.
    #[must_use]
    pub const fn is_up(&self) -> bool {
        self.status.is_up()
    }

    /// Iterates over the IPv4 addresses in enumeration order.
    pub fn ipv4_addresses(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.addresses.iter().filter_map(|addr| match addr {
            IpAddr::V4(v4) => Some(*v4),
            IpAddr::V6(_) => None,
        })
    }
}
