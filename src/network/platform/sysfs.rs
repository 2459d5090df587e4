//! Linux sysfs readers for interface kind and operational status.
//!
//! Everything lives under `/sys/class/net/<name>/`; the root is injectable
//! so tests can point it at a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::network::{InterfaceKind, OperStatus};

/// Default sysfs directory listing network interfaces.
pub const SYS_CLASS_NET: &str = "/sys/class/net";

// ARPHRD_* values from <linux/if_arp.h>.
const ARPHRD_ETHER: u32 = 1;
const ARPHRD_TUNNEL: u32 = 768;
const ARPHRD_TUNNEL6: u32 = 769;
const ARPHRD_LOOPBACK: u32 = 772;
const ARPHRD_SIT: u32 = 776;
const ARPHRD_IPGRE: u32 = 778;
const ARPHRD_IP6GRE: u32 = 823;
/// Used by `tun` devices and WireGuard.
const ARPHRD_NONE: u32 = 65534;

const IFF_UP: u32 = 0x1;
const IFF_RUNNING: u32 = 0x40;

/// Reads interface attributes from a sysfs `class/net` directory.
#[derive(Debug, Clone)]
pub struct SysfsProbe {
    root: PathBuf,
}

impl Default for SysfsProbe {
    fn default() -> Self {
        Self::new(SYS_CLASS_NET)
    }
}

impl SysfsProbe {
    /// Creates a probe rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the probe root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Classifies an interface, or `None` if sysfs has no usable `type` file.
    #[must_use]
    pub fn kind(&self, name: &str) -> Option<InterfaceKind> {
        let dir = self.root.join(name);
        let code = read_trimmed(&dir.join("type"))?.parse::<u32>().ok()?;
        let wireless = dir.join("wireless").is_dir() || dir.join("phy80211").exists();
        Some(kind_from_type(code, wireless))
    }

    /// Reads the operational status, or `None` if `operstate` is missing.
    #[must_use]
    pub fn status(&self, name: &str) -> Option<OperStatus> {
        let dir = self.root.join(name);
        let operstate = read_trimmed(&dir.join("operstate"))?;
        let flags = read_trimmed(&dir.join("flags")).and_then(|f| parse_flags(&f));
        Some(status_from(&operstate, flags))
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

/// Maps an `ARPHRD_*` code to [`InterfaceKind`].
#[must_use]
pub const fn kind_from_type(code: u32, wireless: bool) -> InterfaceKind {
    match code {
        ARPHRD_ETHER if wireless => InterfaceKind::Wireless,
        ARPHRD_ETHER => InterfaceKind::Ethernet,
        ARPHRD_LOOPBACK => InterfaceKind::Loopback,
        ARPHRD_TUNNEL | ARPHRD_TUNNEL6 | ARPHRD_SIT | ARPHRD_IPGRE | ARPHRD_IP6GRE
        | ARPHRD_NONE => InterfaceKind::Tunnel,
        other => InterfaceKind::Other(other),
    }
}

/// Parses the hex `flags` attribute (e.g. `0x1003`).
#[must_use]
pub fn parse_flags(raw: &str) -> Option<u32> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    u32::from_str_radix(digits, 16).ok()
}

/// Derives the status from `operstate`.
///
/// Drivers that do not report carrier leave `operstate` at `unknown`;
/// for those the interface counts as up when it is administratively up
/// and running.
#[must_use]
pub fn status_from(operstate: &str, flags: Option<u32>) -> OperStatus {
    match operstate {
        "up" => OperStatus::Up,
        "unknown" => match flags {
            Some(f) if f & IFF_UP != 0 && f & IFF_RUNNING != 0 => OperStatus::Up,
            _ => OperStatus::Down,
        },
        _ => OperStatus::Down,
    }
}
