//! Unix interface fetching using `getifaddrs` (via `if-addrs`).
//!
//! `getifaddrs` yields one entry per address, so entries are grouped back
//! into interfaces by name in first-seen order.

use std::net::IpAddr;

use crate::network::{FetchError, InterfaceFetcher, InterfaceKind, InterfaceSnapshot, OperStatus};

#[cfg(target_os = "linux")]
use super::sysfs::SysfsProbe;

/// Name prefixes of tunnel devices on systems without sysfs.
const TUNNEL_PREFIXES: &[&str] = &["utun", "gif", "stf", "ipsec", "tun", "wg"];

/// Type code used when neither sysfs nor the name identifies the kind.
const UNKNOWN_TYPE: u32 = 0;

/// Unix implementation of [`InterfaceFetcher`].
///
/// On Linux, kind and status come from sysfs. Alias labels such as `eth0:1`
/// have no sysfs entry of their own and are classified by their device
/// (`eth0`); the snapshot keeps the full label.
///
/// # Limitations
///
/// Off Linux, `if-addrs` exposes no interface flags. The kind is guessed
/// from the loopback flag and the name, and **every listed interface is
/// reported as [`OperStatus::Up`]**, so a down link that still holds an
/// address can be selected there.
#[derive(Debug, Clone, Default)]
pub struct UnixFetcher {
    #[cfg(target_os = "linux")]
    probe: SysfsProbe,
}

impl UnixFetcher {
    /// Creates a fetcher using the system sysfs root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fetcher reading kind and status from a custom sysfs root.
    #[cfg(target_os = "linux")]
    #[must_use]
    pub const fn with_probe(probe: SysfsProbe) -> Self {
        Self { probe }
    }

    fn snapshot(&self, raw: RawInterface) -> InterfaceSnapshot {
        let (kind, status) = self.classify(&raw);
        InterfaceSnapshot::new(raw.name, kind, status, raw.addresses)
    }

    #[cfg(target_os = "linux")]
    fn classify(&self, raw: &RawInterface) -> (InterfaceKind, OperStatus) {
        let device = device_name(&raw.name);
        let probe = &self.probe;
        let kind = probe.kind(device).unwrap_or_else(|| heuristic_kind(raw));
        let status = probe.status(device).unwrap_or_else(|| {
            tracing::debug!("No operstate for {device}, assuming up");
            OperStatus::Up
        });
        (kind, status)
    }

    #[cfg(not(target_os = "linux"))]
    #[allow(clippy::unused_self)]
    fn classify(&self, raw: &RawInterface) -> (InterfaceKind, OperStatus) {
        (heuristic_kind(raw), OperStatus::Up)
    }
}

impl InterfaceFetcher for UnixFetcher {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        let entries = if_addrs::get_if_addrs()?;

        let raw = group_by_name(
            entries
                .into_iter()
                .map(|iface| (iface.is_loopback(), iface.ip(), iface.name)),
        );

        Ok(raw.into_iter().map(|r| self.snapshot(r)).collect())
    }
}

/// One interface reassembled from per-address `getifaddrs` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawInterface {
    name: String,
    loopback: bool,
    addresses: Vec<IpAddr>,
}

fn group_by_name(entries: impl IntoIterator<Item = (bool, IpAddr, String)>) -> Vec<RawInterface> {
    let mut grouped: Vec<RawInterface> = Vec::new();

    for (loopback, addr, name) in entries {
        if let Some(existing) = grouped.iter_mut().find(|r| r.name == name) {
            existing.loopback |= loopback;
            existing.addresses.push(addr);
        } else {
            grouped.push(RawInterface {
                name,
                loopback,
                addresses: vec![addr],
            });
        }
    }

    grouped
}

/// `eth0:1` -> `eth0`. Names without a label are returned as is.
#[cfg(target_os = "linux")]
fn device_name(label: &str) -> &str {
    label.split_once(':').map_or(label, |(device, _)| device)
}

fn heuristic_kind(raw: &RawInterface) -> InterfaceKind {
    if raw.loopback {
        InterfaceKind::Loopback
    } else if TUNNEL_PREFIXES.iter().any(|p| raw.name.starts_with(p)) {
        InterfaceKind::Tunnel
    } else {
        InterfaceKind::Other(UNKNOWN_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(loopback: bool, addr: &str, name: &str) -> (bool, IpAddr, String) {
        (loopback, addr.parse().unwrap(), name.to_string())
    }

    #[test]
    fn group_by_name_preserves_first_seen_order() {
        let grouped = group_by_name([
            entry(true, "127.0.0.1", "lo"),
            entry(false, "192.168.1.5", "eth0"),
            entry(false, "fe80::1", "eth0"),
            entry(true, "::1", "lo"),
            entry(false, "10.0.0.5", "eth0"),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].name, "lo");
        assert_eq!(grouped[1].name, "eth0");
        assert_eq!(
            grouped[1].addresses,
            vec![
                "192.168.1.5".parse::<IpAddr>().unwrap(),
                "fe80::1".parse().unwrap(),
                "10.0.0.5".parse().unwrap(),
            ]
        );
    }

    #[test]
    fn heuristic_kind_detects_loopback_and_tunnels() {
        let lo = RawInterface {
            name: "lo0".into(),
            loopback: true,
            addresses: vec![],
        };
        let utun = RawInterface {
            name: "utun3".into(),
            loopback: false,
            addresses: vec![],
        };
        let en = RawInterface {
            name: "en0".into(),
            loopback: false,
            addresses: vec![],
        };

        assert_eq!(heuristic_kind(&lo), InterfaceKind::Loopback);
        assert_eq!(heuristic_kind(&utun), InterfaceKind::Tunnel);
        assert_eq!(heuristic_kind(&en), InterfaceKind::Other(UNKNOWN_TYPE));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn classify_prefers_sysfs_over_heuristics() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("tun0");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("type"), "1\n").unwrap();
        std::fs::write(dir.join("operstate"), "down\n").unwrap();

        let fetcher = UnixFetcher::with_probe(SysfsProbe::new(root.path()));
        let snapshot = fetcher.snapshot(RawInterface {
            name: "tun0".into(),
            loopback: false,
            addresses: vec!["10.8.0.1".parse().unwrap()],
        });

        assert_eq!(snapshot.kind, InterfaceKind::Ethernet);
        assert_eq!(snapshot.status, OperStatus::Down);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn alias_label_is_classified_by_its_device() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("eth0");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("type"), "1\n").unwrap();
        std::fs::write(dir.join("operstate"), "down\n").unwrap();
        std::fs::write(dir.join("flags"), "0x1002\n").unwrap();

        let fetcher = UnixFetcher::with_probe(SysfsProbe::new(root.path()));
        let alias = fetcher.snapshot(RawInterface {
            name: "eth0:1".into(),
            loopback: false,
            addresses: vec!["192.168.50.2".parse().unwrap()],
        });

        assert_eq!(alias.name, "eth0:1");
        assert_eq!(alias.kind, InterfaceKind::Ethernet);
        assert_eq!(alias.status, OperStatus::Down);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn device_name_strips_alias_label() {
        assert_eq!(device_name("eth0:1"), "eth0");
        assert_eq!(device_name("wlan0"), "wlan0");
    }

    #[test]
    fn fetch_lists_loopback() {
        let interfaces = UnixFetcher::new().fetch().expect("fetch() failed");

        let has_loopback = interfaces
            .iter()
            .flat_map(|i| &i.addresses)
            .any(IpAddr::is_loopback);

        assert!(
            has_loopback,
            "Expected a loopback address, got {interfaces:?}"
        );
    }
}
