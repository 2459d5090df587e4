//! Windows-specific interface fetching using `GetAdaptersAddresses`.

use crate::network::{FetchError, InterfaceFetcher, InterfaceKind, InterfaceSnapshot, OperStatus};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use windows::Win32::Foundation::WIN32_ERROR;
use windows::Win32::NetworkManagement::IpHelper::{
    GAA_FLAG_SKIP_ANYCAST, GAA_FLAG_SKIP_DNS_SERVER, GAA_FLAG_SKIP_MULTICAST, GetAdaptersAddresses,
    IF_TYPE_ETHERNET_CSMACD, IF_TYPE_IEEE80211, IF_TYPE_SOFTWARE_LOOPBACK, IP_ADAPTER_ADDRESSES_LH,
};
use windows::Win32::NetworkManagement::Ndis::{IF_OPER_STATUS, IfOperStatusUp};
use windows::Win32::Networking::WinSock::{
    AF_INET, AF_INET6, AF_UNSPEC, SOCKADDR_IN, SOCKADDR_IN6,
};

/// Interface type for tunnel adapters (Teredo, ISATAP, 6to4, many VPNs).
/// Value from Windows SDK `ipifcons.h` - not exported by the `windows` crate.
const IF_TYPE_TUNNEL: u32 = 131;

/// Buffer size hint for `GetAdaptersAddresses`.
/// The API reports the required size if this is insufficient.
const INITIAL_BUFFER_SIZE: u32 = 16384;

/// Windows implementation of [`InterfaceFetcher`] using `GetAdaptersAddresses`.
///
/// Adapters are returned in the order the IP Helper API lists them, and
/// unicast addresses in the order of each adapter's address list.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsFetcher;

impl WindowsFetcher {
    /// Creates a new Windows interface fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InterfaceFetcher for WindowsFetcher {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        fetch_adapters()
    }
}

fn fetch_adapters() -> Result<Vec<InterfaceSnapshot>, FetchError> {
    let raw_adapters = get_adapter_addresses()?;

    let mut interfaces = Vec::new();
    // SAFETY: GetAdaptersAddresses fills the buffer with properly aligned
    // IP_ADAPTER_ADDRESSES_LH structures.
    #[allow(clippy::cast_ptr_alignment)]
    let mut current = raw_adapters.as_ptr().cast::<IP_ADAPTER_ADDRESSES_LH>();

    // SAFETY: The linked list stays valid while `raw_adapters` is alive.
    while !current.is_null() {
        let adapter = unsafe { &*current };

        match parse_adapter(adapter) {
            Some(snapshot) => interfaces.push(snapshot),
            None => tracing::debug!("Skipping adapter with unreadable name"),
        }

        current = adapter.Next;
    }

    Ok(interfaces)
}

/// Calls `GetAdaptersAddresses`, growing the buffer once if the first call
/// reports overflow.
fn get_adapter_addresses() -> Result<Vec<u8>, FetchError> {
    use windows::Win32::Foundation::{ERROR_BUFFER_OVERFLOW, NO_ERROR};

    let flags = GAA_FLAG_SKIP_ANYCAST | GAA_FLAG_SKIP_MULTICAST | GAA_FLAG_SKIP_DNS_SERVER;
    let family = u32::from(AF_UNSPEC.0);

    let mut buffer: Vec<u8> = vec![0u8; INITIAL_BUFFER_SIZE as usize];
    let mut size = INITIAL_BUFFER_SIZE;

    // SAFETY: `buffer` is valid for `size` bytes; the API updates `size`
    // with the required length on overflow.
    let mut result = unsafe {
        GetAdaptersAddresses(
            family,
            flags,
            None,
            Some(buffer.as_mut_ptr().cast()),
            &raw mut size,
        )
    };

    if result == ERROR_BUFFER_OVERFLOW.0 {
        buffer.resize(size as usize, 0);

        // SAFETY: Same as above, with the buffer resized to the reported size.
        result = unsafe {
            GetAdaptersAddresses(
                family,
                flags,
                None,
                Some(buffer.as_mut_ptr().cast()),
                &raw mut size,
            )
        };
    }

    if result != NO_ERROR.0 {
        return Err(windows::core::Error::from(WIN32_ERROR(result)).into());
    }

    Ok(buffer)
}

/// Converts one `IP_ADAPTER_ADDRESSES_LH` into an [`InterfaceSnapshot`].
///
/// Returns `None` if the friendly name is not valid UTF-16.
fn parse_adapter(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Option<InterfaceSnapshot> {
    let name = unsafe { adapter.FriendlyName.to_string().ok()? };

    Some(InterfaceSnapshot::new(
        name,
        map_adapter_type(adapter.IfType),
        map_oper_status(adapter.OperStatus),
        collect_addresses(adapter),
    ))
}

/// Maps Windows `IF_TYPE_*` constants to [`InterfaceKind`].
const fn map_adapter_type(if_type: u32) -> InterfaceKind {
    match if_type {
        IF_TYPE_ETHERNET_CSMACD => InterfaceKind::Ethernet,
        IF_TYPE_IEEE80211 => InterfaceKind::Wireless,
        IF_TYPE_SOFTWARE_LOOPBACK => InterfaceKind::Loopback,
        IF_TYPE_TUNNEL => InterfaceKind::Tunnel,
        other => InterfaceKind::Other(other),
    }
}

fn map_oper_status(status: IF_OPER_STATUS) -> OperStatus {
    if status == IfOperStatusUp {
        OperStatus::Up
    } else {
        OperStatus::Down
    }
}

/// Collects unicast addresses of both families, preserving list order.
#[allow(clippy::cast_ptr_alignment)]
fn collect_addresses(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Vec<IpAddr> {
    let mut addresses = Vec::new();

    let mut unicast = adapter.FirstUnicastAddress;

    // SAFETY: Each entry is valid while the parent adapter buffer is alive.
    while !unicast.is_null() {
        let addr_entry = unsafe { &*unicast };

        // SAFETY: `lpSockaddr` points to SOCKADDR_IN or SOCKADDR_IN6
        // depending on `sa_family`.
        if let Some(sockaddr) = unsafe { addr_entry.Address.lpSockaddr.as_ref() } {
            match sockaddr.sa_family {
                f if f == AF_INET => {
                    let sockaddr_in =
                        unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN>()) };
                    let octets = unsafe { sockaddr_in.sin_addr.S_un.S_un_b };
                    addresses.push(IpAddr::V4(Ipv4Addr::new(
                        octets.s_b1,
                        octets.s_b2,
                        octets.s_b3,
                        octets.s_b4,
                    )));
                }
                f if f == AF_INET6 => {
                    let sockaddr_in6 =
                        unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN6>()) };
                    let octets = unsafe { sockaddr_in6.sin6_addr.u.Byte };
                    addresses.push(IpAddr::V6(Ipv6Addr::from(octets)));
                }
                _ => {}
            }
        }

        unicast = addr_entry.Next;
    }

    addresses
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::NetworkManagement::Ndis::IfOperStatusDown;

    #[test]
    fn map_adapter_type_known_types() {
        assert_eq!(
            map_adapter_type(IF_TYPE_ETHERNET_CSMACD),
            InterfaceKind::Ethernet
        );
        assert_eq!(map_adapter_type(IF_TYPE_IEEE80211), InterfaceKind::Wireless);
        assert_eq!(
            map_adapter_type(IF_TYPE_SOFTWARE_LOOPBACK),
            InterfaceKind::Loopback
        );
        assert_eq!(map_adapter_type(IF_TYPE_TUNNEL), InterfaceKind::Tunnel);
    }

    #[test]
    fn map_adapter_type_unknown_preserves_code() {
        assert_eq!(map_adapter_type(23), InterfaceKind::Other(23));
    }

    #[test]
    fn map_oper_status_only_up_is_up() {
        assert_eq!(map_oper_status(IfOperStatusUp), OperStatus::Up);
        assert_eq!(map_oper_status(IfOperStatusDown), OperStatus::Down);
    }

    #[test]
    fn fetch_adapters_includes_loopback() {
        let adapters = WindowsFetcher::new().fetch().expect("fetch() failed");

        let has_loopback = adapters.iter().any(|a| {
            a.kind.is_loopback() && a.addresses.contains(&IpAddr::V4(Ipv4Addr::LOCALHOST))
        });

        assert!(has_loopback, "Expected loopback adapter, got {adapters:?}");
    }
}
