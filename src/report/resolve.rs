//! Runs local selection and the public lookup side by side.

use crate::network::{HostResolver, InterfaceFetcher, LocalAddressSelector, LocalSelection};
use crate::public::{HttpClient, PublicIpFetcher};

use super::bind::{BindAddressProvider, configured_bind_address};
use super::summary::NetworkReport;

/// Resolves every address in the report concurrently.
///
/// Local selection is blocking OS work and runs on the blocking pool while
/// the public lookup (if `public` is `Some`) proceeds on the runtime. The
/// two results are independent: neither outcome affects the other.
///
/// Never fails. Local selection falls back to `0.0.0.0`, and a failed
/// public lookup is recorded in the report.
pub async fn resolve<F, R, H, P>(
    selector: LocalAddressSelector<F, R>,
    public: Option<PublicIpFetcher<H>>,
    provider: &P,
) -> NetworkReport
where
    F: InterfaceFetcher + 'static,
    R: HostResolver + 'static,
    H: HttpClient,
    P: BindAddressProvider + ?Sized,
{
    let local_task = tokio::task::spawn_blocking(move || selector.select());

    let public_task = async {
        match &public {
            Some(fetcher) => Some(fetcher.fetch().await),
            None => {
                tracing::debug!("Public IP lookup disabled");
                None
            }
        }
    };

    let (local, public_ip) = tokio::join!(local_task, public_task);

    let local_ipv4 = local.unwrap_or_else(|e| {
        tracing::error!("Local address selection task failed: {e}");
        LocalSelection::sentinel()
    });

    match &public_ip {
        Some(Ok(ip)) => tracing::debug!("Public IP {ip}"),
        Some(Err(e)) => tracing::warn!("Public IP lookup failed: {e}"),
        None => {}
    }

    NetworkReport {
        local_ipv4,
        bind_address: configured_bind_address(provider),
        public_ip,
    }
}
