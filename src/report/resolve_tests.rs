//! Tests for concurrent report resolution.

use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Mutex;
use std::sync::mpsc;
use std::time::Duration;

use tokio::sync::oneshot;

use super::*;
use crate::network::{
    FetchError, HostResolver, InterfaceFetcher, InterfaceKind, InterfaceSnapshot,
    LocalAddressSelector, LocalSelection, SelectionSource,
};
use crate::public::{
    HttpClient, HttpError, HttpRequest, HttpResponse, LookupError, PublicIpFetcher, ResolverConfig,
};

// ============================================================================
// Test Doubles
// ============================================================================

fn eth0(addr: &str) -> InterfaceSnapshot {
    InterfaceSnapshot::new(
        "eth0",
        InterfaceKind::Ethernet,
        crate::network::OperStatus::Up,
        vec![addr.parse().unwrap()],
    )
}

struct StaticFetcher(Vec<InterfaceSnapshot>);

impl InterfaceFetcher for StaticFetcher {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        Ok(self.0.clone())
    }
}

struct NoHost;

impl HostResolver for NoHost {
    fn resolve_local(&self) -> io::Result<Vec<IpAddr>> {
        Err(io::Error::from(io::ErrorKind::NotFound))
    }
}

struct CannedClient {
    status: u16,
    body: &'static str,
}

impl HttpClient for CannedClient {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        Ok(HttpResponse::new(
            http::StatusCode::from_u16(self.status).unwrap(),
            http::HeaderMap::new(),
            self.body.as_bytes().to_vec(),
        ))
    }
}

struct HangingClient;

impl HttpClient for HangingClient {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        std::future::pending().await
    }
}

fn config(timeout: Duration) -> ResolverConfig {
    ResolverConfig::new(url::Url::parse("http://ip.example.test/").unwrap(), timeout)
}

fn selector(interfaces: Vec<InterfaceSnapshot>) -> LocalAddressSelector<StaticFetcher, NoHost> {
    LocalAddressSelector::new(StaticFetcher(interfaces), NoHost)
}

// ============================================================================
// Rendezvous doubles: each side only completes once the other has started
// ============================================================================

/// Interface fetcher that waits for the HTTP request to begin, then lets
/// it finish.
struct RendezvousFetcher {
    http_started: Mutex<mpsc::Receiver<()>>,
    release_http: Mutex<Option<oneshot::Sender<()>>>,
}

impl InterfaceFetcher for RendezvousFetcher {
    fn fetch(&self) -> Result<Vec<InterfaceSnapshot>, FetchError> {
        self.http_started
            .lock()
            .unwrap()
            .recv_timeout(Duration::from_secs(5))
            .map_err(|_| FetchError::Platform {
                message: "public lookup never started".to_string(),
            })?;

        if let Some(release) = self.release_http.lock().unwrap().take() {
            let _ = release.send(());
        }
        Ok(vec![eth0("10.20.30.40")])
    }
}

/// HTTP client that announces the request, then waits for the fetcher.
struct RendezvousClient {
    started: mpsc::Sender<()>,
    released: tokio::sync::Mutex<Option<oneshot::Receiver<()>>>,
}

impl HttpClient for RendezvousClient {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let _ = self.started.send(());
        let released = self.released.lock().await.take();
        if let Some(rx) = released {
            rx.await.map_err(|e| HttpError::Connection(Box::new(e)))?;
        }
        Ok(HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            b"203.0.113.9\n".to_vec(),
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn combines_local_public_and_bind_address() {
    let public = PublicIpFetcher::new(
        CannedClient {
            status: 200,
            body: "203.0.113.7\n",
        },
        &config(Duration::from_secs(5)),
    );
    let provider = StaticBindAddress::new(Some("0.0.0.0".to_string()));

    let local = selector(vec![eth0("192.168.1.20")]);

    let report = resolve(local, Some(public), &provider).await;

    assert_eq!(report.local_ipv4.address, Ipv4Addr::new(192, 168, 1, 20));
    assert_eq!(
        report.local_ipv4.source,
        SelectionSource::Interface {
            name: "eth0".to_string()
        }
    );
    assert_eq!(report.bind_address.as_deref(), Some("0.0.0.0"));
    assert_eq!(report.public_address(), Some("203.0.113.7"));
}

#[tokio::test]
async fn skipped_lookup_leaves_public_empty() {
    let report = resolve(
        selector(vec![eth0("192.168.1.20")]),
        None::<PublicIpFetcher<CannedClient>>,
        &StaticBindAddress::none(),
    )
    .await;

    assert!(report.public_ip.is_none());
    assert!(report.bind_address.is_none());
}

#[tokio::test]
async fn public_failure_does_not_affect_local_result() {
    let public = PublicIpFetcher::new(
        CannedClient {
            status: 500,
            body: "10.0.0.1",
        },
        &config(Duration::from_secs(5)),
    );

    let report = resolve(
        selector(vec![eth0("192.168.1.20")]),
        Some(public),
        &StaticBindAddress::none(),
    )
    .await;

    assert_eq!(report.local_ipv4.to_string(), "192.168.1.20");
    assert!(matches!(
        report.public_ip,
        Some(Err(LookupError::Http { .. }))
    ));
}

#[tokio::test]
async fn local_sentinel_does_not_affect_public_result() {
    let public = PublicIpFetcher::new(
        CannedClient {
            status: 200,
            body: "198.51.100.4",
        },
        &config(Duration::from_secs(5)),
    );

    let report = resolve(
        selector(vec![eth0("169.254.10.10")]),
        Some(public),
        &StaticBindAddress::none(),
    )
    .await;

    assert_eq!(report.local_ipv4, LocalSelection::sentinel());
    assert_eq!(report.public_address(), Some("198.51.100.4"));
}

#[tokio::test(start_paused = true)]
async fn public_timeout_is_reported() {
    let public = PublicIpFetcher::new(HangingClient, &config(Duration::from_secs(1)));

    let report = resolve(
        selector(vec![eth0("192.168.1.20")]),
        Some(public),
        &StaticBindAddress::none(),
    )
    .await;

    assert!(matches!(report.public_ip, Some(Err(ref e)) if e.is_timeout()));
    assert_eq!(report.local_ipv4.to_string(), "192.168.1.20");
}

#[tokio::test]
async fn closure_provider_blank_is_absent() {
    let provider = || Some(String::new());

    let report = resolve(
        selector(vec![eth0("192.168.1.20")]),
        None::<PublicIpFetcher<CannedClient>>,
        &provider,
    )
    .await;

    assert!(report.bind_address.is_none());
}

#[tokio::test]
async fn local_and_public_run_concurrently() {
    let (started_tx, started_rx) = mpsc::channel();
    let (release_tx, release_rx) = oneshot::channel();

    let fetcher = RendezvousFetcher {
        http_started: Mutex::new(started_rx),
        release_http: Mutex::new(Some(release_tx)),
    };
    let client = RendezvousClient {
        started: started_tx,
        released: tokio::sync::Mutex::new(Some(release_rx)),
    };
    let public = PublicIpFetcher::new(client, &config(Duration::from_secs(10)));

    let report = resolve(
        LocalAddressSelector::new(fetcher, NoHost),
        Some(public),
        &StaticBindAddress::none(),
    )
    .await;

    assert_eq!(report.local_ipv4.to_string(), "10.20.30.40");
    assert_eq!(report.public_address(), Some("203.0.113.9"));
}
