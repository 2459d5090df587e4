//! Public (WAN) address lookup against a plain-text echo service.

use std::time::Duration;

use tokio::task::JoinHandle;
use url::Url;

use super::{HttpClient, HttpRequest, LookupError, ReqwestClient, ResolverConfig};

/// Outcome of one public IP lookup: the trimmed response body, or why
/// there is none.
pub type IpLookupResult = Result<String, LookupError>;

/// Performs single-attempt public IP lookups.
///
/// Each call to [`fetch`](Self::fetch) issues exactly one GET and owns its
/// request state; nothing is shared between calls and nothing is retried.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
///
/// # Example
///
/// ```no_run
/// use ipscout::public::{PublicIpFetcher, ResolverConfig};
///
/// # async fn example() {
/// let fetcher = PublicIpFetcher::from_config(&ResolverConfig::default()).unwrap();
/// match fetcher.fetch().await {
///     Ok(ip) => println!("public: {ip}"),
///     Err(e) => eprintln!("lookup failed: {e}"),
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PublicIpFetcher<H = ReqwestClient> {
    client: H,
    url: Url,
    timeout: Duration,
}

impl PublicIpFetcher<ReqwestClient> {
    /// Creates a fetcher using a reqwest client configured with the same
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Network`] if the HTTP client cannot be built.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, LookupError> {
        let client = ReqwestClient::with_timeout(config.timeout)
            .map_err(|e| LookupError::from_http(e, config.timeout))?;
        Ok(Self::new(client, config))
    }
}

impl<H: HttpClient> PublicIpFetcher<H> {
    /// Creates a fetcher over an arbitrary HTTP client.
    #[must_use]
    pub fn new(client: H, config: &ResolverConfig) -> Self {
        Self {
            client,
            url: config.public_ip_service_url.clone(),
            timeout: config.timeout,
        }
    }

    /// Returns the service URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the configured timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Performs the lookup.
    ///
    /// The timeout bounds the whole exchange, including the body. A 2xx
    /// body is trimmed and returned verbatim; anything else becomes a
    /// [`LookupError`].
    pub async fn fetch(&self) -> IpLookupResult {
        let request = HttpRequest::get(self.url.clone()).accept("text/plain");

        tracing::debug!(
            "Querying public IP from {} (timeout {}s)",
            self.url,
            self.timeout.as_secs_f64()
        );

        let response = match tokio::time::timeout(self.timeout, self.client.request(request)).await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(LookupError::from_http(e, self.timeout)),
            Err(_elapsed) => return Err(LookupError::Timeout(self.timeout)),
        };

        if !response.is_success() {
            return Err(LookupError::Http {
                status: response.status,
            });
        }

        let ip = response.text_lossy().trim().to_string();
        if ip.is_empty() {
            return Err(LookupError::EmptyResponse);
        }

        Ok(ip)
    }
}

impl<H: HttpClient + 'static> PublicIpFetcher<H> {
    /// Runs the lookup on the tokio runtime and hands the result to
    /// `on_done` exactly once.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(self, on_done: F) -> JoinHandle<()>
    where
        F: FnOnce(IpLookupResult) + Send + 'static,
    {
        tokio::spawn(async move {
            let result = self.fetch().await;
            on_done(result);
        })
    }
}

/// Looks up the public IP with a fresh reqwest client.
///
/// Never blocks the calling thread; exactly one request is made.
pub async fn fetch_public_ip(config: &ResolverConfig) -> IpLookupResult {
    PublicIpFetcher::from_config(config)?.fetch().await
}
