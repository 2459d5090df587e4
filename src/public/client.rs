//! [`HttpClient`] backed by reqwest.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// `User-Agent` header value, e.g. `ipscout/0.1.0`.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// reqwest-based client used outside tests.
///
/// Cloning is cheap; clones share one connection pool.
///
/// ```no_run
/// use std::time::Duration;
/// use ipscout::public::{HttpClient, HttpRequest, ReqwestClient};
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::with_timeout(Duration::from_secs(5))?;
/// let reply = client
///     .request(HttpRequest::get("https://api.ipify.org".parse()?))
///     .await?;
/// assert!(reply.is_success());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Bounds each request, body included, by `timeout` and sends
    /// [`USER_AGENT`].
    ///
    /// # Errors
    ///
    /// [`HttpError::ClientBuild`] when reqwest cannot set up TLS or read
    /// system settings.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        match reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
        {
            Ok(inner) => Ok(Self { inner }),
            Err(e) => Err(HttpError::ClientBuild(Box::new(e))),
        }
    }

    /// Wraps a client configured elsewhere.
    #[must_use]
    pub const fn from_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

/// Timeouts and unusable URLs get their own variants; the rest is a
/// connection problem.
fn classify(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        return HttpError::Timeout;
    }
    if e.is_builder() {
        return HttpError::InvalidUrl(e.to_string());
    }
    HttpError::Connection(Box::new(e))
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let HttpRequest { url, headers } = req;

        let reply = self
            .inner
            .get(url.as_str())
            .headers(headers)
            .send()
            .await
            .map_err(classify)?;

        let status = reply.status();
        let reply_headers = reply.headers().clone();
        let body = reply.bytes().await.map_err(classify)?;

        tracing::debug!("GET {url} -> {status} ({} bytes)", body.len());

        Ok(HttpResponse::new(status, reply_headers, body.to_vec()))
    }
}
