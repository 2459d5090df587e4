//! Plain-text GET exchanges and the client trait that performs them.

use std::borrow::Cow;

use http::header::ACCEPT;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use url::Url;

use super::HttpError;

/// A GET for a small text resource.
///
/// Echo services are only ever read, so there is no method or body to
/// choose. Headers use `http` crate types.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Resource to fetch
    pub url: Url,
    /// Extra request headers
    pub headers: HeaderMap,
}

impl HttpRequest {
    /// Creates a GET for `url` with no extra headers.
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self {
            url,
            headers: HeaderMap::new(),
        }
    }

    /// Sets a header, replacing any earlier value for the same name.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Asks for the given media type.
    #[must_use]
    pub fn accept(self, media_type: &'static str) -> Self {
        self.with_header(ACCEPT, HeaderValue::from_static(media_type))
    }
}

/// A response with its body read to the end.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status line code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// True for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body as text; invalid UTF-8 becomes U+FFFD.
    #[must_use]
    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Performs [`HttpRequest`]s.
///
/// [`ReqwestClient`](super::ReqwestClient) is the production implementation;
/// tests substitute clients that answer from memory or never answer.
///
/// # Example
///
/// ```ignore
/// use ipscout::public::{HttpClient, HttpRequest, HttpResponse, HttpError};
///
/// struct Canned(HttpResponse);
///
/// impl HttpClient for Canned {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends the GET and buffers the whole response.
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if no response could be read:
    /// - the connection failed or dropped ([`HttpError::Connection`])
    /// - the client's own timeout fired ([`HttpError::Timeout`])
    /// - the URL was rejected ([`HttpError::InvalidUrl`])
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}
