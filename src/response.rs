//! Raw response wrapper.
//!
//! Dispatch hands back the response exactly as the transport saw it: status,
//! headers, body text, and latency. Decoding the body into a typed value is
//! deliberately left to the caller.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// The raw result of dispatching an assembled request.
///
/// # Examples
///
/// ```no_run
/// use parcel::{Client, RequestSpec};
///
/// # async fn example() -> Result<(), parcel::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .build()?;
///
/// let response = client.send(RequestSpec::get("/users/123")).await?;
/// println!("Status: {}", response.status);
/// println!("Body: {}", response.body);
/// println!("Request took {:?}", response.latency);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// The raw response body as text.
    pub body: String,

    /// Time from dispatch until the body was fully received.
    pub latency: Duration,
}

impl Response {
    /// Creates a new `Response`.
    ///
    /// This is typically called internally by the client after receiving a
    /// response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: String, latency: Duration) -> Self {
        Self {
            status,
            headers,
            body,
            latency,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns a reference to a header value by name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parcel::Response;
    /// # use http::{HeaderMap, HeaderValue, StatusCode};
    /// # use std::time::Duration;
    /// let mut headers = HeaderMap::new();
    /// headers.insert("content-type", HeaderValue::from_static("application/json"));
    ///
    /// let response = Response::new(
    ///     StatusCode::OK,
    ///     headers,
    ///     String::new(),
    ///     Duration::from_millis(100),
    /// );
    ///
    /// assert_eq!(response.header("content-type").unwrap(), "application/json");
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}
