//! Transport client that dispatches assembled requests.
//!
//! The [`Client`] type is a thin delegate over `reqwest`: it joins the base
//! URL, merges headers, maps the constructed [`Body`] onto the wire, and
//! performs the network call. Use [`ClientBuilder`] to configure and create
//! clients. Everything interesting about a request happens before it gets
//! here, in the fluent chain.

use crate::{
    body::{Body, Part},
    mime, Error, RequestSpec, Response, Result,
};
use http::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part as FormPart};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Dispatches assembled [`RequestSpec`] values over HTTP.
///
/// The client is designed to be reused across requests: it holds a connection
/// pool and configuration that applies to every dispatch, and is cheap to
/// clone.
///
/// # Examples
///
/// ```no_run
/// use parcel::{Client, RequestSpec};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), parcel::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .default_header("user-agent", "my-app/1.0")?
///     .build()?;
///
/// let request = RequestSpec::post("/users").json(&json!({"name": "Alice"}))?;
/// let response = client.send(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: Url,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Dispatches an assembled request and returns the raw response.
    ///
    /// Headers merge in order: client defaults, then per-request headers,
    /// then the body's resolved content-type. Multipart bodies (and any
    /// attached file parts) are converted to a multipart form; file parts are
    /// read from disk here, at the last possible moment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileRead`] if an attached file cannot be read,
    /// [`Error::ConfigurationError`] for invalid per-part headers, and
    /// [`Error::Network`] for transport failures.
    pub async fn send(&self, spec: RequestSpec) -> Result<Response> {
        let RequestSpec {
            method,
            path,
            headers,
            query_params,
            body,
            files,
        } = spec;

        let mut url = self.inner.base_url.clone();
        url.set_path(&path);
        for (key, value) in &query_params {
            url.query_pairs_mut().append_pair(key, value);
        }

        tracing::debug!(method = %method, url = %url, "dispatching request");

        let mut request = self.inner.http_client.request(method, url);

        for (name, value) in &self.inner.default_headers {
            request = request.header(name, value);
        }
        for (name, value) in &headers {
            request = request.header(name, value);
        }
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let request = match (body, files.is_empty()) {
            (
                Some(Body::Single {
                    content_type,
                    payload,
                    ..
                }),
                true,
            ) => request
                .header(http::header::CONTENT_TYPE, content_type)
                .body(payload),
            (Some(Body::Single { kind, payload, .. }), false) => {
                // Files may have been attached after the body was built, so
                // the body-construction guard is re-checked here.
                if kind != crate::ContentKind::UrlEncoded {
                    return Err(Error::BodyKindWithFiles);
                }
                // Url-encoded pairs join the attached files in one form.
                let mut form = Form::new();
                for (key, value) in url::form_urlencoded::parse(payload.as_bytes()) {
                    form = form.text(key.into_owned(), value.into_owned());
                }
                request.multipart(append_parts(form, files)?)
            }
            (Some(Body::Multipart(parts)), _) => {
                let form = append_parts(Form::new(), parts)?;
                request.multipart(append_parts(form, files)?)
            }
            (None, false) => request.multipart(append_parts(Form::new(), files)?),
            (None, true) => request,
        };

        let start = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        let latency = start.elapsed();

        if status.is_success() {
            tracing::info!(
                status = status.as_u16(),
                latency_ms = latency.as_millis(),
                "received HTTP response"
            );
        } else {
            tracing::warn!(
                status = status.as_u16(),
                response = %body,
                "received non-success HTTP response"
            );
        }

        Ok(Response::new(status, headers, body, latency))
    }
}

/// Appends typed parts to a multipart form.
///
/// File parts are read from disk; their form field name comes from a `name`
/// entry in the part's extra attributes when present, falling back to the
/// file stem.
fn append_parts(mut form: Form, parts: Vec<Part>) -> Result<Form> {
    for part in parts {
        form = match part {
            Part::Field { name, data } => form.text(name, data),
            Part::File {
                file_name,
                extra,
                headers,
            } => {
                let bytes = std::fs::read(&file_name)?;
                let field_name = extra
                    .get("name")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| file_stem(&file_name));
                let attachment_name = Path::new(&file_name)
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(&file_name)
                    .to_string();

                let mut form_part = FormPart::bytes(bytes)
                    .file_name(attachment_name)
                    .mime_str(mime::from_path(&file_name))
                    .map_err(Error::Network)?;
                if !headers.is_empty() {
                    form_part = form_part.headers(part_headers(&headers)?);
                }

                form.part(field_name, form_part)
            }
        };
    }
    Ok(form)
}

fn file_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file")
        .to_string()
}

fn part_headers(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::try_from(name.as_str())
            .map_err(|e| Error::ConfigurationError(format!("Invalid part header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_str())
            .map_err(|e| Error::ConfigurationError(format!("Invalid part header value: {}", e)))?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use parcel::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), parcel::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.example.com")?
///     .timeout(Duration::from_secs(30))
///     .default_header("user-agent", "my-app/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<Url>,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            default_headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Sets the base URL for all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL was provided or if the underlying
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::ConfigurationError("Base URL is required".to_string()))?;

        let http_client = reqwest::Client::builder().build().map_err(|e| {
            Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                default_headers: self.default_headers,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
