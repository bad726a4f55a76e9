//! The in-progress request and its fluent assembly chain.
//!
//! [`RequestSpec`] holds everything assembled so far: method, path, query
//! parameters, headers, attached file parts, and the body once one has been
//! constructed. Fallible links return `Result<Self>` so a chain
//! short-circuits with `?` on the first error value instead of dispatching a
//! malformed request.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use std::collections::HashMap;

use crate::body::{self, Body, Content, ContentKind, Part};
use crate::{Error, Result};

/// An HTTP request under assembly.
///
/// # Examples
///
/// ```
/// use parcel::RequestSpec;
/// use serde_json::json;
///
/// let request = RequestSpec::post("/users")
///     .query_param("notify", "true")
///     .header("x-request-id", "abc-123")?
///     .bearer_auth("s3cret")?
///     .json(&json!({"name": "Alice"}))?;
///
/// assert_eq!(request.content_type(), Some("application/json"));
/// # Ok::<(), parcel::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestSpec {
    /// The HTTP method (GET, POST, etc.).
    pub method: Method,

    /// The request path (relative to the client's base URL).
    pub path: String,

    /// Headers assembled so far. Later inserts for the same name win.
    pub headers: HeaderMap,

    /// Query parameters for this request.
    pub query_params: HashMap<String, String>,

    /// The constructed body, if any. Set once per body-construction call;
    /// later calls overwrite it.
    pub body: Option<Body>,

    /// File parts attached ahead of body construction. When non-empty, only
    /// url-encoded and multipart bodies are accepted.
    pub files: Vec<Part>,
}

impl RequestSpec {
    /// Creates a new `RequestSpec` with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            query_params: HashMap::new(),
            body: None,
            files: Vec::new(),
        }
    }

    /// Starts a GET request to the given path.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Starts a POST request to the given path.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Starts a PUT request to the given path.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Starts a DELETE request to the given path.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Starts a PATCH request to the given path.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Adds a header to the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Adds a query parameter to the request.
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    /// Adds multiple query parameters to the request.
    pub fn query_params(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query_params.extend(params);
        self
    }

    /// Sets an `Authorization: Bearer <token>` header.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Result<Self> {
        self.header("authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Sets an `Authorization: Basic <credentials>` header from a username
    /// and password.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoded credentials are not a valid header
    /// value.
    pub fn basic_auth(self, username: impl AsRef<str>, password: impl AsRef<str>) -> Result<Self> {
        use base64::{engine::general_purpose::STANDARD, Engine as _};

        let credentials =
            STANDARD.encode(format!("{}:{}", username.as_ref(), password.as_ref()));
        self.header("authorization", format!("Basic {}", credentials))
    }

    /// Attaches a part to the request's file list.
    ///
    /// Attached parts ride along in a multipart form at dispatch time, and
    /// their presence restricts the body to url-encoded or multipart kinds.
    pub fn attach(mut self, part: Part) -> Self {
        self.files.push(part);
        self
    }

    /// Returns `true` if any file parts are attached.
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    /// Returns the content-type the body will be sent with, if one has been
    /// resolved.
    pub fn content_type(&self) -> Option<&str> {
        self.body.as_ref().and_then(Body::content_type)
    }

    /// Constructs the request body from `content` under the declared `kind`.
    ///
    /// This is the content-negotiation entry point; see
    /// [`set_body`](crate::set_body) for the per-kind behavior and error
    /// conditions.
    pub fn body(self, content: impl Into<Content>, kind: ContentKind) -> Result<Self> {
        body::set_body(self, content.into(), kind)
    }

    /// Sets a JSON body from any serializable value.
    ///
    /// # Errors
    ///
    /// Propagates the serializer's error unchanged if `value` cannot be
    /// encoded.
    pub fn json<T: Serialize>(self, value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)?;
        self.body(Content::Value(value), ContentKind::Json)
    }

    /// Sets a form url-encoded body from any serializable value.
    ///
    /// # Errors
    ///
    /// Propagates the serializer's error unchanged if `value` cannot be
    /// encoded as key/value pairs.
    pub fn form<T: Serialize>(self, value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)?;
        self.body(Content::Value(value), ContentKind::UrlEncoded)
    }

    /// Sets a multipart body from typed parts.
    ///
    /// Typed parts are correct by construction, so no validation pass runs;
    /// dynamic part specifications go through
    /// [`body`](RequestSpec::body) with [`ContentKind::Multipart`] instead.
    pub fn multipart(mut self, parts: Vec<Part>) -> Self {
        self.body = Some(Body::Multipart(parts));
        self
    }

    /// Sets an opaque string body tagged with an extension token.
    ///
    /// The token is resolved to a content-type through the extension table,
    /// falling back to `application/octet-stream` for unknown tokens.
    pub fn raw(self, text: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        self.body(Content::Text(text.into()), ContentKind::Other(token.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bearer_auth_formats_the_authorization_header() {
        let spec = RequestSpec::get("/me").bearer_auth("s3cret").unwrap();
        assert_eq!(spec.headers["authorization"], "Bearer s3cret");
    }

    #[test]
    fn basic_auth_encodes_credentials() {
        let spec = RequestSpec::get("/me").basic_auth("user", "pass").unwrap();
        // base64("user:pass")
        assert_eq!(spec.headers["authorization"], "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn later_headers_override_earlier_ones() {
        let spec = RequestSpec::get("/")
            .header("x-env", "staging")
            .unwrap()
            .header("x-env", "production")
            .unwrap();
        assert_eq!(spec.headers["x-env"], "production");
        assert_eq!(spec.headers.len(), 1);
    }

    #[test]
    fn invalid_header_names_are_configuration_errors() {
        let result = RequestSpec::get("/").header("bad header", "value");
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn chain_short_circuits_on_body_error_after_attach() {
        let result = RequestSpec::post("/upload")
            .attach(Part::file("report.pdf"))
            .json(&json!({"name": "value"}));
        assert!(matches!(result, Err(Error::BodyKindWithFiles)));
    }

    #[test]
    fn form_sugar_produces_a_url_encoded_body() {
        #[derive(Serialize)]
        struct Login {
            user: String,
        }

        let spec = RequestSpec::post("/login")
            .form(&Login {
                user: "alice".to_string(),
            })
            .unwrap();
        assert_eq!(
            spec.content_type(),
            Some("application/x-www-form-urlencoded")
        );
        assert!(matches!(
            spec.body,
            Some(Body::Single { ref payload, .. }) if payload == "user=alice"
        ));
    }

    #[test]
    fn multipart_sugar_stores_typed_parts_directly() {
        let spec = RequestSpec::post("/upload")
            .attach(Part::file("a.txt"))
            .multipart(vec![Part::field("field1", "val1")]);
        assert_eq!(
            spec.body,
            Some(Body::Multipart(vec![Part::field("field1", "val1")]))
        );
    }

    #[test]
    fn raw_sugar_resolves_the_token() {
        let spec = RequestSpec::put("/blob").raw("raw data", "madeupext").unwrap();
        assert_eq!(spec.content_type(), Some("application/octet-stream"));
    }
}
