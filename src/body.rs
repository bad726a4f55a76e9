//! Body construction and content negotiation.
//!
//! This module is the core of the crate: [`set_body`] takes an in-progress
//! [`RequestSpec`], a content value, and a declared [`ContentKind`], and
//! produces an updated spec carrying a wire-ready payload plus the matching
//! content-type, or a structured error. It owns all of the branching logic in
//! the fluent chain; everything around it is a data copy or a delegate call.
//!
//! Four content modes are supported:
//!
//! - **json** — structured content is JSON-encoded, raw strings pass through;
//! - **url_encoded** — structured content is form url-encoded;
//! - **multipart** — content is a list of part specifications, validated as a
//!   batch into typed [`Part`] values;
//! - **raw token** — any other extension token treats the content as an opaque
//!   string and resolves the content-type through [`crate::mime`].

use serde_json::Value;

use crate::{mime, request::RequestSpec, Error, Result};

/// The declared category of body content.
///
/// `Json`, `UrlEncoded`, and `Multipart` select a serialization mode;
/// `Other` carries a free-form extension token (e.g. `"xml"`, `"txt"`) that
/// is resolved to a MIME type and otherwise leaves the payload untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentKind {
    /// JSON body, `application/json`.
    Json,
    /// Form url-encoded body, `application/x-www-form-urlencoded`.
    UrlEncoded,
    /// Multipart form body; the content-type (and boundary) is produced by
    /// the transport at dispatch time.
    Multipart,
    /// An opaque payload tagged with an extension or MIME token.
    Other(String),
}

impl ContentKind {
    /// Whether file parts may be attached alongside this body kind.
    fn allows_files(&self) -> bool {
        matches!(self, ContentKind::UrlEncoded | ContentKind::Multipart)
    }
}

/// Body content handed to [`set_body`].
///
/// The raw-versus-structured distinction is explicit rather than sniffed at
/// runtime: `Text` passes through every kind unmodified, `Value` is encoded
/// according to the declared kind, and `Parts` is the dynamic multipart
/// specification list.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// An already-serialized payload; stored as-is under every kind.
    Text(String),
    /// Structured content (map or list) to be encoded for the declared kind.
    Value(Value),
    /// Dynamic multipart part specifications, validated element by element.
    Parts(Vec<Value>),
}

impl Content {
    /// Normalizes content to a string by JSON-encoding anything structured.
    ///
    /// Encoder errors propagate unchanged.
    fn into_text_via_json(self) -> Result<String> {
        match self {
            Content::Text(text) => Ok(text),
            Content::Value(value) => Ok(serde_json::to_string(&value)?),
            Content::Parts(parts) => Ok(serde_json::to_string(&parts)?),
        }
    }

    /// Normalizes content to a string by form url-encoding anything
    /// structured.
    ///
    /// Encoder errors propagate unchanged. Pair ordering in the output is not
    /// significant.
    fn into_text_via_form(self) -> Result<String> {
        match self {
            Content::Text(text) => Ok(text),
            Content::Value(value) => Ok(serde_urlencoded::to_string(&value)?),
            Content::Parts(parts) => Ok(serde_urlencoded::to_string(&parts)?),
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        Content::Value(value)
    }
}

impl From<Vec<Value>> for Content {
    fn from(parts: Vec<Value>) -> Self {
        Content::Parts(parts)
    }
}

/// The marker string that opens a file part specification.
pub const FILE_MARKER: &str = "file";

/// Guidance attached to every rejected part specification.
pub const PART_GUIDANCE: &str = "a part must be either [name, data] with both strings, \
     or [\"file\", file_name, extra, headers] with a string file name, an object of \
     extra attributes, and an array of [name, value] header pairs";

/// One element of a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// A plain form field.
    Field {
        /// The form field name.
        name: String,
        /// The field data.
        data: String,
    },
    /// A file attachment, read from disk at dispatch time.
    File {
        /// Path of the file to attach.
        file_name: String,
        /// Extra attributes (e.g. a `name` override for the form field).
        extra: serde_json::Map<String, Value>,
        /// Additional headers for this part, in order.
        headers: Vec<(String, String)>,
    },
}

impl Part {
    /// Creates a plain form field part.
    ///
    /// # Examples
    ///
    /// ```
    /// let part = parcel::Part::field("field1", "val1");
    /// ```
    pub fn field(name: impl Into<String>, data: impl Into<String>) -> Self {
        Part::Field {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Creates a file part for the given path, with no extra attributes or
    /// headers.
    pub fn file(file_name: impl Into<String>) -> Self {
        Part::File {
            file_name: file_name.into(),
            extra: serde_json::Map::new(),
            headers: Vec::new(),
        }
    }

    /// Creates a fully-specified file part.
    pub fn file_with(
        file_name: impl Into<String>,
        extra: serde_json::Map<String, Value>,
        headers: Vec<(String, String)>,
    ) -> Self {
        Part::File {
            file_name: file_name.into(),
            extra,
            headers,
        }
    }

    /// Validates a dynamic part specification against the two legal shapes.
    ///
    /// A `[name, data]` array of two strings is a field; a
    /// `["file", file_name, extra, headers]` array is a file, where `extra`
    /// is an object and `headers` is an array of `[name, value]` string
    /// pairs. Returns `None` for anything else.
    pub fn from_spec(spec: &Value) -> Option<Part> {
        match spec.as_array()?.as_slice() {
            [Value::String(name), Value::String(data)] => Some(Part::Field {
                name: name.clone(),
                data: data.clone(),
            }),
            [Value::String(marker), Value::String(file_name), Value::Object(extra), Value::Array(headers)]
                if marker == FILE_MARKER =>
            {
                let mut pairs = Vec::with_capacity(headers.len());
                for header in headers {
                    match header.as_array()?.as_slice() {
                        [Value::String(name), Value::String(value)] => {
                            pairs.push((name.clone(), value.clone()));
                        }
                        _ => return None,
                    }
                }
                Some(Part::File {
                    file_name: file_name.clone(),
                    extra: extra.clone(),
                    headers: pairs,
                })
            }
            _ => None,
        }
    }
}

/// A part specification that matched neither valid shape, paired with the
/// guidance shown to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedPart {
    /// The specification exactly as it was supplied.
    pub spec: Value,
    /// Human-readable description of the two accepted shapes.
    pub guidance: &'static str,
}

/// A serialized request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// A single-part body: the declared kind, its resolved content-type, and
    /// the wire-ready payload.
    Single {
        /// The kind the body was declared with.
        kind: ContentKind,
        /// The resolved content-type header value.
        content_type: String,
        /// The serialized payload.
        payload: String,
    },
    /// An ordered multipart body. No content-type is attached here; boundary
    /// generation belongs to the transport.
    Multipart(Vec<Part>),
}

impl Body {
    /// Returns the content-type header value for single-part bodies.
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Body::Single { content_type, .. } => Some(content_type),
            Body::Multipart(_) => None,
        }
    }
}

/// Serializes `content` under the declared `kind` and stores it on `spec`.
///
/// This is the single dispatch point for body construction. The call is
/// all-or-nothing: on error nothing is stored, and the chain the spec belongs
/// to must abort rather than dispatch.
///
/// # Errors
///
/// - [`Error::BodyKindWithFiles`] if file parts are attached and `kind` is
///   neither [`ContentKind::UrlEncoded`] nor [`ContentKind::Multipart`]; this
///   guard runs before any serialization.
/// - [`Error::Json`] / [`Error::UrlEncode`] when an encoder rejects
///   structured content; the encoder's error is passed through unchanged.
/// - [`Error::MalformedParts`] when any multipart part specification fails
///   validation; carries the complete list of offenders.
/// - [`Error::RawBodyNotText`] when structured content is supplied under a
///   raw extension token.
///
/// # Examples
///
/// ```
/// use parcel::{set_body, Content, ContentKind, RequestSpec};
/// use serde_json::json;
///
/// let spec = set_body(
///     RequestSpec::post("/users"),
///     Content::Value(json!({"name": "value"})),
///     ContentKind::Json,
/// )?;
/// assert_eq!(spec.body.unwrap().content_type(), Some("application/json"));
/// # Ok::<(), parcel::Error>(())
/// ```
pub fn set_body(mut spec: RequestSpec, content: Content, kind: ContentKind) -> Result<RequestSpec> {
    if spec.has_files() && !kind.allows_files() {
        return Err(Error::BodyKindWithFiles);
    }

    match kind {
        ContentKind::Json => {
            let payload = content.into_text_via_json()?;
            let content_type = mime::from_extension("json").to_string();
            tracing::debug!(bytes = payload.len(), %content_type, "set json body");
            spec.body = Some(Body::Single {
                kind: ContentKind::Json,
                content_type,
                payload,
            });
        }
        ContentKind::UrlEncoded => {
            let payload = content.into_text_via_form()?;
            // The form MIME is a literal, not an extension-table lookup.
            let content_type = mime::FORM_URL_ENCODED.to_string();
            tracing::debug!(bytes = payload.len(), %content_type, "set url-encoded body");
            spec.body = Some(Body::Single {
                kind: ContentKind::UrlEncoded,
                content_type,
                payload,
            });
        }
        ContentKind::Multipart => {
            let specs = match content {
                Content::Parts(specs) => specs,
                Content::Value(Value::Array(specs)) => specs,
                // A non-sequence under multipart is one malformed entry.
                Content::Value(other) => vec![other],
                Content::Text(text) => vec![Value::String(text)],
            };

            let mut parts = Vec::with_capacity(specs.len());
            let mut malformed = Vec::new();
            for part_spec in &specs {
                match Part::from_spec(part_spec) {
                    Some(part) => parts.push(part),
                    None => malformed.push(MalformedPart {
                        spec: part_spec.clone(),
                        guidance: PART_GUIDANCE,
                    }),
                }
            }
            if !malformed.is_empty() {
                return Err(Error::MalformedParts(malformed));
            }

            tracing::debug!(parts = parts.len(), "set multipart body");
            spec.body = Some(Body::Multipart(parts));
        }
        ContentKind::Other(token) => {
            let Content::Text(payload) = content else {
                return Err(Error::RawBodyNotText { token });
            };
            let content_type = mime::from_extension(&token).to_string();
            tracing::debug!(bytes = payload.len(), %token, %content_type, "set raw body");
            spec.body = Some(Body::Single {
                kind: ContentKind::Other(token),
                content_type,
                payload,
            });
        }
    }

    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn empty_spec() -> RequestSpec {
        RequestSpec::post("/test")
    }

    fn spec_with_file() -> RequestSpec {
        empty_spec().attach(Part::file("a.txt"))
    }

    #[test]
    fn files_guard_rejects_json() {
        let result = set_body(
            spec_with_file(),
            Content::Value(json!({"name": "value"})),
            ContentKind::Json,
        );
        assert!(matches!(result, Err(Error::BodyKindWithFiles)));
    }

    #[test]
    fn files_guard_rejects_raw_tokens_regardless_of_content() {
        let result = set_body(
            spec_with_file(),
            Content::Text("raw data".to_string()),
            ContentKind::Other("txt".to_string()),
        );
        assert!(matches!(result, Err(Error::BodyKindWithFiles)));
    }

    #[test]
    fn files_guard_admits_form_kinds() {
        let spec = set_body(
            spec_with_file(),
            Content::Value(json!({"name": "value"})),
            ContentKind::UrlEncoded,
        )
        .unwrap();
        assert!(spec.body.is_some());

        let spec = set_body(spec_with_file(), Content::Parts(vec![]), ContentKind::Multipart).unwrap();
        assert_eq!(spec.body, Some(Body::Multipart(vec![])));
    }

    #[test]
    fn json_round_trips_structured_content() {
        let spec = set_body(
            empty_spec(),
            Content::Value(json!({"name": "value"})),
            ContentKind::Json,
        )
        .unwrap();

        let Some(Body::Single {
            kind,
            content_type,
            payload,
        }) = spec.body
        else {
            panic!("expected a single-part body");
        };
        assert_eq!(kind, ContentKind::Json);
        assert_eq!(content_type, "application/json");
        let decoded: Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(decoded, json!({"name": "value"}));
    }

    #[test]
    fn json_passes_raw_strings_through() {
        let spec = set_body(
            empty_spec(),
            Content::Text("{\"already\":\"encoded\"}".to_string()),
            ContentKind::Json,
        )
        .unwrap();

        assert_eq!(
            spec.body,
            Some(Body::Single {
                kind: ContentKind::Json,
                content_type: "application/json".to_string(),
                payload: "{\"already\":\"encoded\"}".to_string(),
            })
        );
    }

    #[test]
    fn url_encoding_is_deterministic() {
        let spec = set_body(
            empty_spec(),
            Content::Value(json!({"name": "value"})),
            ContentKind::UrlEncoded,
        )
        .unwrap();

        assert_eq!(
            spec.body,
            Some(Body::Single {
                kind: ContentKind::UrlEncoded,
                content_type: "application/x-www-form-urlencoded".to_string(),
                payload: "name=value".to_string(),
            })
        );
    }

    #[test]
    fn multipart_accepts_all_valid_parts_unchanged() {
        let spec = set_body(
            empty_spec(),
            Content::Parts(vec![
                json!(["field1", "val1"]),
                json!(["file", "a.txt", {}, []]),
            ]),
            ContentKind::Multipart,
        )
        .unwrap();

        assert_eq!(
            spec.body,
            Some(Body::Multipart(vec![
                Part::field("field1", "val1"),
                Part::file("a.txt"),
            ]))
        );
    }

    #[test]
    fn multipart_validates_file_headers() {
        let spec = set_body(
            empty_spec(),
            Content::Parts(vec![json!([
                "file",
                "a.txt",
                {"name": "attachment"},
                [["content-id", "one"]]
            ])]),
            ContentKind::Multipart,
        )
        .unwrap();

        let Some(Body::Multipart(parts)) = spec.body else {
            panic!("expected a multipart body");
        };
        assert_eq!(
            parts[0],
            Part::File {
                file_name: "a.txt".to_string(),
                extra: json!({"name": "attachment"}).as_object().unwrap().clone(),
                headers: vec![("content-id".to_string(), "one".to_string())],
            }
        );
    }

    #[test]
    fn multipart_rejects_the_whole_batch_on_any_invalid_part() {
        let result = set_body(
            empty_spec(),
            Content::Parts(vec![json!(["field1", "val1"]), json!({"bad": "shape"})]),
            ContentKind::Multipart,
        );

        let Err(Error::MalformedParts(malformed)) = result else {
            panic!("expected MalformedParts");
        };
        assert_eq!(malformed.len(), 1);
        assert_eq!(malformed[0].spec, json!({"bad": "shape"}));
        assert_eq!(malformed[0].guidance, PART_GUIDANCE);
    }

    #[test]
    fn multipart_reports_every_invalid_part() {
        let result = set_body(
            empty_spec(),
            Content::Parts(vec![
                json!({"bad": "shape"}),
                json!(["field1", "val1"]),
                json!(42),
                json!(["file", "a.txt", {}, [["broken"]]]),
            ]),
            ContentKind::Multipart,
        );

        let Err(Error::MalformedParts(malformed)) = result else {
            panic!("expected MalformedParts");
        };
        assert_eq!(malformed.len(), 3);
        assert_eq!(malformed[0].spec, json!({"bad": "shape"}));
        assert_eq!(malformed[1].spec, json!(42));
        assert_eq!(malformed[2].spec, json!(["file", "a.txt", {}, [["broken"]]]));
    }

    #[test]
    fn unknown_extension_tokens_never_fail() {
        let spec = set_body(
            empty_spec(),
            Content::Text("raw data".to_string()),
            ContentKind::Other("madeupext".to_string()),
        )
        .unwrap();

        assert_eq!(
            spec.body,
            Some(Body::Single {
                kind: ContentKind::Other("madeupext".to_string()),
                content_type: "application/octet-stream".to_string(),
                payload: "raw data".to_string(),
            })
        );
    }

    #[test]
    fn structured_content_under_a_raw_token_is_rejected() {
        let result = set_body(
            empty_spec(),
            Content::Value(json!({"name": "value"})),
            ContentKind::Other("xml".to_string()),
        );
        assert!(matches!(result, Err(Error::RawBodyNotText { token }) if token == "xml"));
    }

    #[test]
    fn later_bodies_overwrite_earlier_ones() {
        let spec = set_body(
            empty_spec(),
            Content::Text("first".to_string()),
            ContentKind::Other("txt".to_string()),
        )
        .unwrap();
        let spec = set_body(
            spec,
            Content::Value(json!({"second": true})),
            ContentKind::Json,
        )
        .unwrap();

        assert_eq!(spec.body.unwrap().content_type(), Some("application/json"));
    }
}
