//! Error types for request assembly and dispatch.
//!
//! Every failure in the fluent chain is an `Err` value the caller inspects;
//! nothing panics mid-chain. Body construction errors are all-or-nothing: a
//! failed call leaves no partial body behind, and `?` in the chain aborts
//! before a malformed request can reach the wire.

use crate::body::MalformedPart;

/// The main error type for request assembly and dispatch.
///
/// # Examples
///
/// ```
/// use parcel::{Error, Part, RequestSpec};
/// use serde_json::json;
///
/// let result = RequestSpec::post("/upload")
///     .attach(Part::file("report.pdf"))
///     .json(&json!({"name": "value"}));
///
/// match result {
///     Err(Error::BodyKindWithFiles) => { /* pick url_encoded or multipart */ }
///     Err(e) => eprintln!("other error: {}", e),
///     Ok(_) => unreachable!(),
/// }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A body kind other than url-encoded or multipart was requested while
    /// file parts are attached.
    ///
    /// File parts can only ride along in a form-shaped body, so this guard
    /// fires before any serialization is attempted.
    #[error("body must be url_encoded or multipart when files are attached")]
    BodyKindWithFiles,

    /// JSON encoding of structured body content failed.
    ///
    /// The underlying `serde_json` error is passed through unchanged.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Form url-encoding of structured body content failed.
    ///
    /// The underlying `serde_urlencoded` error is passed through unchanged.
    #[error(transparent)]
    UrlEncode(#[from] serde_urlencoded::ser::Error),

    /// One or more multipart part specifications did not match a valid part
    /// shape.
    ///
    /// Validation runs over the whole list before failing, so this carries
    /// every offending specification along with guidance on the accepted
    /// shapes, not just the first mismatch. No parts are stored when any
    /// entry is invalid.
    #[error("{} multipart part specification(s) rejected", .0.len())]
    MalformedParts(Vec<MalformedPart>),

    /// Structured content was supplied under a raw extension token.
    ///
    /// Raw-token bodies are passed through as opaque payloads, so the content
    /// must already be a string.
    #[error("body content for raw token `{token}` must be a string")]
    RawBodyNotText {
        /// The extension token the body was declared with.
        token: String,
    },

    /// Invalid configuration was provided.
    ///
    /// This indicates a problem with how the client or request was configured,
    /// such as an invalid URL or invalid header values.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A network-level error occurred (connection failed, DNS lookup failed,
    /// etc.).
    ///
    /// This wraps the underlying `reqwest::Error` and indicates problems at
    /// the transport layer rather than during request assembly.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Reading an attached file part from disk failed at dispatch time.
    #[error("Failed to read file part: {0}")]
    FileRead(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if this error was produced while assembling the request,
    /// before anything touched the network.
    ///
    /// Assembly errors are terminal for the chain: the request they belong to
    /// must not be dispatched.
    ///
    /// # Examples
    ///
    /// ```
    /// use parcel::Error;
    ///
    /// assert!(Error::BodyKindWithFiles.is_assembly_error());
    /// ```
    pub fn is_assembly_error(&self) -> bool {
        match self {
            Error::BodyKindWithFiles
            | Error::Json(_)
            | Error::UrlEncode(_)
            | Error::MalformedParts(_)
            | Error::RawBodyNotText { .. }
            | Error::ConfigurationError(_)
            | Error::InvalidUrl(_) => true,
            Error::Network(_) | Error::FileRead(_) => false,
        }
    }

    /// Returns the rejected multipart part specifications, if this error
    /// carries any.
    pub fn malformed_parts(&self) -> Option<&[MalformedPart]> {
        match self {
            Error::MalformedParts(parts) => Some(parts),
            _ => None,
        }
    }
}

/// A specialized `Result` type for request assembly and dispatch.
///
/// This is a convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
