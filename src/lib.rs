//! # Parcel - fluent HTTP request assembly
//!
//! Parcel is a request-construction library that sits in front of an HTTP
//! transport (`reqwest`). A request is assembled incrementally through a
//! fluent chain (method, path, headers, authentication, body), then handed to
//! a [`Client`] for dispatch. The heart of the crate is content negotiation:
//! deciding how arbitrary input data (maps, lists, raw strings, file
//! attachments) is serialized into a wire-ready body with the correct
//! content-type, across four content modes (json, url-encoded, multipart,
//! raw).
//!
//! ## Quick Start
//!
//! ```no_run
//! use parcel::{Client, RequestSpec};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct CreateUser {
//!     name: String,
//!     email: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), parcel::Error> {
//!     let client = Client::builder()
//!         .base_url("https://api.example.com")?
//!         .default_header("user-agent", "my-app/1.0")?
//!         .build()?;
//!
//!     let new_user = CreateUser {
//!         name: "Alice".to_string(),
//!         email: "alice@example.com".to_string(),
//!     };
//!
//!     let request = RequestSpec::post("/users")
//!         .bearer_auth("s3cret")?
//!         .json(&new_user)?;
//!
//!     let response = client.send(request).await?;
//!     println!("Status: {}", response.status);
//!     println!("Body: {}", response.body);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Fluent assembly** - Chained configuration calls that short-circuit on
//!   the first error, so a malformed request never reaches the wire
//! - **Content negotiation** - JSON, form url-encoded, multipart, and raw
//!   extension-tagged bodies, each with the right content-type resolved for
//!   you
//! - **Batch part validation** - Every malformed multipart part is reported
//!   in one pass, with guidance on the accepted shapes
//! - **File attachments** - Attached files ride along in a multipart form;
//!   incompatible body kinds are rejected up front
//! - **Errors as values** - One `thiserror` enum for every failure, inspected
//!   mid-chain rather than thrown
//! - **Automatic logging** - Structured logging with `tracing` for
//!   observability
//!
//! ## Body construction
//!
//! The [`set_body`] entry point (wrapped by [`RequestSpec::body`] and its
//! sugar methods) dispatches on the declared [`ContentKind`]:
//!
//! ```
//! use parcel::{Content, ContentKind, RequestSpec};
//! use serde_json::json;
//!
//! // Structured content is encoded; raw strings pass through untouched.
//! let request = RequestSpec::post("/search")
//!     .body(json!({"query": "rust"}), ContentKind::Json)?;
//! assert_eq!(request.content_type(), Some("application/json"));
//!
//! // Unknown extension tokens never fail; they fall back to a binary type.
//! let request = RequestSpec::put("/blob").raw("raw data", "madeupext")?;
//! assert_eq!(request.content_type(), Some("application/octet-stream"));
//! # Ok::<(), parcel::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Fallible chain links return `Result<RequestSpec>`, so `?` aborts the chain
//! at the first failure:
//!
//! ```
//! use parcel::{Error, Part, RequestSpec};
//! use serde_json::json;
//!
//! // A json body is not allowed once files are attached.
//! let result = RequestSpec::post("/upload")
//!     .attach(Part::file("report.pdf"))
//!     .json(&json!({"name": "value"}));
//! assert!(matches!(result, Err(Error::BodyKindWithFiles)));
//!
//! // Multipart validation reports every offending part, not just the first.
//! let result = RequestSpec::post("/upload").body(
//!     vec![json!(["field1", "val1"]), json!({"bad": "shape"}), json!(42)],
//!     parcel::ContentKind::Multipart,
//! );
//! let err = result.unwrap_err();
//! assert_eq!(err.malformed_parts().unwrap().len(), 2);
//! ```

mod client;
mod error;
pub mod body;
pub mod mime;
mod request;
mod response;

pub use body::{set_body, Body, Content, ContentKind, MalformedPart, Part};
pub use client::{Client, ClientBuilder};
pub use error::{Error, Result};
pub use request::RequestSpec;
pub use response::Response;
