//! MIME type resolution for short extension tokens.
//!
//! Body construction resolves a declared content token (`"json"`, `"xml"`,
//! `"png"`, ...) to a full MIME type through a static lookup table. Unknown
//! tokens never fail; they fall back to [`OCTET_STREAM`] so a request with an
//! unrecognized extension still goes out with a usable content-type.

/// Fallback MIME type for tokens not present in the lookup table.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// MIME type for form url-encoded bodies.
///
/// This is a literal rather than an entry resolved through
/// [`from_extension`]: url-encoded bodies always carry exactly this string,
/// independent of the extension table.
pub const FORM_URL_ENCODED: &str = "application/x-www-form-urlencoded";

/// Resolves an extension token to a full MIME type string.
///
/// The lookup is case-insensitive and total: tokens outside the table resolve
/// to [`OCTET_STREAM`].
///
/// # Examples
///
/// ```
/// assert_eq!(parcel::mime::from_extension("json"), "application/json");
/// assert_eq!(parcel::mime::from_extension("madeupext"), "application/octet-stream");
/// ```
pub fn from_extension(token: &str) -> &'static str {
    match token.to_ascii_lowercase().as_str() {
        "json" => "application/json",
        "xml" => "application/xml",
        "txt" | "text" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "js" => "text/javascript",
        "md" => "text/markdown",
        "yaml" | "yml" => "application/yaml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        _ => OCTET_STREAM,
    }
}

/// Resolves the extension of a file path, falling back to [`OCTET_STREAM`]
/// when the path has no extension.
pub fn from_path(path: &str) -> &'static str {
    match std::path::Path::new(path).extension().and_then(|e| e.to_str()) {
        Some(ext) => from_extension(ext),
        None => OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tokens_resolve() {
        assert_eq!(from_extension("json"), "application/json");
        assert_eq!(from_extension("xml"), "application/xml");
        assert_eq!(from_extension("txt"), "text/plain");
        assert_eq!(from_extension("png"), "image/png");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(from_extension("JSON"), "application/json");
        assert_eq!(from_extension("Png"), "image/png");
    }

    #[test]
    fn unknown_tokens_fall_back_to_octet_stream() {
        assert_eq!(from_extension("madeupext"), OCTET_STREAM);
        assert_eq!(from_extension(""), OCTET_STREAM);
    }

    #[test]
    fn resolution_is_idempotent() {
        let first = from_extension("csv");
        let second = from_extension("csv");
        assert_eq!(first, second);
    }

    #[test]
    fn path_resolution_uses_the_extension() {
        assert_eq!(from_path("reports/q3.pdf"), "application/pdf");
        assert_eq!(from_path("Makefile"), OCTET_STREAM);
    }
}
