//! MIME type table
//!
//! Maps file extensions to Content-Type values. The table is built once at
//! startup (defaults plus overrides) and shared read-only with the handler,
//! instead of mutating a process-wide registry.

use std::collections::HashMap;
use std::path::Path;

/// Content-Type used when the extension is unknown or missing.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Default extension → Content-Type pairs.
const DEFAULT_TYPES: &[(&str, &str)] = &[
    // Text
    ("html", "text/html; charset=utf-8"),
    ("htm", "text/html; charset=utf-8"),
    ("css", "text/css"),
    ("txt", "text/plain; charset=utf-8"),
    ("md", "text/plain; charset=utf-8"),
    ("xml", "application/xml"),
    // JavaScript/WASM
    ("js", "application/javascript"),
    ("mjs", "application/javascript"),
    ("json", "application/json"),
    ("wasm", "application/wasm"),
    // Images
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("webp", "image/webp"),
    // Video
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("ogg", "video/ogg"),
    ("ogv", "video/ogg"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    // Audio
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("flac", "audio/flac"),
    ("m4a", "audio/mp4"),
    // Fonts
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
    ("eot", "application/vnd.ms-fontobject"),
    // Documents
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
    ("gzip", "application/gzip"),
    ("tar", "application/x-tar"),
];

/// Extensions whose default mapping is wrong or missing upstream.
const OVERRIDE_TYPES: &[(&str, &str)] = &[("webmanifest", "application/manifest+json")];

/// Immutable extension → Content-Type table.
///
/// # Examples
/// ```
/// use isoserve::http::mime::MimeTable;
/// let table = MimeTable::new();
/// assert_eq!(table.content_type(Some("html")), "text/html; charset=utf-8");
/// assert_eq!(table.content_type(Some("webmanifest")), "application/manifest+json");
/// assert_eq!(table.content_type(None), "application/octet-stream");
/// ```
#[derive(Debug)]
pub struct MimeTable {
    map: HashMap<&'static str, &'static str>,
}

impl MimeTable {
    /// Build the table from the defaults with the overrides merged on top.
    #[must_use]
    pub fn new() -> Self {
        let mut map: HashMap<&'static str, &'static str> =
            DEFAULT_TYPES.iter().copied().collect();
        for &(ext, content_type) in OVERRIDE_TYPES {
            map.insert(ext, content_type);
        }
        Self { map }
    }

    /// Look up the Content-Type for a file extension (case-insensitive).
    #[must_use]
    pub fn content_type(&self, extension: Option<&str>) -> &'static str {
        extension
            .map(str::to_ascii_lowercase)
            .and_then(|ext| self.map.get(ext.as_str()).copied())
            .unwrap_or(FALLBACK_CONTENT_TYPE)
    }

    /// Look up the Content-Type for a path, using its extension.
    #[must_use]
    pub fn content_type_for_path(&self, path: &Path) -> &'static str {
        self.content_type(path.extension().and_then(|e| e.to_str()))
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        let table = MimeTable::new();
        assert_eq!(table.content_type(Some("html")), "text/html; charset=utf-8");
        assert_eq!(table.content_type(Some("css")), "text/css");
        assert_eq!(table.content_type(Some("js")), "application/javascript");
        assert_eq!(table.content_type(Some("json")), "application/json");
        assert_eq!(table.content_type(Some("png")), "image/png");
        assert_eq!(table.content_type(Some("mp4")), "video/mp4");
    }

    #[test]
    fn test_webmanifest_override() {
        let table = MimeTable::new();
        assert_eq!(
            table.content_type(Some("webmanifest")),
            "application/manifest+json"
        );
    }

    #[test]
    fn test_unknown_extension() {
        let table = MimeTable::new();
        assert_eq!(table.content_type(Some("xyz")), "application/octet-stream");
        assert_eq!(table.content_type(None), "application/octet-stream");
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let table = MimeTable::new();
        assert_eq!(table.content_type(Some("HTML")), "text/html; charset=utf-8");
        assert_eq!(table.content_type(Some("PnG")), "image/png");
    }

    #[test]
    fn test_path_lookup() {
        let table = MimeTable::new();
        assert_eq!(
            table.content_type_for_path(Path::new("app.webmanifest")),
            "application/manifest+json"
        );
        assert_eq!(
            table.content_type_for_path(Path::new("no_extension")),
            "application/octet-stream"
        );
    }
}
