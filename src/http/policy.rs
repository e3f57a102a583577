//! Browser policy response headers
//!
//! Every response carries a fixed set of headers: a Permissions-Policy that
//! grants the motion/location features modern web APIs need, plus the two
//! cross-origin isolation headers (COOP/COEP). The set is built once at
//! startup and applied after the static-file logic has produced its own
//! headers, so 404s, redirects, and directory listings carry it too.

use hyper::header::{HeaderMap, HeaderName, HeaderValue};

pub const PERMISSIONS_POLICY: &str =
    "geolocation=*, accelerometer=*, gyroscope=*, magnetometer=(), microphone=(), camera=()";
pub const OPENER_POLICY: &str = "same-origin";
pub const EMBEDDER_POLICY: &str = "require-corp";

/// Fixed ordered list of headers appended to every response.
#[derive(Debug)]
pub struct PolicyHeaderSet {
    pairs: Vec<(HeaderName, HeaderValue)>,
}

impl PolicyHeaderSet {
    /// Build the standard three-header set.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            pairs: vec![
                (
                    HeaderName::from_static("permissions-policy"),
                    HeaderValue::from_static(PERMISSIONS_POLICY),
                ),
                (
                    HeaderName::from_static("cross-origin-opener-policy"),
                    HeaderValue::from_static(OPENER_POLICY),
                ),
                (
                    HeaderName::from_static("cross-origin-embedder-policy"),
                    HeaderValue::from_static(EMBEDDER_POLICY),
                ),
            ],
        }
    }

    /// Apply the set to a response header map, in order.
    pub fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in &self.pairs {
            headers.insert(name.clone(), value.clone());
        }
    }
}

impl Default for PolicyHeaderSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_sets_all_three() {
        let set = PolicyHeaderSet::standard();
        let mut headers = HeaderMap::new();
        set.apply(&mut headers);

        assert_eq!(
            headers.get("permissions-policy").unwrap(),
            "geolocation=*, accelerometer=*, gyroscope=*, magnetometer=(), microphone=(), camera=()"
        );
        assert_eq!(
            headers.get("cross-origin-opener-policy").unwrap(),
            "same-origin"
        );
        assert_eq!(
            headers.get("cross-origin-embedder-policy").unwrap(),
            "require-corp"
        );
    }

    #[test]
    fn test_apply_preserves_existing_headers() {
        let set = PolicyHeaderSet::standard();
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("text/plain"));
        set.apply(&mut headers);

        assert_eq!(headers.get("content-type").unwrap(), "text/plain");
        assert_eq!(headers.len(), 4);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let set = PolicyHeaderSet::standard();
        let mut headers = HeaderMap::new();
        set.apply(&mut headers);
        set.apply(&mut headers);
        assert_eq!(headers.len(), 3);
    }
}
