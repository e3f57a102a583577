//! Percent-encoding helpers for request paths and listing links.

use percent_encoding::{percent_decode_str, percent_encode, AsciiSet, CONTROLS};
use std::ffi::OsStr;
use std::path::PathBuf;

/// Characters escaped in listing hrefs on top of the control set.
/// Non-ASCII bytes are always escaped by `percent_encode`.
const HREF_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'%')
    .add(b'&');

/// Decode a request path into a root-relative filesystem path.
///
/// Invalid or truncated escapes pass through unchanged; leading slashes are
/// stripped so the result can be joined beneath the root. Decoded bytes are
/// used as-is on unix, so names that are valid on disk but not valid UTF-8
/// still resolve. Paths decoding to a NUL byte are rejected.
#[must_use]
pub fn decode_path(path: &str) -> Option<PathBuf> {
    let bytes: Vec<u8> = percent_decode_str(path).collect();
    if bytes.contains(&0) {
        return None;
    }
    let relative = strip_leading_slashes(&bytes);
    Some(os_path(relative))
}

/// Decode a request path for display in a listing title (lossy).
#[must_use]
pub fn decode_display(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

/// Encode a directory entry name for use as an href in a listing page.
#[must_use]
pub fn encode_href(name: &OsStr) -> String {
    percent_encode(os_bytes(name), HREF_SET).to_string()
}

fn strip_leading_slashes(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().take_while(|&&b| b == b'/').count();
    &bytes[start..]
}

#[cfg(unix)]
fn os_path(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn os_path(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(unix)]
fn os_bytes(name: &OsStr) -> &[u8] {
    use std::os::unix::ffi::OsStrExt;
    name.as_bytes()
}

#[cfg(not(unix))]
fn os_bytes(name: &OsStr) -> &[u8] {
    name.to_str().map_or(b"", str::as_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_path() {
        assert_eq!(decode_path("/index.html"), Some(PathBuf::from("index.html")));
        assert_eq!(decode_path("//double/slash"), Some(PathBuf::from("double/slash")));
    }

    #[test]
    fn test_decode_escapes() {
        assert_eq!(
            decode_path("/hello%20world.txt"),
            Some(PathBuf::from("hello world.txt"))
        );
        assert_eq!(
            decode_path("/%2e%2e/secret"),
            Some(PathBuf::from("../secret"))
        );
    }

    #[test]
    fn test_decode_leaves_invalid_escapes() {
        assert_eq!(decode_path("/100%"), Some(PathBuf::from("100%")));
        assert_eq!(decode_path("/a%zz"), Some(PathBuf::from("a%zz")));
        assert_eq!(decode_path("/a%2"), Some(PathBuf::from("a%2")));
    }

    #[test]
    fn test_decode_rejects_nul() {
        assert_eq!(decode_path("/a%00b"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_decode_keeps_raw_bytes() {
        use std::os::unix::ffi::OsStrExt;
        let decoded = decode_path("/caf%e9.txt").unwrap();
        assert_eq!(decoded.as_os_str().as_bytes(), b"caf\xe9.txt");
    }

    #[test]
    fn test_decode_display_is_lossy() {
        assert_eq!(decode_display("/hello%20world/"), "/hello world/");
        assert_eq!(decode_display("/caf%e9/"), "/caf\u{fffd}/");
    }

    #[test]
    fn test_encode_href() {
        assert_eq!(
            encode_href(OsStr::new("hello world.txt")),
            "hello%20world.txt"
        );
        assert_eq!(encode_href(OsStr::new("plain-name_1.txt")), "plain-name_1.txt");
        assert_eq!(encode_href(OsStr::new("a&b.txt")), "a%26b.txt");
    }

    #[cfg(unix)]
    #[test]
    fn test_encode_href_raw_bytes_round_trip() {
        use std::os::unix::ffi::OsStrExt;
        let name = OsStr::from_bytes(b"caf\xe9.txt");
        let href = encode_href(name);
        assert_eq!(href, "caf%E9.txt");
        let decoded = decode_path(&format!("/{href}")).unwrap();
        assert_eq!(decoded.as_os_str().as_bytes(), b"caf\xe9.txt");
    }
}
