//! Conditional request handling
//!
//! Provides `Last-Modified` formatting and `If-Modified-Since` evaluation.

use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// Format a filesystem timestamp as an HTTP-date for `Last-Modified`
///
/// # Examples
/// ```
/// use isoserve::http::conditional::format_http_date;
/// use std::time::SystemTime;
/// let date = format_http_date(SystemTime::UNIX_EPOCH);
/// assert_eq!(date, "Thu, 01 Jan 1970 00:00:00 GMT");
/// ```
#[must_use]
pub fn format_http_date(mtime: SystemTime) -> String {
    let datetime: DateTime<Utc> = mtime.into();
    datetime.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Check whether a client's `If-Modified-Since` header makes the file fresh
///
/// Comparison is at second granularity, matching the header's resolution.
/// Unparseable header values are ignored (treated as modified).
///
/// # Returns
/// Returns true if the file has not been modified (should return 304)
#[must_use]
pub fn check_not_modified(if_modified_since: Option<&str>, mtime: SystemTime) -> bool {
    let Some(header) = if_modified_since else {
        return false;
    };
    let Ok(client_time) = DateTime::parse_from_rfc2822(header) else {
        return false;
    };

    let file_time: DateTime<Utc> = mtime.into();
    file_time.timestamp() <= client_time.timestamp()
}
