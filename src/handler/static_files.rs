//! Static file serving module
//!
//! Resolves request paths beneath the configured root and builds file,
//! listing, redirect, and not-found responses.

use crate::http::{self, conditional, percent};
use crate::logger;
use crate::state::AppState;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Raw (still percent-encoded) request path
    pub path: &'a str,
    /// Raw query string, without the leading `?`
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
}

/// Outcome of resolving a request path beneath the root directory
#[derive(Debug, PartialEq, Eq)]
pub enum Resolved {
    File(PathBuf),
    Directory(PathBuf),
    /// Directory requested without a trailing slash
    Redirect(String),
    NotFound,
}

/// Serve a request path from the configured root
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    match resolve(&state.root, ctx.path, ctx.query) {
        Resolved::File(path) => serve_file(ctx, state, &path).await,
        Resolved::Directory(path) => serve_directory(ctx, state, &path).await,
        Resolved::Redirect(location) => http::build_301_response(&location),
        Resolved::NotFound => http::build_404_response(),
    }
}

/// Resolve a raw request path to a filesystem location beneath `root`.
///
/// Decodes percent escapes to raw bytes, rejects `..` components and NUL
/// outright, then canonicalizes and verifies the result is still contained
/// in the canonicalized root. Anything that fails resolution is a
/// `NotFound`. A directory hit without a trailing slash redirects to the
/// slashed path, carrying the query string along.
pub fn resolve(root: &Path, raw_path: &str, query: Option<&str>) -> Resolved {
    let Some(relative) = percent::decode_path(raw_path) else {
        return Resolved::NotFound;
    };

    if relative
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        logger::log_warning(&format!("Rejected parent-dir component in path: {raw_path}"));
        return Resolved::NotFound;
    }

    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Root directory not found or inaccessible '{}': {e}",
                root.display()
            ));
            return Resolved::NotFound;
        }
    };

    // A miss here is the ordinary 404 case, no logging needed
    let Ok(canonical) = root_canonical.join(&relative).canonicalize() else {
        return Resolved::NotFound;
    };
    if !canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {raw_path} -> {}",
            canonical.display()
        ));
        return Resolved::NotFound;
    }

    if canonical.is_dir() {
        if raw_path.ends_with('/') {
            Resolved::Directory(canonical)
        } else {
            let location = match query {
                Some(q) => format!("{raw_path}/?{q}"),
                None => format!("{raw_path}/"),
            };
            Resolved::Redirect(location)
        }
    } else {
        Resolved::File(canonical)
    }
}

/// Serve a resolved file, honoring `If-Modified-Since`
async fn serve_file(
    ctx: &RequestContext<'_>,
    state: &AppState,
    path: &Path,
) -> Response<Full<Bytes>> {
    let Ok(metadata) = fs::metadata(path).await else {
        return http::build_404_response();
    };
    let mtime = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
    let last_modified = conditional::format_http_date(mtime);

    if conditional::check_not_modified(ctx.if_modified_since.as_deref(), mtime) {
        return http::build_304_response(&last_modified);
    }

    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            return http::build_404_response();
        }
    };

    let content_type = state.mime.content_type_for_path(path);
    http::build_file_response(content, content_type, &last_modified, ctx.is_head)
}

/// Serve a resolved directory: first matching index file, else a listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir: &Path,
) -> Response<Full<Bytes>> {
    for index_file in &state.config.serve.index_files {
        let index_path = dir.join(index_file);
        if index_path.is_file() {
            return serve_file(ctx, state, &index_path).await;
        }
    }

    match build_listing(dir, &percent::decode_display(ctx.path)).await {
        Some(html) => http::build_html_response(html, ctx.is_head),
        None => http::build_404_response(),
    }
}

/// Build an HTML directory listing page
///
/// Entries are sorted by name, directories shown with a trailing slash, and
/// hrefs percent-encoded from the raw on-disk name.
async fn build_listing(dir: &Path, display_path: &str) -> Option<String> {
    let mut entries: Vec<(OsString, bool)> = Vec::new();
    let mut read_dir = match fs::read_dir(dir).await {
        Ok(rd) => rd,
        Err(e) => {
            logger::log_error(&format!("Failed to list directory '{}': {e}", dir.display()));
            return None;
        }
    };
    while let Ok(Some(entry)) = read_dir.next_entry().await {
        let is_dir = entry.file_type().await.is_ok_and(|t| t.is_dir());
        entries.push((entry.file_name(), is_dir));
    }
    entries.sort();

    let title = format!("Directory listing for {}", html_escape(display_path));
    let mut html = String::with_capacity(512 + entries.len() * 64);
    html.push_str("<!DOCTYPE HTML>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));
    for (name, is_dir) in &entries {
        let slash = if *is_dir { "/" } else { "" };
        html.push_str(&format!(
            "<li><a href=\"{}{slash}\">{}{slash}</a></li>\n",
            percent::encode_href(name),
            html_escape(&name.to_string_lossy())
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Some(html)
}

/// Escape text for embedding in the listing page
fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
