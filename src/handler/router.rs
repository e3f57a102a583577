//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, context
//! extraction, static file dispatch, and policy header application.

use crate::handler::static_files::{self, RequestContext};
use crate::http;
use crate::logger;
use crate::state::AppState;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Main entry point for HTTP request handling
///
/// Wraps the static-file logic: once the wrapped handler has produced a
/// response with its own headers, the fixed policy header set is applied, so
/// every outcome (200, 301, 304, 404, 405) carries it.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let version = req.version();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let is_head = method == Method::HEAD;

    let mut response = if matches!(method, Method::GET | Method::HEAD) {
        let ctx = RequestContext {
            path: &path,
            query: query.as_deref(),
            is_head,
            if_modified_since: req
                .headers()
                .get("if-modified-since")
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string),
        };
        static_files::serve(&ctx, &state).await
    } else {
        logger::log_warning(&format!("Method not allowed: {method}"));
        http::build_405_response()
    };

    state.policy.apply(response.headers_mut());

    if state.config.logging.access_log {
        logger::log_access(
            &remote_addr,
            &method,
            &path,
            version,
            response.status().as_u16(),
            bytes_sent(&response, is_head),
        );
    }

    Ok(response)
}

/// Body size for the access log: zero for HEAD (no body is written),
/// otherwise the Content-Length header
fn bytes_sent(response: &Response<Full<Bytes>>, is_head: bool) -> usize {
    if is_head {
        return 0;
    }
    response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_sent_reads_content_length() {
        let response = Response::builder()
            .header("Content-Length", 42)
            .body(Full::new(Bytes::new()))
            .unwrap();
        assert_eq!(bytes_sent(&response, false), 42);
    }

    #[test]
    fn test_bytes_sent_is_zero_for_head() {
        let response = Response::builder()
            .header("Content-Length", 42)
            .body(Full::new(Bytes::new()))
            .unwrap();
        assert_eq!(bytes_sent(&response, true), 0);
    }

    #[test]
    fn test_bytes_sent_without_content_length() {
        let response = Response::new(Full::new(Bytes::new()));
        assert_eq!(bytes_sent(&response, false), 0);
    }
}
