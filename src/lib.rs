//! isoserve - static file server with cross-origin isolation headers
//!
//! Serves a local directory over HTTP/1.x, appending a fixed Permissions-Policy
//! and the COOP/COEP cross-origin isolation headers to every response, with a
//! custom MIME mapping for `.webmanifest` files.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod state;
