//! Server module
//!
//! Listener construction for the accept loop.

pub mod listener;

pub use listener::create_listener;
