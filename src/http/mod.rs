//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from path
//! resolution and the server loop.

pub mod conditional;
pub mod mime;
pub mod percent;
pub mod policy;
pub mod response;

// Re-export commonly used types
pub use mime::MimeTable;
pub use policy::PolicyHeaderSet;
pub use response::{
    build_301_response, build_304_response, build_404_response, build_405_response,
    build_file_response, build_html_response,
};
