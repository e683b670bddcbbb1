//! HTTP protocol layer module
//!
//! MIME inference, the development header set and response builders,
//! decoupled from request dispatch.

pub mod headers;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use headers::{apply_dev_headers, DEV_HEADERS};
pub use response::{
    build_404_response, build_500_response, build_501_response, build_file_response,
    build_preflight_response, build_redirect_response,
};
