//! HTTP request parsing.
//!
//! Turns the bytes of a single TCP read into an [`HttpRequest`]. The parser
//! knows nothing about routing.

mod request;
mod method;
mod error;

// Re-export public items
pub use request::HttpRequest;
pub use method::Method;
pub use error::Error;

// Re-export the parse_request function
pub use request::{parse_request, HTTP_VERSION};
