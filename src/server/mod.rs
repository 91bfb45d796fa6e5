//! HTTP server implementation for exprego.
//!
//! This module ties the parser and the router together: it owns the TCP
//! accept loop, negotiates content encoding and writes serialized
//! responses back to the client.

mod response;
mod config;
mod encoding;
mod error;
mod http_server;

// Re-export public items
pub use response::{HttpResponse, MimeType, StatusCode};
pub use config::{HeaderFraming, ServerConfig, UnsupportedEncodingPolicy, DEFAULT_PORT, MAX_REQUEST_SIZE};
pub use encoding::{select_encoding, ContentNegotiator, Encoding};
pub use error::Error;
pub use http_server::HttpServer;
