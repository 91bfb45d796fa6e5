//! Error types for the HTTP server.

use thiserror::Error;

use crate::parser::Error as ParserError;
use crate::router::Error as RouterError;

/// Errors that can occur during HTTP server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// Error building the route table.
    #[error("Route error: {0}")]
    RouteError(#[from] RouterError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The response body could not be compressed.
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// The client asked for an encoding we cannot produce.
    #[error("Unsupported content encoding: {0}")]
    UnsupportedEncoding(String),

    /// The response status has no reason phrase.
    #[error("Unknown status code: {0}")]
    UnknownStatus(u16),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
