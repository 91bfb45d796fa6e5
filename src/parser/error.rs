//! Error types for the HTTP parser.

use thiserror::Error;

/// Errors that can occur during HTTP request parsing.
#[derive(Debug, Error)]
pub enum Error {
    /// The request line does not split into method, path and version, or a
    /// header line has no `:` separator.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// The version token is anything other than `HTTP/1.1`.
    #[error("Unsupported HTTP version: {0}")]
    UnsupportedVersion(String),

    /// The method token is not a verb we route on.
    #[error("Unsupported HTTP verb: {0}")]
    UnsupportedVerb(String),

    /// The request is empty.
    #[error("Empty request")]
    EmptyRequest,

    /// A required header is missing from the request.
    #[error("Required header is missing: {0}")]
    MissingHeader(String),

    /// Error parsing JSON.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}
