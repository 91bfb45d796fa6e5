//! HTTP response types and wire serialization.

use std::collections::HashMap;
use std::fmt;
use serde::Serialize;

use crate::server::config::HeaderFraming;
use crate::server::error::Error;

/// An HTTP status code.
///
/// Any number can be stored; only codes with a registered reason phrase
/// can be serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const CREATED: StatusCode = StatusCode(201);
    pub const ACCEPTED: StatusCode = StatusCode(202);
    pub const NO_CONTENT: StatusCode = StatusCode(204);
    pub const MOVED_PERMANENTLY: StatusCode = StatusCode(301);
    pub const FOUND: StatusCode = StatusCode(302);
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    pub const UNAUTHORIZED: StatusCode = StatusCode(401);
    pub const FORBIDDEN: StatusCode = StatusCode(403);
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const METHOD_NOT_ALLOWED: StatusCode = StatusCode(405);
    pub const NOT_ACCEPTABLE: StatusCode = StatusCode(406);
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);
    pub const NOT_IMPLEMENTED: StatusCode = StatusCode(501);
    pub const SERVICE_UNAVAILABLE: StatusCode = StatusCode(503);

    /// The numeric code.
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Get the reason phrase for this status code, if it is a known one.
    pub fn reason_phrase(&self) -> Option<&'static str> {
        let phrase = match self.0 {
            100 => "Continue",
            101 => "Switching Protocols",
            102 => "Processing",
            103 => "Early Hints",
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            203 => "Non-Authoritative Information",
            204 => "No Content",
            205 => "Reset Content",
            206 => "Partial Content",
            207 => "Multi-Status",
            208 => "Already Reported",
            226 => "IM Used",
            300 => "Multiple Choices",
            301 => "Moved Permanently",
            302 => "Found",
            303 => "See Other",
            304 => "Not Modified",
            307 => "Temporary Redirect",
            308 => "Permanent Redirect",
            400 => "Bad Request",
            401 => "Unauthorized",
            402 => "Payment Required",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            406 => "Not Acceptable",
            407 => "Proxy Authentication Required",
            408 => "Request Timeout",
            409 => "Conflict",
            410 => "Gone",
            411 => "Length Required",
            412 => "Precondition Failed",
            413 => "Content Too Large",
            414 => "URI Too Long",
            415 => "Unsupported Media Type",
            416 => "Range Not Satisfiable",
            417 => "Expectation Failed",
            418 => "I'm a teapot",
            421 => "Misdirected Request",
            422 => "Unprocessable Content",
            423 => "Locked",
            424 => "Failed Dependency",
            425 => "Too Early",
            426 => "Upgrade Required",
            428 => "Precondition Required",
            429 => "Too Many Requests",
            431 => "Request Header Fields Too Large",
            451 => "Unavailable For Legal Reasons",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            505 => "HTTP Version Not Supported",
            506 => "Variant Also Negotiates",
            507 => "Insufficient Storage",
            508 => "Loop Detected",
            510 => "Not Extended",
            511 => "Network Authentication Required",
            _ => return None,
        };
        Some(phrase)
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content types a handler can declare for its response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MimeType {
    #[default]
    TextPlain,
    Json,
    OctetStream,
}

impl MimeType {
    /// The canonical `Content-Type` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            MimeType::TextPlain => "text/plain",
            MimeType::Json => "application/json",
            MimeType::OctetStream => "application/octet-stream",
        }
    }

    /// Map a content type string back to a known type, falling back to
    /// [`MimeType::TextPlain`].
    pub fn parse(value: &str) -> Self {
        match value {
            "application/json" => MimeType::Json,
            "application/octet-stream" => MimeType::OctetStream,
            _ => MimeType::TextPlain,
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents an HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The HTTP status code
    pub status: StatusCode,
    /// The HTTP headers
    pub headers: HashMap<String, String>,
    /// The response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new HTTP response with the given status code and a
    /// `text/plain` content type.
    pub fn new(status: StatusCode) -> Self {
        let mut response = Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        };
        response.set_content_type(MimeType::TextPlain);
        response
    }

    /// Set the response body with a string.
    pub fn with_body_string(self, body: impl Into<String>) -> Self {
        self.with_body_bytes(body.into().into_bytes())
    }

    /// Set the response body with bytes.
    pub fn with_body_bytes(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Add or replace a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Set the content type.
    pub fn with_content_type(mut self, mime: MimeType) -> Self {
        self.set_content_type(mime);
        self
    }

    /// Set the response body with a JSON value.
    ///
    /// This method serializes the provided value to JSON and sets it as the response body.
    pub fn with_json<T: Serialize>(self, value: &T) -> Result<Self, Error> {
        let json = serde_json::to_vec(value)?;
        Ok(self
            .with_content_type(MimeType::Json)
            .with_body_bytes(json))
    }

    /// Add or replace a header.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Change the status code.
    pub fn set_status(&mut self, status: impl Into<StatusCode>) {
        self.status = status.into();
    }

    /// Set the `Content-Type` header.
    pub fn set_content_type(&mut self, mime: MimeType) {
        self.set_header("Content-Type", mime.as_str());
    }

    /// The declared content type, or [`MimeType::TextPlain`] when the header
    /// is missing or unrecognised.
    pub fn content_type(&self) -> MimeType {
        self.headers
            .get("Content-Type")
            .map(|value| MimeType::parse(value))
            .unwrap_or_default()
    }

    /// Set `Content-Length` from the current body.
    pub fn set_content_length(&mut self) {
        let length = self.body.len().to_string();
        self.set_header("Content-Length", length);
    }

    /// Serialize with [`HeaderFraming::Compatible`] framing.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        self.serialize(HeaderFraming::Compatible)
    }

    /// Convert the response to wire bytes.
    ///
    /// Fails with [`Error::UnknownStatus`] if the status has no reason
    /// phrase. The body, when present, is followed by `\r\n`, and the
    /// message always ends with one more `\r\n`.
    pub fn serialize(&self, framing: HeaderFraming) -> Result<Vec<u8>, Error> {
        let reason = self
            .status
            .reason_phrase()
            .ok_or(Error::UnknownStatus(self.status.as_u16()))?;

        let mut bytes = Vec::with_capacity(self.body.len() + 128);

        // Add the status line
        let status_line = format!("HTTP/1.1 {} {reason}\r\n", self.status);
        bytes.extend_from_slice(status_line.as_bytes());

        // Add the headers
        for (name, value) in &self.headers {
            let header_line = format!("{name}: {value}\r\n");
            bytes.extend_from_slice(header_line.as_bytes());
        }

        // Compatible framing only separates headers from the body when there are headers
        if !self.headers.is_empty() || framing == HeaderFraming::Strict {
            bytes.extend_from_slice(b"\r\n");
        }

        if !self.body.is_empty() {
            bytes.extend_from_slice(&self.body);
            bytes.extend_from_slice(b"\r\n");
        }

        bytes.extend_from_slice(b"\r\n");
        Ok(bytes)
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new(StatusCode::OK)
    }
}
