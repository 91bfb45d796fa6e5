//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};

/// Largest request accepted, in bytes. Requests are read in a single read
/// into a buffer of this size.
pub const MAX_REQUEST_SIZE: usize = 512_000;

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 80;

/// How a response with no headers at all is framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderFraming {
    /// Emit the blank line after the headers only when there are headers.
    /// A header-less response then runs its body straight after the status
    /// line, which some clients cannot parse.
    #[default]
    Compatible,
    /// Always emit the blank line after the header block.
    Strict,
}

/// What to do when `Accept-Encoding` selects an encoding we cannot apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedEncodingPolicy {
    /// Send the body unencoded and without `Content-Encoding`.
    #[default]
    Skip,
    /// Fail negotiation with `Error::UnsupportedEncoding`.
    Reject,
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The receive buffer size, which caps the request size.
    pub max_request_size: usize,
    /// Framing of header-less responses.
    pub header_framing: HeaderFraming,
    /// Handling of encodings other than gzip.
    pub unsupported_encoding: UnsupportedEncodingPolicy,
}

impl ServerConfig {
    /// Listen on all interfaces on `port`.
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr.set_port(port);
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            max_request_size: MAX_REQUEST_SIZE,
            header_framing: HeaderFraming::default(),
            unsupported_encoding: UnsupportedEncodingPolicy::default(),
        }
    }
}
