//! `Accept-Encoding` negotiation and body compression.

use std::io::Write;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;

use crate::parser::HttpRequest;
use crate::server::config::UnsupportedEncodingPolicy;
use crate::server::error::Error;
use crate::server::response::HttpResponse;

/// Content codings the server can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Gzip,
}

impl Encoding {
    /// The token used in `Accept-Encoding` and `Content-Encoding`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Gzip => "gzip",
        }
    }

    /// Look up a supported coding by its token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "gzip" => Some(Encoding::Gzip),
            _ => None,
        }
    }

    /// Encode `body` as one complete stream.
    pub fn encode(&self, body: &[u8]) -> Result<Vec<u8>, Error> {
        match self {
            Encoding::Gzip => gzip(body),
        }
    }
}

fn gzip(body: &[u8]) -> Result<Vec<u8>, Error> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(body)
        .map_err(|e| Error::EncodingError(format!("gzip: failed to write during compression: {e}")))?;
    encoder
        .flush()
        .map_err(|e| Error::EncodingError(format!("gzip: failed to flush: {e}")))?;
    encoder
        .finish()
        .map_err(|e| Error::EncodingError(format!("gzip: failed to close writer: {e}")))
}

/// Split an `Accept-Encoding` value into trimmed, non-empty tokens.
fn tokens(header: &str) -> impl Iterator<Item = &str> {
    header
        .split(',')
        .map(|token| token.trim().trim_end_matches(','))
        .filter(|token| !token.is_empty())
}

/// Pick the coding to use for an `Accept-Encoding` value.
///
/// `gzip` wins wherever it appears; otherwise the first token is returned,
/// whether or not we can apply it.
pub fn select_encoding(header: &str) -> Option<&str> {
    let mut first = None;
    for token in tokens(header) {
        if Encoding::from_token(token) == Some(Encoding::Gzip) {
            return Some(token);
        }
        first.get_or_insert(token);
    }
    first
}

/// Compresses response bodies according to the request's `Accept-Encoding`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentNegotiator {
    policy: UnsupportedEncodingPolicy,
}

impl ContentNegotiator {
    pub fn new(policy: UnsupportedEncodingPolicy) -> Self {
        Self { policy }
    }

    /// Encode the response body if the client accepts a coding we support,
    /// then set `Content-Length` from the final body.
    pub fn negotiate(&self, request: &HttpRequest, response: &mut HttpResponse) -> Result<(), Error> {
        if let Some(encoding) = self.choose(request)? {
            response.body = encoding.encode(&response.body)?;
            response.set_header("Content-Encoding", encoding.as_str());
        }

        response.set_content_length();
        Ok(())
    }

    fn choose(&self, request: &HttpRequest) -> Result<Option<Encoding>, Error> {
        let Some(token) = request.get_header("Accept-Encoding").and_then(|h| select_encoding(h)) else {
            return Ok(None);
        };

        match Encoding::from_token(token) {
            Some(encoding) => Ok(Some(encoding)),
            None if self.policy == UnsupportedEncodingPolicy::Reject && token != "identity" => {
                Err(Error::UnsupportedEncoding(token.to_string()))
            }
            None => {
                debug!("Leaving body unencoded, {token} is not supported");
                Ok(None)
            }
        }
    }
}
