//! HTTP request parsing and representation.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use serde::de::DeserializeOwned;

use crate::parser::error::Error;
use crate::parser::method::Method;

/// The only protocol version accepted on the request line.
pub const HTTP_VERSION: &str = "HTTP/1.1";

const LINE_TERMINATOR: &[u8] = b"\r\n";

/// Represents an HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request path, exactly as sent on the request line
    pub path: String,
    /// The HTTP headers, keyed by the name as it appeared on the wire
    pub headers: HashMap<String, String>,
    /// Values bound to the wildcard segments of the matched route
    pub named_params: HashMap<String, String>,
    /// Query parameters parsed from the path
    pub query_params: HashMap<String, String>,
    /// The request body
    pub body: Vec<u8>,
    /// Server-wide context, shared read-only between all requests
    pub context: Arc<HashMap<String, String>>,
}

impl HttpRequest {
    /// Create a new HTTP request.
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP method
    /// * `path` - The request path
    /// * `headers` - The HTTP headers
    ///
    /// # Returns
    ///
    /// A new HTTP request with an empty body, no bound parameters and an empty context
    pub fn new(method: Method, path: String, headers: HashMap<String, String>) -> Self {
        // Parse query parameters from the path
        let query_params: HashMap<String, String> = path
            .split_once('?')
            .map(|(_, query)| query
                .split('&')
                .filter(|s| !s.is_empty())
                .map(|pair| {
                    if let Some((k, v)) = pair.split_once('=') {
                        (k.to_string(), v.to_string())
                    } else {
                        (pair.to_string(), String::new())
                    }
                })
                .collect())
            .unwrap_or_default();

        Self {
            method,
            path,
            headers,
            named_params: HashMap::new(),
            query_params,
            body: Vec::new(),
            context: Arc::default(),
        }
    }

    /// Create a new HTTP request with a body.
    pub fn with_body(method: Method, path: String, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        let mut request = Self::new(method, path, headers);
        request.body = body;
        request
    }

    /// Attach the server-wide context to this request.
    pub fn inject_context(&mut self, context: Arc<HashMap<String, String>>) {
        self.context = context;
    }

    /// Get a header value.
    ///
    /// Names are compared exactly as they were parsed; `accept-encoding`
    /// does not find an `Accept-Encoding` header.
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.get(name)
    }

    /// Check if a header exists.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Get the value bound to a wildcard segment of the matched route.
    ///
    /// # Arguments
    ///
    /// * `name` - The wildcard name, without brackets
    ///
    /// # Returns
    ///
    /// The bound path segment, if the route declared that wildcard
    pub fn get_param(&self, name: &str) -> Option<&String> {
        self.named_params.get(name)
    }

    /// Get a value from the server-wide context.
    pub fn get_context(&self, name: &str) -> Option<&String> {
        self.context.get(name)
    }

    /// Get a query parameter value.
    pub fn get_query_param(&self, name: &str) -> Option<&String> {
        self.query_params.get(name)
    }

    /// Parse the request body as JSON.
    ///
    /// # Returns
    ///
    /// The parsed JSON value, or an error if the body is not valid JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        if !self.is_json() {
            return Err(Error::MissingHeader("Content-Type: application/json".to_string()));
        }

        let json = serde_json::from_slice(&self.body)?;
        Ok(json)
    }

    /// Check if the request has a JSON body.
    pub fn is_json(&self) -> bool {
        self.get_header("Content-Type")
            .is_some_and(|content_type| content_type.starts_with("application/json"))
    }
}

/// Split `input` on every `\r\n`, keeping empty fragments.
fn split_lines(input: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i + LINE_TERMINATOR.len() <= input.len() {
        if &input[i..i + LINE_TERMINATOR.len()] == LINE_TERMINATOR {
            lines.push(&input[start..i]);
            i += LINE_TERMINATOR.len();
            start = i;
        } else {
            i += 1;
        }
    }
    lines.push(&input[start..]);
    lines
}

fn line_as_str(line: &[u8]) -> Result<&str, Error> {
    std::str::from_utf8(line).map_err(|_| Error::MalformedRequest("Invalid UTF-8".to_string()))
}

/// Parse one header line into its name and value.
///
/// The value is everything after the first `:`, minus exactly one leading
/// character. No other trimming takes place.
fn parse_header_line(line: &str) -> Result<(String, String), Error> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| Error::MalformedRequest(format!("header without separator: {line}")))?;

    let mut value_chars = value.chars();
    value_chars.next();
    Ok((name.to_string(), value_chars.as_str().to_string()))
}

/// Parse an HTTP request from the bytes of a single read.
///
/// # Arguments
///
/// * `input` - Exactly the bytes that were read from the connection
///
/// # Returns
///
/// The parsed HTTP request, or an error if the request is invalid
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    if input.is_empty() {
        return Err(Error::EmptyRequest);
    }

    let lines = split_lines(input);

    // Request line: exactly three tokens separated by single spaces
    let request_line = line_as_str(lines[0])?;
    let parts: Vec<&str> = request_line.split(' ').collect();
    if parts.len() != 3 {
        return Err(Error::MalformedRequest(request_line.to_string()));
    }

    if parts[2] != HTTP_VERSION {
        return Err(Error::UnsupportedVersion(parts[2].to_string()));
    }

    let method = Method::from_str(parts[0])?;
    let path = parts[1].to_string();

    // Headers run until the first empty line
    let mut headers = HashMap::new();
    let mut divider = None;
    for (index, line) in lines.iter().enumerate().skip(1) {
        if line.is_empty() {
            divider = Some(index);
            break;
        }

        let (name, value) = parse_header_line(line_as_str(line)?)?;
        headers.insert(name, value);
    }

    // The body is every fragment after the divider, joined back without separators
    let body = match divider {
        Some(index) => lines[index + 1..].concat(),
        None => Vec::new(),
    };

    Ok(HttpRequest::with_body(method, path, headers, body))
}
