//! A from-scratch HTTP/1.1 request processor.
//!
//! exprego reads one request per TCP connection, parses it by hand, routes
//! it through a table of slug patterns, optionally gzips the response and
//! writes it back before closing the connection.
//!
//! # Features
//!
//! - Parse HTTP/1.1 requests from the bytes of a single read
//! - Route patterns with literal and `[wildcard]` segments, first match wins
//! - Wildcard values bound into the request by name
//! - gzip compression negotiated from `Accept-Encoding`
//! - A read-only context map shared by every request
//!
//! # Examples
//!
//! ## Parsing
//!
//! ```
//! use exprego::parse_request;
//!
//! let request_bytes = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
//!
//! match parse_request(request_bytes) {
//!     Ok(request) => {
//!         println!("Method: {}", request.method);
//!         println!("Path: {}", request.path);
//!         println!("Headers: {:?}", request.headers);
//!     },
//!     Err(err) => {
//!         println!("Error parsing request: {}", err);
//!     }
//! }
//! ```
//!
//! ## Serving
//!
//! ```no_run
//! use exprego::{HttpRequest, HttpResponse, HttpServer, Method, ServerConfig, StatusCode};
//!
//! # async fn run() -> Result<(), exprego::ServerError> {
//! let mut server = HttpServer::new(ServerConfig::default().with_port(8080));
//! server.add_context("greeting", "Hello");
//! server.add_route(Method::GET, "/hello/[name]", |req: &HttpRequest| {
//!     let greeting = req.get_context("greeting").cloned().unwrap_or_default();
//!     let name = req.get_param("name").cloned().unwrap_or_default();
//!     HttpResponse::new(StatusCode::OK).with_body_string(format!("{greeting}, {name}!"))
//! })?;
//! server.start().await
//! # }
//! ```
//!
//! See the `demos` directory for a complete server.

// Export the parser module
pub mod parser;

// Export the router module
pub mod router;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, HttpRequest, Method, parse_request};
pub use router::{Error as RouterError, Handler, Route, RouteTable, Router, Slug, SlugKind};
pub use server::{
    Error as ServerError, HeaderFraming, HttpResponse, HttpServer, MimeType, ServerConfig, StatusCode,
    UnsupportedEncodingPolicy,
};
