//! Request routing.
//!
//! Routes are declared as `/`-separated patterns where a segment written as
//! `[name]` matches any text and binds it under `name`. Routes are grouped
//! by segment count and tried in registration order, so the first route
//! registered that matches a request is the one that handles it:
//!
//! ```
//! use exprego::{HttpResponse, Method, Router, StatusCode};
//!
//! let mut router = Router::new();
//! router.register(Method::GET, "/pets", |_req: &exprego::HttpRequest| {
//!     HttpResponse::new(StatusCode::OK).with_body_string("all pets")
//! }).unwrap();
//! router.register(Method::GET, "/[slug]", |req: &exprego::HttpRequest| {
//!     HttpResponse::new(StatusCode::OK).with_body_string(req.get_param("slug").unwrap().clone())
//! }).unwrap();
//! ```

mod error;
mod handler;
mod route;
mod slug;
mod table;
mod tests;

use std::sync::Arc;
use log::{debug, info};

use crate::parser::{HttpRequest, Method};
use crate::server::{HttpResponse, StatusCode};

pub use error::Error;
pub use handler::{Handler, SharedHandler};
pub use route::{bind_slugs, segments, Route};
pub use slug::{Slug, SlugKind};
pub use table::RouteTable;

/// Handler used when no route matches: an empty `404 Not Found`.
fn default_not_found(_request: &HttpRequest) -> HttpResponse {
    HttpResponse::new(StatusCode::NOT_FOUND)
}

/// A route table plus the handler invoked when nothing in it matches.
pub struct Router {
    routes: RouteTable,
    not_found: SharedHandler,
}

impl Router {
    /// Create an empty router with the default not-found handler.
    pub fn new() -> Self {
        Self {
            routes: RouteTable::new(),
            not_found: Arc::new(default_not_found),
        }
    }

    /// Register `handler` for `method` requests whose path matches `pattern`.
    ///
    /// Registration failures are configuration errors and should stop the
    /// host from serving.
    pub fn register<H: Handler>(&mut self, method: Method, pattern: &str, handler: H) -> Result<(), Error> {
        self.routes.register(method, pattern, Arc::new(handler))?;
        info!("Registered {method} {pattern}");
        Ok(())
    }

    /// Replace the handler invoked when no route matches.
    pub fn set_not_found<H: Handler>(&mut self, handler: H) {
        self.not_found = Arc::new(handler);
    }

    /// The registered routes.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Route `request` to its handler and return the handler's response.
    ///
    /// Wildcard values are bound into `request.named_params` before the
    /// handler runs. A route whose slugs cannot be bound is treated as a
    /// miss.
    pub fn dispatch(&self, request: &mut HttpRequest) -> HttpResponse {
        let Some(route) = self.routes.find_route(request) else {
            info!("No route for {method} {path}", method = request.method, path = request.path);
            return self.not_found.handle(request);
        };

        if let Err(e) = bind_slugs(request, route) {
            debug!("Binding {pattern} failed: {e}", pattern = route.pattern);
            return self.not_found.handle(request);
        }

        route.handler.handle(request)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
