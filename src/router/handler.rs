//! Request handlers.

use std::sync::Arc;

use crate::parser::HttpRequest;
use crate::server::HttpResponse;

/// Business logic behind a route.
///
/// Any `Fn(&HttpRequest) -> HttpResponse` closure is a handler.
pub trait Handler: Send + Sync + 'static {
    /// Produce the response for a request that matched this handler's route.
    fn handle(&self, request: &HttpRequest) -> HttpResponse;
}

impl<F> Handler for F
where
    F: Fn(&HttpRequest) -> HttpResponse + Send + Sync + 'static,
{
    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        self(request)
    }
}

/// Type alias for a handler shared between the route table and connection tasks.
pub type SharedHandler = Arc<dyn Handler>;
