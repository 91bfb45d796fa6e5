//! Registered routes and wildcard binding.

use std::fmt;

use crate::parser::{HttpRequest, Method};
use crate::router::error::Error;
use crate::router::handler::SharedHandler;
use crate::router::slug::{Slug, SlugKind};

/// Split a path or pattern on `/`, keeping empty segments.
///
/// `/users/42` has three segments: `""`, `users` and `42`.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').collect()
}

/// A handler registered for one verb and path pattern.
#[derive(Clone)]
pub struct Route {
    /// The verb this route answers
    pub method: Method,
    /// The pattern as registered
    pub pattern: String,
    /// One slug per pattern segment
    pub slugs: Vec<Slug>,
    /// The business logic
    pub handler: SharedHandler,
}

impl Route {
    /// Build a route, rejecting patterns that contain `[]`.
    pub fn new(method: Method, pattern: &str, handler: SharedHandler) -> Result<Self, Error> {
        let parts = segments(pattern);
        if parts.contains(&"[]") {
            return Err(Error::EmptyWildcard(pattern.to_string()));
        }

        Ok(Self {
            method,
            pattern: pattern.to_string(),
            slugs: parts.into_iter().map(Slug::parse).collect(),
            handler,
        })
    }

    /// Whether this route handles `method` requests for the given path segments.
    pub fn matches(&self, method: Method, path_segments: &[&str]) -> bool {
        self.method == method
            && self.slugs.len() == path_segments.len()
            && self.slugs.iter().zip(path_segments).all(|(slug, segment)| slug.matches(segment))
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("slugs", &self.slugs)
            .finish_non_exhaustive()
    }
}

/// Copy the request's path segments into `named_params` for every named
/// wildcard of `route`.
///
/// Literal slugs and wildcards with an empty name are skipped.
pub fn bind_slugs(request: &mut HttpRequest, route: &Route) -> Result<(), Error> {
    let path_segments = segments(&request.path);
    if route.slugs.len() != path_segments.len() {
        return Err(Error::SlugMismatch {
            expected: route.slugs.len(),
            actual: path_segments.len(),
        });
    }

    let bindings: Vec<(String, String)> = route
        .slugs
        .iter()
        .zip(&path_segments)
        .filter(|(slug, _)| slug.kind == SlugKind::Wildcard && !slug.name.is_empty())
        .map(|(slug, segment)| (slug.name.clone(), segment.to_string()))
        .collect();

    request.named_params.extend(bindings);
    Ok(())
}
