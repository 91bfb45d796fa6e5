//! Routes bucketed by segment count.

use std::collections::HashMap;

use crate::parser::{HttpRequest, Method};
use crate::router::error::Error;
use crate::router::handler::SharedHandler;
use crate::router::route::{segments, Route};

/// Registered routes, grouped by the number of segments in their pattern.
///
/// Each bucket keeps registration order, which is also match priority.
#[derive(Debug, Default)]
pub struct RouteTable {
    buckets: HashMap<usize, Vec<Route>>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route for `method` and `pattern`.
    ///
    /// Fails if the pattern contains `[]` or the same verb and pattern are
    /// already registered.
    pub fn register(&mut self, method: Method, pattern: &str, handler: SharedHandler) -> Result<(), Error> {
        let route = Route::new(method, pattern, handler)?;
        let bucket = self.buckets.entry(route.slugs.len()).or_default();

        if bucket.iter().any(|existing| existing.method == method && existing.pattern == pattern) {
            return Err(Error::DuplicateRoute {
                method,
                pattern: pattern.to_string(),
            });
        }

        bucket.push(route);
        Ok(())
    }

    /// Find the first route, in registration order, that matches the
    /// request's verb and every segment of its path.
    pub fn find_route(&self, request: &HttpRequest) -> Option<&Route> {
        self.find(request.method, &request.path)
    }

    /// Find the first route matching `method` and `path`.
    pub fn find(&self, method: Method, path: &str) -> Option<&Route> {
        let path_segments = segments(path);
        self.buckets
            .get(&path_segments.len())?
            .iter()
            .find(|route| route.matches(method, &path_segments))
    }

    /// All routes, grouped by segment count in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        let mut counts: Vec<&usize> = self.buckets.keys().collect();
        counts.sort();
        counts.into_iter().flat_map(move |count| self.buckets[count].iter())
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Whether no route has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
