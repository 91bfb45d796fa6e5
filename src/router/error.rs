//! Error types for route registration and binding.

use thiserror::Error;

use crate::parser::Method;

/// Errors raised while building the route table or binding a matched route.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A pattern contains the nameless wildcard `[]`.
    #[error("{0} is not a valid path: empty wildcard segment")]
    EmptyWildcard(String),

    /// The same verb and pattern were registered twice.
    #[error("{method} {pattern} is already registered")]
    DuplicateRoute {
        method: Method,
        pattern: String,
    },

    /// The request path and the route pattern have different segment counts.
    #[error("path has {actual} segments but the route declares {expected}")]
    SlugMismatch {
        expected: usize,
        actual: usize,
    },
}
