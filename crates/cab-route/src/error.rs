//! Routing error type.

use thiserror::Error;

/// Why a routing request produced no usable route.
///
/// Both variants are recoverable: callers log them and keep their current
/// state.  The reason string is the provider's own wording.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Transport or provider failure; the request never got an answer.
    #[error("routing provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered, but with a non-success status.
    #[error("no route found: {0}")]
    NoRouteFound(String),
}

pub type RouteResult<T> = Result<T, RouteError>;
