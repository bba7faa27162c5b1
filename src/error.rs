//! Error kinds surfaced by the dispatch core and the pluggable error-handling
//! strategy that converts them into fallback responses.
//!
//! Every failure that escapes the middleware chain is funneled to exactly one
//! place: the [`ErrorHandler`] installed on the dispatcher. The strategy is a
//! single process-wide value, swappable at runtime, and may decline to handle
//! an error by returning `None`, in which case the hard default mapping
//! applies (404 for an unmatched route, 500 for everything else).

use http::StatusCode;
use thiserror::Error;

use crate::server::{Request, Response};

/// Errors raised by route resolution, middleware, or terminal handlers.
///
/// Handlers and middleware carry opaque application errors (`anyhow::Error`);
/// the dispatch layer wraps them so the failure boundary can tell the three
/// kinds apart without inspecting application error types.
#[derive(Debug, Error)]
pub enum ServerError {
    /// No registered route matches the request method and path.
    #[error("no route matches {method} {path}")]
    RouteNotFound {
        /// Method of the unmatched request
        method: String,
        /// Path of the unmatched request
        path: String,
    },
    /// The resolved route's handler raised an error.
    #[error("handler failed: {0}")]
    Handler(#[source] anyhow::Error),
    /// A middleware raised an error before or after delegating to `next`.
    #[error("middleware failed: {0}")]
    Middleware(#[source] anyhow::Error),
}

impl ServerError {
    /// Wrap an application error as a handler failure.
    pub fn handler(err: impl Into<anyhow::Error>) -> Self {
        Self::Handler(err.into())
    }

    /// Wrap an application error as a middleware failure.
    pub fn middleware(err: impl Into<anyhow::Error>) -> Self {
        Self::Middleware(err.into())
    }
}

/// Strategy invoked when an error escapes dispatch.
///
/// One strategy is installed per dispatcher and shared by every in-flight
/// request; it is not per-request state. Returning `None` delegates the error
/// to the default mapping, so a custom strategy that only intercepts some
/// error kinds reproduces "super" behavior by explicit delegation:
///
/// ```
/// use picoroute::{default_response, ErrorHandler, Request, Response, ServerError};
///
/// struct TeapotOnNotFound;
///
/// impl ErrorHandler for TeapotOnNotFound {
///     fn on_error(&self, _request: Option<&Request>, error: &ServerError) -> Option<Response> {
///         match error {
///             ServerError::RouteNotFound { .. } => {
///                 Some(Response::text(http::StatusCode::IM_A_TEAPOT, "short and stout"))
///             }
///             other => Some(default_response(other)),
///         }
///     }
/// }
/// ```
pub trait ErrorHandler: Send + Sync {
    /// Map an escaped error to a fallback response.
    ///
    /// `request` is the request being dispatched when the error was raised;
    /// the dispatcher always passes `Some`, but the slot stays optional so a
    /// host transport can report pre-parse failures through the same strategy.
    fn on_error(&self, request: Option<&Request>, error: &ServerError) -> Option<Response>;
}

/// The hard default error mapping: 404 for [`ServerError::RouteNotFound`],
/// 500 for everything else, empty body either way.
#[must_use]
pub fn default_response(error: &ServerError) -> Response {
    match error {
        ServerError::RouteNotFound { .. } => Response::new(StatusCode::NOT_FOUND),
        _ => Response::new(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// Default strategy; answers every error with [`default_response`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultErrorHandler;

impl ErrorHandler for DefaultErrorHandler {
    fn on_error(&self, _request: Option<&Request>, error: &ServerError) -> Option<Response> {
        Some(default_response(error))
    }
}
