//! Middleware trait and onion composition.
//!
//! A middleware wraps the remainder of the chain: code before `next.run(req)`
//! executes while control descends toward the terminal handler, code after it
//! executes while the call stack unwinds. The first middleware in the list is
//! the outermost wrapper; the terminal handler sits innermost, wrapped
//! directly by the last middleware in the list. List position alone determines
//! nesting depth, and nesting depth alone determines both the pre-`next` order
//! (shallow to deep) and the post-`next` order (deep to shallow).

use std::sync::Arc;

use crate::error::ServerError;
use crate::router::Handler;
use crate::server::{Request, Response};

/// A request/response interceptor composed into the dispatch chain.
///
/// A middleware may:
/// - inspect or mutate the request, then call `next.run(req)`,
/// - call `next.run(req)`, then inspect or mutate the returned response,
/// - skip `next` entirely and produce its own response (short-circuit),
/// - propagate a failure from `next` with `?` without intercepting it.
///
/// An `Err` returned from `next` unwinds past every enclosing middleware's
/// post-`next` code unless that middleware explicitly matches on the
/// `Result`; the composition itself never catches. Only the dispatcher's
/// top-level boundary converts errors into responses.
pub trait Middleware: Send + Sync {
    /// Process `req`, delegating to the rest of the chain through `next`.
    fn handle(&self, req: &mut Request, next: Next<'_>) -> Result<Response, ServerError>;
}

/// The remainder of the middleware chain, ending in the terminal handler.
///
/// Consuming `run` enforces that a middleware invokes the tail at most once;
/// a middleware that never calls it short-circuits the chain.
pub struct Next<'a> {
    middlewares: &'a [Arc<dyn Middleware>],
    terminal: &'a Handler,
}

impl<'a> Next<'a> {
    pub(crate) fn new(middlewares: &'a [Arc<dyn Middleware>], terminal: &'a Handler) -> Self {
        Self {
            middlewares,
            terminal,
        }
    }

    /// Run the remaining chain: peel the next middleware, or invoke the
    /// terminal handler once the list is exhausted.
    ///
    /// A terminal handler error is wrapped as
    /// [`ServerError::Handler`](crate::error::ServerError) here, at the
    /// innermost point of the chain, so it unwinds through middleware exactly
    /// like a middleware failure would.
    pub fn run(self, req: &mut Request) -> Result<Response, ServerError> {
        match self.middlewares.split_first() {
            Some((mw, rest)) => mw.handle(
                req,
                Next {
                    middlewares: rest,
                    terminal: self.terminal,
                },
            ),
            None => (self.terminal)(req).map_err(ServerError::Handler),
        }
    }
}

/// Adapt a closure into a [`Middleware`].
///
/// ```
/// use picoroute::middleware::{from_fn, Next};
/// use picoroute::{Request, Response};
///
/// let tag = from_fn(|req: &mut Request, next: Next<'_>| {
///     req.set_header("X-Traced", "1");
///     let mut resp = next.run(req)?;
///     resp.set_header("X-Traced", "1");
///     Ok(resp)
/// });
/// ```
pub fn from_fn<F>(f: F) -> Arc<dyn Middleware>
where
    F: for<'a> Fn(&mut Request, Next<'a>) -> Result<Response, ServerError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(FnMiddleware(f))
}

struct FnMiddleware<F>(F);

impl<F> Middleware for FnMiddleware<F>
where
    F: for<'a> Fn(&mut Request, Next<'a>) -> Result<Response, ServerError> + Send + Sync,
{
    fn handle(&self, req: &mut Request, next: Next<'_>) -> Result<Response, ServerError> {
        (self.0)(req, next)
    }
}
