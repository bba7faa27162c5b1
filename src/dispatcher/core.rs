//! Dispatcher core - the single failure boundary around route resolution and
//! chain execution.

use std::sync::Arc;

use http::Method;
use tracing::{debug, warn};

use crate::error::{default_response, DefaultErrorHandler, ErrorHandler, ServerError};
use crate::middleware::{Middleware, Next};
use crate::router::{Handler, Router};
use crate::server::{Request, Response};

/// Identity header value stamped on every response leaving `dispatch`.
const SERVER_IDENT: &str = "picoroute";

/// The request-dispatch core: route table, ordered middleware list, and the
/// installed error-handling strategy.
///
/// Configuration (routes, middleware, error handler) is populated during
/// setup through `&mut self` and read on every request through `&self`, so a
/// configured dispatcher can be shared behind `Arc` across whatever execution
/// contexts the transport chooses. Mutating configuration while requests are
/// in flight is an accepted hazard, not a synchronized feature; hosts that
/// need it bring their own locking.
pub struct Dispatcher {
    router: Router,
    middlewares: Vec<Arc<dyn Middleware>>,
    error_handler: Arc<dyn ErrorHandler>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            router: Router::new(),
            middlewares: Vec::new(),
            error_handler: Arc::new(DefaultErrorHandler),
        }
    }
}

impl Dispatcher {
    /// Create a dispatcher with an empty route table, no middleware, and the
    /// default error handler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route for a specific method.
    pub fn route<F>(&mut self, method: Method, path_pattern: &str, handler: F)
    where
        F: Fn(&mut Request) -> anyhow::Result<Response> + Send + Sync + 'static,
    {
        self.router
            .register(Some(method), path_pattern, Arc::new(handler) as Handler);
    }

    /// Register a route that answers any method.
    pub fn any<F>(&mut self, path_pattern: &str, handler: F)
    where
        F: Fn(&mut Request) -> anyhow::Result<Response> + Send + Sync + 'static,
    {
        self.router
            .register(None, path_pattern, Arc::new(handler) as Handler);
    }

    /// Register a GET route.
    pub fn get<F>(&mut self, path_pattern: &str, handler: F)
    where
        F: Fn(&mut Request) -> anyhow::Result<Response> + Send + Sync + 'static,
    {
        self.route(Method::GET, path_pattern, handler);
    }

    /// Register a POST route.
    pub fn post<F>(&mut self, path_pattern: &str, handler: F)
    where
        F: Fn(&mut Request) -> anyhow::Result<Response> + Send + Sync + 'static,
    {
        self.route(Method::POST, path_pattern, handler);
    }

    /// Register a PUT route.
    pub fn put<F>(&mut self, path_pattern: &str, handler: F)
    where
        F: Fn(&mut Request) -> anyhow::Result<Response> + Send + Sync + 'static,
    {
        self.route(Method::PUT, path_pattern, handler);
    }

    /// Register a DELETE route.
    pub fn delete<F>(&mut self, path_pattern: &str, handler: F)
    where
        F: Fn(&mut Request) -> anyhow::Result<Response> + Send + Sync + 'static,
    {
        self.route(Method::DELETE, path_pattern, handler);
    }

    /// Register a PATCH route.
    pub fn patch<F>(&mut self, path_pattern: &str, handler: F)
    where
        F: Fn(&mut Request) -> anyhow::Result<Response> + Send + Sync + 'static,
    {
        self.route(Method::PATCH, path_pattern, handler);
    }

    /// Register a HEAD route.
    pub fn head<F>(&mut self, path_pattern: &str, handler: F)
    where
        F: Fn(&mut Request) -> anyhow::Result<Response> + Send + Sync + 'static,
    {
        self.route(Method::HEAD, path_pattern, handler);
    }

    /// Register an OPTIONS route.
    pub fn options<F>(&mut self, path_pattern: &str, handler: F)
    where
        F: Fn(&mut Request) -> anyhow::Result<Response> + Send + Sync + 'static,
    {
        self.route(Method::OPTIONS, path_pattern, handler);
    }

    /// Append a middleware to the processing pipeline.
    ///
    /// Middleware run in list order on the way in and reverse order on the
    /// way out; see the [`middleware`](crate::middleware) module docs.
    pub fn add_middleware(&mut self, mw: Arc<dyn Middleware>) {
        self.middlewares.push(mw);
    }

    /// Replace the middleware list wholesale.
    pub fn set_middlewares(&mut self, middlewares: Vec<Arc<dyn Middleware>>) {
        self.middlewares = middlewares;
    }

    /// Install a new error-handling strategy, replacing the current one for
    /// every subsequent request until replaced again.
    pub fn set_error_handler(&mut self, handler: Arc<dyn ErrorHandler>) {
        self.error_handler = handler;
    }

    /// The route table.
    #[inline]
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Mutable access to the route table, for wholesale replacement or direct
    /// registration between request cycles.
    #[inline]
    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    /// Dispatch a parsed request and always produce a response.
    ///
    /// Resolves the route, populates `request.route_params`, composes the
    /// middleware chain around the route's handler from the current list, and
    /// runs it. Any [`ServerError`] escaping that sequence is caught exactly
    /// once and handed to the installed [`ErrorHandler`]; if the strategy
    /// declines, the hard default mapping (404 for an unmatched route, 500
    /// otherwise) produces the response.
    ///
    /// Every response leaving here carries a `Server` identity header unless
    /// a handler or middleware already set one.
    pub fn dispatch(&self, request: &mut Request) -> Response {
        let mut response = match self.run_chain(request) {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    method = %request.method,
                    path = %request.path,
                    error = %err,
                    "Dispatch failed, invoking error handler"
                );
                self.error_handler
                    .on_error(Some(request), &err)
                    .unwrap_or_else(|| default_response(&err))
            }
        };

        response
            .headers
            .entry("Server".to_string())
            .or_insert_with(|| SERVER_IDENT.to_string());

        debug!(
            method = %request.method,
            path = %request.path,
            status = response.status.as_u16(),
            "Dispatch complete"
        );

        response
    }

    /// Resolve, extract params, compose, execute. The chain is rebuilt from
    /// the current middleware list on every call; composition is a pure
    /// function of that list and the resolved handler.
    fn run_chain(&self, request: &mut Request) -> Result<Response, ServerError> {
        let route = self.router.resolve(&request.method, &request.path)?;
        request.route_params = route.extract_params(&request.path);

        debug!(
            path_pattern = %route.path_pattern(),
            middleware_count = self.middlewares.len(),
            route_params = ?request.route_params,
            "Executing middleware chain"
        );

        Next::new(&self.middlewares, &route.handler).run(request)
    }
}
