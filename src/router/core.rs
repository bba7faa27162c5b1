//! Router core - pattern compilation and route resolution for the request
//! hot path.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::ServerError;
use crate::server::{Request, Response};

/// Terminal handler registered for a route.
///
/// Handlers may fail with any application error; the dispatch layer wraps an
/// escaping error as [`ServerError::Handler`](crate::error::ServerError).
pub type Handler = Arc<dyn Fn(&mut Request) -> anyhow::Result<Response> + Send + Sync>;

/// A single route registration: method pattern, compiled path matcher, and
/// terminal handler.
///
/// Routes are created once at registration time and immutable thereafter.
/// `param_names` lists the `{name}` parameters in the left-to-right order they
/// appear in the path pattern; the compiled matcher yields capture groups in
/// that same order.
#[derive(Clone)]
pub struct Route {
    method: Option<Method>,
    path_pattern: String,
    regex_pattern: String,
    matcher: Regex,
    param_names: Vec<String>,
    pub(crate) handler: Handler,
}

impl Route {
    /// Compile a path pattern into a route.
    ///
    /// A `method` of `None` matches any request method; it exists for
    /// isolated unit tests of the matcher, registration through the
    /// dispatcher always pins a concrete method.
    ///
    /// Each `/`-separated segment of `path_pattern` is either a literal
    /// (regex-escaped) or a `{name}` parameter compiled to the capture group
    /// `(.+)\/?`; segments are joined with `\/`. The resulting unanchored
    /// string is a compatibility contract, exposed verbatim through
    /// [`regex_pattern`](Self::regex_pattern):
    ///
    /// ```text
    /// /api/{param1}/{param2}/next/{param3}
    ///   -> \/api\/(.+)\/?\/(.+)\/?\/next\/(.+)\/?
    /// ```
    ///
    /// The matcher applied to incoming paths is this string anchored with
    /// `^...$`, so a route only matches when the pattern covers the whole
    /// path.
    #[must_use]
    pub fn new(method: Option<Method>, path_pattern: &str, handler: Handler) -> Self {
        let (regex_pattern, param_names) = compile_pattern(path_pattern);
        let matcher = Regex::new(&format!("^{regex_pattern}$"))
            .expect("escaped route pattern always compiles");

        Self {
            method,
            path_pattern: path_pattern.to_string(),
            regex_pattern,
            matcher,
            param_names,
            handler,
        }
    }

    /// The method this route answers; `None` means any.
    #[inline]
    #[must_use]
    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    /// The path pattern as registered, e.g. `/pets/{id}`.
    #[inline]
    #[must_use]
    pub fn path_pattern(&self) -> &str {
        &self.path_pattern
    }

    /// The exact compiled matcher string (unanchored compatibility contract).
    #[inline]
    #[must_use]
    pub fn regex_pattern(&self) -> &str {
        &self.regex_pattern
    }

    /// Parameter names in left-to-right pattern order.
    #[inline]
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Whether this route structurally matches `method` + `path`.
    #[must_use]
    pub fn matches(&self, method: &Method, path: &str) -> bool {
        self.method.as_ref().map_or(true, |m| m == method) && self.matcher.is_match(path)
    }

    /// Apply the matcher to `path` and zip captured groups positionally with
    /// `param_names`.
    ///
    /// Each captured value has a trailing `/` trimmed (the `(.+)` groups are
    /// greedy and may swallow the optional separator). Values are taken
    /// verbatim otherwise; path segments are not percent-decoded at this
    /// layer.
    #[must_use]
    pub fn extract_params(&self, path: &str) -> HashMap<String, String> {
        let mut params = HashMap::new();
        if let Some(caps) = self.matcher.captures(path) {
            for (name, group) in self.param_names.iter().zip(caps.iter().skip(1)) {
                if let Some(m) = group {
                    let value = m.as_str();
                    let value = value.strip_suffix('/').unwrap_or(value);
                    params.insert(name.clone(), value.to_string());
                }
            }
        }
        params
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path_pattern", &self.path_pattern)
            .field("regex_pattern", &self.regex_pattern)
            .field("param_names", &self.param_names)
            .finish_non_exhaustive()
    }
}

/// Ordered route table consulted on every request.
///
/// Registration order is match order: the first route whose method pattern
/// accepts the request method and whose matcher fully covers the path wins.
/// The table is populated during server setup (`&mut self`) and read on every
/// request thereafter (`&self`); mutating it while requests are in flight
/// requires exterior synchronization chosen by the host.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Create an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `path_pattern` and append the route to the table.
    ///
    /// # Arguments
    ///
    /// * `method` - Method the route answers; `None` for any
    /// * `path_pattern` - Path pattern with `{name}` parameter segments
    /// * `handler` - Terminal handler invoked when the route is dispatched
    ///
    /// # Returns
    ///
    /// The compiled, immutable route.
    pub fn register(&mut self, method: Option<Method>, path_pattern: &str, handler: Handler) -> &Route {
        let route = Route::new(method, path_pattern, handler);

        info!(
            method = ?route.method(),
            path_pattern = %route.path_pattern(),
            param_count = route.param_names().len(),
            routes_count = self.routes.len() + 1,
            "Route registered"
        );

        self.routes.push(route);
        &self.routes[self.routes.len() - 1]
    }

    /// Resolve `method` + `path` to the first matching route.
    ///
    /// Iterates the table in registration order; no match is
    /// [`ServerError::RouteNotFound`].
    pub fn resolve(&self, method: &Method, path: &str) -> Result<&Route, ServerError> {
        debug!(method = %method, path = %path, "Route match attempt");

        for route in &self.routes {
            if route.matches(method, path) {
                debug!(
                    method = %method,
                    path = %path,
                    path_pattern = %route.path_pattern(),
                    "Route matched"
                );
                return Ok(route);
            }
        }

        warn!(method = %method, path = %path, "No route matched");
        Err(ServerError::RouteNotFound {
            method: method.to_string(),
            path: path.to_string(),
        })
    }

    /// All registered routes in registration order.
    #[inline]
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

/// Compile a path pattern to the contract matcher string and ordered
/// parameter names.
fn compile_pattern(path_pattern: &str) -> (String, Vec<String>) {
    let mut param_names = Vec::with_capacity(path_pattern.matches('{').count());
    let segments: Vec<String> = path_pattern
        .split('/')
        .map(|segment| {
            if let Some(name) = segment
                .strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'))
            {
                param_names.push(name.to_string());
                String::from(r"(.+)\/?")
            } else {
                regex::escape(segment)
            }
        })
        .collect();

    (segments.join(r"\/"), param_names)
}
