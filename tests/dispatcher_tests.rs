//! Dispatch boundary behavior: the full request/response flow, the default
//! error mapping, and error-handler strategy replacement.

use std::collections::HashMap;
use std::sync::Arc;

use http::{Method, StatusCode};
use picoroute::{
    DefaultErrorHandler, Dispatcher, ErrorHandler, Request, Response, ServerError,
};

use tracing_util::TestTracing;

fn dispatch(dispatcher: &Dispatcher, method: Method, target: &str) -> Response {
    let mut req = Request::new(method, target, HashMap::new(), Vec::new());
    dispatcher.dispatch(&mut req)
}

#[test]
fn test_request_and_response_flow() {
    let _tracing = TestTracing::init();
    let body = "Hello World";

    let mut dispatcher = Dispatcher::new();
    dispatcher.post("/hello/{id}/{name}/next/{part}", |req| {
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.path, "/hello/23/hi/next/second");
        assert_eq!(req.route_param("id"), Some("23"));
        assert_eq!(req.route_param("name"), Some("hi"));
        assert_eq!(req.route_param("part"), Some("second"));
        assert_eq!(req.query_param("string"), Some("salam əıoueəiöü"));
        assert_eq!(req.query_param("number"), Some("123"));
        assert_eq!(req.header("Content-Type"), Some("text/plain"));
        assert_eq!(req.body, b"Hello World");
        Ok(Response::ok("TestPassed"))
    });

    let headers: HashMap<String, String> = [
        ("Content-Type".to_string(), "text/plain".to_string()),
        ("Content-Length".to_string(), body.len().to_string()),
    ]
    .into_iter()
    .collect();
    let mut req = Request::new(
        Method::POST,
        "/hello/23/hi/next/second?string=salam+%C9%99%C4%B1oue%C9%99i%C3%B6%C3%BC&number=123",
        headers,
        body.as_bytes().to_vec(),
    );

    let resp = dispatcher.dispatch(&mut req);
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, b"TestPassed");
    assert_eq!(resp.header("Server"), Some("picoroute"));
}

#[test]
fn test_unregistered_path_yields_404() {
    let _tracing = TestTracing::init();
    let dispatcher = Dispatcher::new();

    let resp = dispatch(&dispatcher, Method::GET, "/aNonDefinedRoute");
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.body.is_empty());
}

#[test]
fn test_wrong_method_yields_404() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.get("/resource", |_req| Ok(Response::ok("got")));

    let resp = dispatch(&dispatcher, Method::POST, "/resource");
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[test]
fn test_any_method_route() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.any("/anything", |req| Ok(Response::ok(req.method.to_string())));

    assert_eq!(dispatch(&dispatcher, Method::GET, "/anything").body, b"GET");
    assert_eq!(dispatch(&dispatcher, Method::PUT, "/anything").body, b"PUT");
}

struct InterceptNotFound;

impl ErrorHandler for InterceptNotFound {
    fn on_error(&self, _request: Option<&Request>, error: &ServerError) -> Option<Response> {
        match error {
            ServerError::RouteNotFound { .. } => Some(Response::ok("Error is handled")),
            other => Some(picoroute::default_response(other)),
        }
    }
}

#[test]
fn test_custom_error_handler_install_and_restore() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.set_error_handler(Arc::new(InterceptNotFound));

    let resp = dispatch(&dispatcher, Method::GET, "/aNonDefinedRoute");
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, b"Error is handled");

    dispatcher.set_error_handler(Arc::new(DefaultErrorHandler));
    let resp = dispatch(&dispatcher, Method::GET, "/aNonDefinedRoute");
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.body.is_empty());
}

/// Declines every error, exercising the hard default fallback.
struct Declines;

impl ErrorHandler for Declines {
    fn on_error(&self, _request: Option<&Request>, _error: &ServerError) -> Option<Response> {
        None
    }
}

#[test]
fn test_declining_strategy_falls_back_to_default_mapping() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.set_error_handler(Arc::new(Declines));
    dispatcher.get("/explode", |_req| Err(anyhow::anyhow!("boom")));

    assert_eq!(
        dispatch(&dispatcher, Method::GET, "/missing").status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        dispatch(&dispatcher, Method::GET, "/explode").status,
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_handler_failure_yields_500() {
    let _tracing = TestTracing::init();
    let mut dispatcher = Dispatcher::new();
    dispatcher.get("/explode", |_req| Err(anyhow::anyhow!("boom")));

    let resp = dispatch(&dispatcher, Method::GET, "/explode");
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.body.is_empty());
}

/// Records which error kind reached the strategy.
struct KindProbe;

impl ErrorHandler for KindProbe {
    fn on_error(&self, request: Option<&Request>, error: &ServerError) -> Option<Response> {
        assert!(request.is_some());
        let kind = match error {
            ServerError::RouteNotFound { .. } => "not-found",
            ServerError::Handler(_) => "handler",
            ServerError::Middleware(_) => "middleware",
        };
        Some(Response::ok(kind))
    }
}

#[test]
fn test_error_kinds_reach_strategy() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.set_error_handler(Arc::new(KindProbe));
    dispatcher.get("/explode", |_req| Err(anyhow::anyhow!("boom")));
    dispatcher.set_middlewares(vec![picoroute::middleware::from_fn(
        |req: &mut Request, next: picoroute::Next<'_>| {
            if req.path == "/blocked" {
                Err(ServerError::middleware(anyhow::anyhow!("denied")))
            } else {
                next.run(req)
            }
        },
    )]);
    dispatcher.get("/blocked", |_req| Ok(Response::ok("open")));

    assert_eq!(dispatch(&dispatcher, Method::GET, "/missing").body, b"not-found");
    assert_eq!(dispatch(&dispatcher, Method::GET, "/explode").body, b"handler");
    assert_eq!(dispatch(&dispatcher, Method::GET, "/blocked").body, b"middleware");
}

#[derive(serde::Serialize)]
struct Pet {
    id: u64,
    name: &'static str,
}

#[test]
fn test_json_handler_response() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.get("/pets/{id}", |req| {
        let id = req.route_param("id").unwrap_or("0").parse()?;
        Response::json(StatusCode::OK, &Pet { id, name: "Fluffy" })
    });

    let resp = dispatch(&dispatcher, Method::GET, "/pets/123");
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.header("Content-Type"), Some("application/json"));
    assert_eq!(resp.body, br#"{"id":123,"name":"Fluffy"}"#);

    // a parse failure in the handler is a handler error, mapped to 500
    let resp = dispatch(&dispatcher, Method::GET, "/pets/not-a-number");
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_server_header_not_overwritten() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.get("/custom", |_req| {
        let mut resp = Response::ok("mine");
        resp.set_header("Server", "custom-ident");
        Ok(resp)
    });

    let resp = dispatch(&dispatcher, Method::GET, "/custom");
    assert_eq!(resp.header("Server"), Some("custom-ident"));
}
