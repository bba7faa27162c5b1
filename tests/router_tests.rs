//! Route table behavior through the public API: the compilation contract,
//! registration-order matching, and parameter extraction.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use picoroute::{Handler, Request, Response, Route, Router, ServerError};

fn noop() -> Handler {
    Arc::new(|_| Ok(Response::ok("")))
}

#[test]
fn test_route_compilation_contract() {
    let route = Route::new(None, "/api/{param1}/{param2}/next/{param3}", noop());

    assert_eq!(route.param_names(), ["param1", "param2", "param3"]);

    let pattern = r"(.+)\/?";
    assert_eq!(
        route.regex_pattern(),
        format!(r"\/api\/{pattern}\/{pattern}\/next\/{pattern}")
    );
}

#[test]
fn test_param_extraction_positional_order() {
    let route = Route::new(Some(Method::POST), "/hello/{id}/{name}/next/{part}", noop());
    assert!(route.matches(&Method::POST, "/hello/23/hi/next/second"));

    let params = route.extract_params("/hello/23/hi/next/second");
    let expected: HashMap<String, String> = [
        ("id".to_string(), "23".to_string()),
        ("name".to_string(), "hi".to_string()),
        ("part".to_string(), "second".to_string()),
    ]
    .into_iter()
    .collect();
    assert_eq!(params, expected);
}

#[test]
fn test_registration_order_wins() {
    let mut router = Router::new();
    router.register(
        Some(Method::GET),
        "/v/{rest}",
        Arc::new(|_| Ok(Response::ok("param"))),
    );
    router.register(
        Some(Method::GET),
        "/v/fixed",
        Arc::new(|_| Ok(Response::ok("literal"))),
    );

    let route = router.resolve(&Method::GET, "/v/fixed").expect("match");
    assert_eq!(route.path_pattern(), "/v/{rest}");
}

#[test]
fn test_method_filtering() {
    let mut router = Router::new();
    router.register(Some(Method::GET), "/only-get", noop());

    assert!(router.resolve(&Method::GET, "/only-get").is_ok());
    let err = router.resolve(&Method::POST, "/only-get").unwrap_err();
    assert!(matches!(err, ServerError::RouteNotFound { .. }));
}

#[test]
fn test_path_segments_not_decoded() {
    // percent-decoding applies to the query string, not to path captures
    let route = Route::new(None, "/files/{name}", noop());
    let params = route.extract_params("/files/a%20b");
    assert_eq!(params.get("name"), Some(&"a%20b".to_string()));
}

#[test]
fn test_query_parsing_is_request_side() {
    let req = Request::new(
        Method::GET,
        "/search?string=salam+%C9%99%C4%B1oue%C9%99i%C3%B6%C3%BC&number=123",
        HashMap::new(),
        Vec::new(),
    );
    assert_eq!(req.path, "/search");
    assert_eq!(req.query_param("string"), Some("salam əıoueəiöü"));
    assert_eq!(req.query_param("number"), Some("123"));
}
