use fileserve::http::request::{Method, Request, RequestBuilder};
use std::collections::HashMap;

#[test]
fn test_request_header_retrieval() {
    let mut headers = HashMap::new();
    headers.insert("Host".to_string(), "example.com".to_string());
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    let req = Request {
        method: Method::GET,
        path: "/".to_string(),
        query: HashMap::new(),
        version: "HTTP/1.1".to_string(),
        headers,
    };

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_builder() {
    let req = RequestBuilder::new()
        .method(Method::HEAD)
        .path("/docs")
        .query("page", "2")
        .header("User-Agent", "Test")
        .build()
        .unwrap();

    assert_eq!(req.method, Method::HEAD);
    assert_eq!(req.path, "/docs");
    assert_eq!(req.version, "HTTP/1.1");
    assert_eq!(req.query_param("page"), Some("2"));
    assert_eq!(req.header("User-Agent"), Some("Test"));
}

#[test]
fn test_request_builder_defaults_to_get() {
    let req = RequestBuilder::new().path("/").build().unwrap();

    assert_eq!(req.method, Method::GET);
}

#[test]
fn test_request_builder_requires_path() {
    let result = RequestBuilder::new().method(Method::GET).build();

    assert_eq!(result, Err("path missing"));
}

#[test]
fn test_method_from_str() {
    assert_eq!(Method::from_str("GET"), Some(Method::GET));
    assert_eq!(Method::from_str("CONNECT"), Some(Method::CONNECT));
    assert_eq!(Method::from_str("TRACE"), Some(Method::TRACE));
    assert_eq!(Method::from_str("FOO"), None);
    assert_eq!(Method::from_str(""), None);
}

#[test]
fn test_method_round_trips_through_str() {
    for method in Method::ALL {
        assert_eq!(Method::from_str(method.as_str()), Some(method));
        assert_eq!(method.to_string(), method.as_str());
    }
}
