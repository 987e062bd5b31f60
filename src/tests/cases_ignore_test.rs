// End-to-end tests for ignore rules.

use axum::http::StatusCode;

use crate::support::{body_string, get, test_router, test_router_with_rules, RecordingTracer};
use crate::traces::Tag;

/// Test that the default prefix rule skips /fib/* while still serving it.
#[tokio::test]
async fn test_default_rules_skip_fib() {
    let tracer = RecordingTracer::new();
    let router = test_router(&tracer);

    let response = get(&router, "/fib/10").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, r#"{"n":10,"value":55}"#);

    assert!(tracer.spans().is_empty());
}

/// Test that the default exact rule skips /world only.
#[tokio::test]
async fn test_default_rules_skip_world_exactly() {
    let tracer = RecordingTracer::new();
    let router = test_router(&tracer);

    assert_eq!(get(&router, "/world").await.status(), StatusCode::OK);
    assert!(tracer.spans().is_empty());

    // Different url, not covered by the exact rule.
    assert_eq!(get(&router, "/world2").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(tracer.only_span().operation_name, "GET:/world2");
}

/// Test that rules match the raw request uri including the query.
#[tokio::test]
async fn test_exact_rule_sees_query_string() {
    let tracer = RecordingTracer::new();
    let router = test_router(&tracer);

    get(&router, "/world?x=1").await;

    let span = tracer.only_span();
    assert_eq!(span.operation_name, "GET:/world");
}

/// Test that handler errors on ignored routes are not traced.
#[tokio::test]
async fn test_ignored_route_with_error() {
    let tracer = RecordingTracer::new();
    let router = test_router(&tracer);

    let response = get(&router, "/fib/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(tracer.spans().is_empty());
}

/// Test configured rules replace the defaults.
#[tokio::test]
async fn test_configured_rules() {
    let tracer = RecordingTracer::new();
    let router = test_router_with_rules(&tracer, &[("*probe*", true), ("/fib/*", false)]);

    get(&router, "/k8s/probe").await;
    assert!(tracer.spans().is_empty());

    let response = get(&router, "/fib/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let span = tracer.only_span();
    assert_eq!(span.operation_name, "GET:/fib/abc");
    assert_eq!(span.tag(Tag::StatusCode), Some("400"));
    assert!(span.errors[0].contains("invalid fib index"));
    assert_eq!(span.end_calls, 1);
}

/// Test that a bare wildcard disables tracing for every route.
#[tokio::test]
async fn test_catch_all_rule() {
    let tracer = RecordingTracer::new();
    let router = test_router_with_rules(&tracer, &[("*", true)]);

    for uri in ["/hello", "/boom", "/nope", "/fib/3"] {
        get(&router, uri).await;
    }
    assert!(tracer.spans().is_empty());
}
