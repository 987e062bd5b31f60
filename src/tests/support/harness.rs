//! In-process router harness.

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use axum::Router;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use super::recorder::RecordingTracer;
use crate::app::App;
use crate::config::new_test_config;

/// Full application router with the default ignore rules.
pub fn test_router(tracer: &RecordingTracer) -> Router {
    App::with_tracer(
        CancellationToken::new(),
        new_test_config(),
        Arc::new(tracer.clone()),
    )
    .expect("app should build")
    .router()
}

/// Full application router with custom `pattern -> enabled` ignore rules.
pub fn test_router_with_rules(tracer: &RecordingTracer, rules: &[(&str, bool)]) -> Router {
    let mut cfg = new_test_config();
    cfg.tracehook.ignore = Some(
        rules
            .iter()
            .map(|(pattern, on)| (pattern.to_string(), *on))
            .collect(),
    );
    App::with_tracer(CancellationToken::new(), cfg, Arc::new(tracer.clone()))
        .expect("app should build")
        .router()
}

/// Sends a GET through the router.
pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    get_with_headers(router, uri, &[]).await
}

/// Sends a GET with extra headers through the router.
pub async fn get_with_headers(
    router: &Router,
    uri: &str,
    headers: &[(&str, &str)],
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("GET")
        .uri(uri)
        .header("host", "example.test");
    for (k, v) in headers {
        builder = builder.header(*k, *v);
    }
    let request = builder.body(Body::empty()).expect("valid request");

    router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8_lossy(&bytes).into_owned()
}
