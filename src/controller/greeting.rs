//! Greeting routes.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};

use crate::http::Controller;

/// GreetingController serves `/hello` and `/world`.
pub struct GreetingController;

impl GreetingController {
    pub fn new() -> Self {
        Self
    }

    async fn hello() -> impl IntoResponse {
        (StatusCode::OK, "hello")
    }

    async fn world() -> impl IntoResponse {
        (StatusCode::OK, "world")
    }
}

impl Default for GreetingController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for GreetingController {
    fn add_route(&self, router: Router) -> Router {
        router
            .route("/hello", get(Self::hello))
            .route("/world", get(Self::world))
    }
}
