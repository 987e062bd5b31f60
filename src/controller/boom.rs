//! Always-failing route, handy for checking error spans end to end.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};

use crate::http::Controller;
use crate::middleware::HandlerErrors;

pub struct BoomController;

impl BoomController {
    pub fn new() -> Self {
        Self
    }

    async fn boom() -> impl IntoResponse {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            HandlerErrors::single("boom"),
            "internal error",
        )
    }
}

impl Default for BoomController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for BoomController {
    fn add_route(&self, router: Router) -> Router {
        router.route("/boom", get(Self::boom))
    }
}
