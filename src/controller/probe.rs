// Liveness probe controller.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};

use crate::http::Controller;

const SUCCESS_RESPONSE: &str = r#"{
  "status": 200,
  "message": "I'm fine :D"
}"#;

pub const PROBE_PATH: &str = "/k8s/probe";

/// LivenessProbeController answers Kubernetes liveness probes.
pub struct LivenessProbeController;

impl LivenessProbeController {
    pub fn new() -> Self {
        Self
    }

    async fn probe() -> impl IntoResponse {
        (
            StatusCode::OK,
            [("content-type", "application/json")],
            SUCCESS_RESPONSE,
        )
    }
}

impl Default for LivenessProbeController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for LivenessProbeController {
    fn add_route(&self, router: Router) -> Router {
        router.route(PROBE_PATH, get(Self::probe))
    }
}
