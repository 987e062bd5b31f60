// Tracing on/off controller.

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Serialize;

use crate::http::Controller;
use crate::traces;

pub const TRACES_PATH: &str = "/tracehook/traces";
pub const TRACES_ON_PATH: &str = "/tracehook/traces/on";
pub const TRACES_OFF_PATH: &str = "/tracehook/traces/off";

/// Traces response structure.
#[derive(Debug, Serialize)]
struct TracesResponse {
    #[serde(rename = "is_active")]
    is_active: bool,
    #[serde(rename = "pipeline_installed")]
    pipeline_installed: bool,
}

/// TracesController switches entry-span creation on and off at runtime.
pub struct TracesController;

impl TracesController {
    /// Creates a new traces controller.
    pub fn new() -> Self {
        Self
    }

    /// Gets the current traces status.
    async fn get() -> impl IntoResponse {
        let resp = TracesResponse {
            is_active: traces::is_active_tracing(),
            pipeline_installed: traces::is_pipeline_installed(),
        };
        (
            StatusCode::OK,
            [("content-type", "application/json")],
            serde_json::to_string(&resp).unwrap_or_default(),
        )
    }

    /// Enables tracing. Without an installed pipeline spans are only
    /// visible to the local subscriber.
    async fn on() -> impl IntoResponse {
        traces::enable_tracing();
        Self::get().await
    }

    /// Disables tracing.
    async fn off() -> impl IntoResponse {
        traces::disable_tracing();
        Self::get().await
    }
}

impl Default for TracesController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for TracesController {
    fn add_route(&self, router: Router) -> Router {
        router
            .route(TRACES_PATH, get(Self::get))
            .route(TRACES_ON_PATH, get(Self::on))
            .route(TRACES_OFF_PATH, get(Self::off))
    }
}

