// Application wiring: tracer, interceptor, controllers, server.

use anyhow::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::{Config, ConfigTrait};
use crate::controller::{
    BoomController, FibController, GreetingController, LivenessProbeController,
    PrometheusMetricsController, TracesController,
};
use crate::http::{Controller, HttpServer, Middleware};
use crate::interceptor::HttpInterceptor;
use crate::middleware::TraceMiddleware;
use crate::traces::{self, OtelTracer, Tracer};

/// Encapsulates the application state.
#[derive(Clone)]
pub struct App {
    shutdown_token: CancellationToken,
    server: Arc<HttpServer>,
}

impl App {
    /// Creates the application with the OpenTelemetry-backed tracer.
    pub fn new(shutdown_token: CancellationToken, cfg: Config) -> Result<Self> {
        Self::with_tracer(shutdown_token, cfg, Arc::new(OtelTracer::new()))
    }

    /// Creates the application around an arbitrary tracer.
    pub fn with_tracer(
        shutdown_token: CancellationToken,
        cfg: Config,
        tracer: Arc<dyn Tracer>,
    ) -> Result<Self> {
        let rules = Arc::new(cfg.ignore_rules());
        info!(
            component = "app",
            event = "ignore_rules_loaded",
            rules = rules.len(),
            "ignore rules resolved"
        );

        let interceptor = Arc::new(HttpInterceptor::new(tracer, rules));

        let server = HttpServer::new(
            shutdown_token.clone(),
            cfg,
            Self::controllers(),
            vec![Box::new(TraceMiddleware::new(interceptor)) as Box<dyn Middleware>],
        )?;

        Ok(Self {
            shutdown_token,
            server,
        })
    }

    fn controllers() -> Vec<Box<dyn Controller>> {
        vec![
            Box::new(GreetingController::new()),
            Box::new(FibController::new()),
            Box::new(BoomController::new()),
            Box::new(LivenessProbeController::new()),
            Box::new(TracesController::new()),
            Box::new(PrometheusMetricsController::new()),
        ]
    }

    /// The layered router, for serving or for in-process requests.
    pub fn router(&self) -> axum::Router {
        self.server.router()
    }

    /// Serves until the shutdown token is cancelled, then releases resources.
    pub async fn serve(&self) -> Result<()> {
        info!(component = "app", event = "started", "application lifecycle");

        let result = self.server.listen_and_serve().await;
        if let Err(e) = &result {
            error!(
                component = "app",
                scope = "server",
                event = "serve_failed",
                error = %e,
                "server failed to serve"
            );
        }

        self.close().await;
        result
    }

    /// Flushes the tracing pipeline and cancels the shared token.
    pub async fn close(&self) {
        // Provider shutdown blocks on the final export.
        if let Err(e) = tokio::task::spawn_blocking(traces::shutdown).await {
            error!(
                component = "app",
                scope = "observability",
                event = "close_failed",
                error = %e,
                "error closing tracing pipeline"
            );
        }
        self.shutdown_token.cancel();
        info!(component = "app", event = "stopped", "application lifecycle");
    }
}
