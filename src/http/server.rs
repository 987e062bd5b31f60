//! HTTP server implementation.
//

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info};

use crate::config::{Config, ConfigTrait};
use crate::controller::controller::Controller;
use crate::middleware::middleware::Middleware;

const DEFAULT_NAME: &str = "tracehook";
const DEFAULT_PORT: &str = "8080";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Server trait for HTTP server operations.
#[async_trait::async_trait]
pub trait Server: Send + Sync {
    /// Starts the server (blocking).
    async fn listen_and_serve(&self) -> Result<()>;
}

/// HTTP server implementation.
pub struct HttpServer {
    shutdown_token: CancellationToken,
    config: Config,
    router: Router,
}

impl HttpServer {
    /// Creates a new HTTP server.
    pub fn new(
        shutdown_token: CancellationToken,
        config: Config,
        controllers: Vec<Box<dyn Controller>>,
        middlewares: Vec<Box<dyn Middleware>>,
    ) -> Result<Arc<Self>> {
        let timeout = config
            .api()
            .and_then(|api| api.timeout)
            .unwrap_or(DEFAULT_TIMEOUT);

        let router = Self::build_router(controllers);
        let router = Self::merge_middlewares(router, middlewares, timeout);

        Ok(Arc::new(Self {
            shutdown_token,
            config,
            router,
        }))
    }

    /// Returns the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Starts the HTTP server (async version).
    pub async fn listen_and_serve(&self) -> Result<()> {
        let api_cfg = self.config.api().context("API configuration is required")?;

        let name = api_cfg.name.as_deref().unwrap_or(DEFAULT_NAME);
        let port = api_cfg.port.as_deref().unwrap_or(DEFAULT_PORT);
        let port = port.trim_start_matches(':');

        let addr: SocketAddr = format!("0.0.0.0:{}", port)
            .parse()
            .context("Failed to parse server address")?;

        let listener = TcpListener::bind(&addr)
            .await
            .context("Failed to bind TCP listener")?;

        info!(
            component = "server",
            event = "started",
            name = name,
            port = port,
            "server started"
        );

        let shutdown_token = self.shutdown_token.clone();
        let serve_future =
            axum::serve(listener, self.router.clone()).with_graceful_shutdown(async move {
                shutdown_token.cancelled().await;
            });

        if let Err(e) = serve_future.await {
            error!(
                component = "server",
                event = "listen_and_serve_failed",
                name = name,
                port = port,
                error = %e,
                "server failed to listen and serve"
            );
            return Err(e.into());
        }

        info!(
            component = "server",
            event = "stopped",
            name = name,
            port = port,
            "server stopped"
        );

        Ok(())
    }

    /// Builds the router with all controllers.
    fn build_router(controllers: Vec<Box<dyn Controller>>) -> Router {
        controllers
            .iter()
            .fold(Router::new(), |router, controller| controller.add_route(router))
    }

    /// Merges middlewares into the router.
    /// The first middleware in the list ends up outermost.
    fn merge_middlewares(
        router: Router,
        middlewares: Vec<Box<dyn Middleware>>,
        timeout: Duration,
    ) -> Router {
        let router = middlewares
            .iter()
            .rev()
            .fold(router, |router, middleware| middleware.apply(router));

        router.layer(TimeoutLayer::new(timeout))
    }
}

#[async_trait::async_trait]
impl Server for HttpServer {
    async fn listen_and_serve(&self) -> Result<()> {
        HttpServer::listen_and_serve(self).await
    }
}
