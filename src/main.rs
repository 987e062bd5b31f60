// Main entrypoint for the tracehook demo service.

use anyhow::{Context, Result};
use clap::Parser;
use opentelemetry_sdk::trace::Tracer as SdkTracer;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use tracehook::app::App;
use tracehook::config::{Config, ConfigTrait};
use tracehook::controller::metrics::init_prometheus_exporter;
use tracehook::logger;
use tracehook::shutdown::GracefulShutdown;
use tracehook::traces;

const CONFIG_PATH: &str = "cfg/tracehook.cfg.yaml";
const CONFIG_PATH_LOCAL: &str = "cfg/tracehook.cfg.local.yaml";

/// tracehook - HTTP service with entry-span tracing and ignore rules
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, value_name = "FILE")]
    cfg: Option<PathBuf>,
}

/// Loads the configuration struct from YAML file.
/// Tries local config first, then falls back to default config.
fn load_cfg(path: Option<PathBuf>) -> Result<(Config, String)> {
    if let Some(custom_path) = path {
        let cfg = Config::load(&custom_path)
            .with_context(|| format!("failed to load custom config from {:?}", custom_path))?;
        return Ok((cfg, custom_path.display().to_string()));
    }

    match Config::load(CONFIG_PATH_LOCAL) {
        Ok(cfg) => Ok((cfg, CONFIG_PATH_LOCAL.to_string())),
        Err(_) => {
            let cfg = Config::load(CONFIG_PATH)
                .with_context(|| format!("failed to load config from {}", CONFIG_PATH))?;
            Ok((cfg, CONFIG_PATH.to_string()))
        }
    }
}

/// Installs structured logging, with the OpenTelemetry layer when a
/// pipeline is installed.
fn configure_logger(cfg: &Config, otel: Option<SdkTracer>) {
    use tracing_subscriber::util::SubscriberInitExt;

    let otel_layer = otel.map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer));
    logger::subscriber(cfg, otel_layer).init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = init_prometheus_exporter() {
        eprintln!("Warning: Failed to initialize Prometheus metrics exporter: {}", e);
        eprintln!("Metrics endpoint will not be available");
    }

    tokio::runtime::Runtime::new()
        .context("Failed to create tokio runtime")?
        .block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<()> {
    let shutdown_token = CancellationToken::new();

    let (cfg, cfg_path) = load_cfg(args.cfg)?;

    // The OTel layer must exist before the subscriber is installed.
    let applied = traces::apply(cfg.traces());
    let installed = applied.as_ref().map(Option::is_some);
    let otel = applied.as_ref().ok().and_then(Option::clone);

    configure_logger(&cfg, otel);

    info!(
        component = "config",
        event = "load_success",
        path = %cfg_path,
        "config loaded"
    );
    traces::log_apply_outcome(cfg.traces(), installed);

    let graceful_shutdown =
        GracefulShutdown::new(shutdown_token.clone()).with_graceful_timeout(Duration::from_secs(60));

    let app = App::new(shutdown_token.clone(), cfg)?;
    graceful_shutdown.spawn(async move {
        if let Err(e) = app.serve().await {
            error!(
                component = "main",
                scope = "app",
                event = "start_failed",
                error = %e,
                "failed to start app"
            );
        }
    });

    if let Err(e) = graceful_shutdown.await_shutdown().await {
        error!(
            component = "main",
            scope = "service",
            event = "graceful_shutdown_failed",
            error = %e,
            "failed to gracefully shut down service"
        );
        return Err(e);
    }

    Ok(())
}
