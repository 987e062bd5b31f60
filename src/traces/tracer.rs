//! Global tracing switch and OpenTelemetry pipeline setup.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::{self as sdktrace, BatchConfig, Sampler};
use opentelemetry_sdk::{runtime, Resource};
use tracing::{info, warn};

use super::error::TracesError;
use crate::config::{SamplingMode, Traces};

// Constants for exporter types
const EXPORTER_GRPC: &str = "grpc"; // default

const DEFAULT_SAMPLING_RATE: f64 = 0.1;

// Global state
static ENABLED: AtomicBool = AtomicBool::new(false);
static INSTALLED: AtomicBool = AtomicBool::new(false);
static MU: Mutex<()> = Mutex::new(()); // Serialize apply/shutdown to avoid double-shutdown races

/// Checks if tracing is active.
pub fn is_active_tracing() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Checks whether an OTLP pipeline is currently installed.
pub fn is_pipeline_installed() -> bool {
    INSTALLED.load(Ordering::Relaxed)
}

/// Enables tracing.
pub fn enable_tracing() {
    ENABLED.store(true, Ordering::Relaxed);
}

/// Disables tracing.
pub fn disable_tracing() {
    ENABLED.store(false, Ordering::Relaxed);
}

/// Installs the OTLP pipeline described by `cfg` and switches tracing on.
///
/// Returns `Ok(None)` when tracing is not configured or disabled; the caller
/// then runs without an OpenTelemetry layer and every span is a no-op.
/// Must be called from within a tokio runtime.
pub fn apply(cfg: Option<&Traces>) -> Result<Option<sdktrace::Tracer>, TracesError> {
    let _guard = MU.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let cfg = match cfg {
        Some(c) if c.enabled => c,
        _ => {
            disable_tracing();
            return Ok(None);
        }
    };

    let exporter = cfg.exporter.as_deref().unwrap_or(EXPORTER_GRPC);
    if exporter != EXPORTER_GRPC {
        disable_tracing();
        return Err(TracesError::UnsupportedExporter(exporter.to_string()));
    }

    let endpoint = match cfg.endpoint.as_deref() {
        Some(e) if !e.is_empty() => e,
        _ => {
            disable_tracing();
            return Err(TracesError::EndpointEmpty);
        }
    };

    let service_name = match cfg.service_name.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => {
            disable_tracing();
            return Err(TracesError::ServiceNameEmpty);
        }
    };

    let mut attributes = vec![KeyValue::new("service.name", service_name.to_string())];
    if let Some(version) = cfg.service_version.as_deref() {
        attributes.push(KeyValue::new("service.version", version.to_string()));
    }

    let mut batch = BatchConfig::default();
    if let Some(size) = cfg.export_batch_size {
        batch = batch.with_max_export_batch_size(size);
    }
    if let Some(delay) = cfg.export_batch_timeout {
        batch = batch.with_scheduled_delay(delay);
    }
    if let Some(queue) = cfg.export_max_queue {
        batch = batch.with_max_queue_size(queue);
    }

    global::set_text_map_propagator(TraceContextPropagator::new());

    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint),
        )
        .with_trace_config(
            sdktrace::config()
                .with_sampler(sampler(cfg))
                .with_resource(Resource::new(attributes)),
        )
        .with_batch_config(batch)
        .install_batch(runtime::Tokio)
        .map_err(|e| {
            disable_tracing();
            TracesError::Pipeline(e)
        })?;

    INSTALLED.store(true, Ordering::Relaxed);
    enable_tracing();

    Ok(Some(tracer))
}

/// Logs what [`apply`] did. `apply` runs before any subscriber exists,
/// so the binary calls this once logging is up.
/// `outcome` is `Ok(true)` when a pipeline was installed.
pub fn log_apply_outcome(cfg: Option<&Traces>, outcome: Result<bool, &TracesError>) {
    match (outcome, cfg) {
        (Err(e), _) => warn!(
            component = "traces",
            event = "pipeline_failed",
            error = %e,
            "tracing pipeline not installed, continuing without export"
        ),
        (Ok(true), Some(cfg)) => info!(
            component = "traces",
            event = "pipeline_installed",
            exporter = cfg.exporter.as_deref().unwrap_or(EXPORTER_GRPC),
            endpoint = cfg.endpoint.as_deref().unwrap_or_default(),
            service_name = cfg.service_name.as_deref().unwrap_or_default(),
            "tracing pipeline installed"
        ),
        _ => info!(
            component = "traces",
            event = "pipeline_disabled",
            "tracing disabled by config, entry spans are no-ops"
        ),
    }
}

/// Flushes and shuts the installed provider down. Safe to call repeatedly.
pub fn shutdown() {
    let _guard = MU.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    disable_tracing();
    if INSTALLED.swap(false, Ordering::Relaxed) {
        global::shutdown_tracer_provider();
        info!(
            component = "traces",
            event = "pipeline_shutdown",
            "tracing pipeline shut down"
        );
    }
}

/// Maps the configured sampling mode onto an SDK sampler.
pub fn sampler(cfg: &Traces) -> Sampler {
    match cfg.sampling_mode.unwrap_or(SamplingMode::Ratio) {
        SamplingMode::Off => Sampler::AlwaysOff,
        SamplingMode::Always => Sampler::AlwaysOn,
        SamplingMode::Ratio => {
            let rate = cfg.sampling_rate.unwrap_or(DEFAULT_SAMPLING_RATE);
            Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(rate)))
        }
    }
}
