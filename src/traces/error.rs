//! Tracing error types.

use opentelemetry::trace::TraceError;

#[derive(Debug, thiserror::Error)]
pub enum TracesError {
    #[error("endpoint is empty for selected exporter")]
    EndpointEmpty,
    #[error("service name is empty")]
    ServiceNameEmpty,
    #[error("unsupported exporter: {0}")]
    UnsupportedExporter(String),
    #[error("failed to read header {key:?}: {reason}")]
    HeaderRead { key: String, reason: String },
    #[error("malformed traceparent header: {0:?}")]
    MalformedTraceParent(String),
    #[error("trace pipeline: {0}")]
    Pipeline(#[from] TraceError),
}
