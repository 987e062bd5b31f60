pub mod error;
pub mod otel;
pub mod span;
pub mod tracer;


// Re-export commonly used functions and types
pub use error::TracesError;
pub use otel::{validate_traceparent, OtelSpan, OtelTracer, TRACEPARENT_HEADER};
pub use span::{
    HeaderReader, NoopSpan, Span, SpanLayer, SpanOptions, Tag, Tracer, COMPONENT_HTTP_SERVER,
};
pub use tracer::{
    apply, disable_tracing, enable_tracing, is_active_tracing, is_pipeline_installed,
    log_apply_outcome, shutdown,
};
