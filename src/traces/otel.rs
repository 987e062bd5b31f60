//! OpenTelemetry-backed tracer.
//!
//! Entry spans are regular `tracing` spans; the `tracing-opentelemetry`
//! layer installed by the binary turns them into exported OTel spans.

use std::collections::HashMap;

use opentelemetry::global;
use tracing::field::Empty;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use super::error::TracesError;
use super::span::{HeaderReader, NoopSpan, Span, SpanOptions, Tag, Tracer};
use super::tracer::is_active_tracing;

pub const TRACEPARENT_HEADER: &str = "traceparent";

const STATUS_ERROR: &str = "ERROR";

/// Tracer creating `tracing` spans parented to the propagated context.
#[derive(Debug, Clone, Default)]
pub struct OtelTracer;

impl OtelTracer {
    pub fn new() -> Self {
        Self
    }
}

impl Tracer for OtelTracer {
    fn create_entry_span(
        &self,
        operation_name: &str,
        header_reader: HeaderReader<'_>,
        opts: SpanOptions,
    ) -> Result<Box<dyn Span>, TracesError> {
        // Fast path: tracing switched off at runtime
        if !is_active_tracing() {
            return Ok(Box::new(NoopSpan::default()));
        }

        let carrier = read_carrier(header_reader)?;
        let parent = global::get_text_map_propagator(|propagator| propagator.extract(&carrier));

        let span = tracing::info_span!(
            "entry",
            otel.name = operation_name,
            otel.kind = "server",
            otel.status_code = Empty,
            span.layer = opts.layer.as_str(),
            component = opts.component,
            http.method = Empty,
            url = Empty,
            status_code = Empty,
            error = Empty,
            error.message = Empty,
        );
        span.set_parent(parent);

        for (tag, value) in &opts.tags {
            span.record(tag.key(), value.as_str());
        }

        Ok(Box::new(OtelSpan { inner: Some(span) }))
    }
}

/// Collects propagation headers through the reader.
/// A present but malformed `traceparent` is an error rather than a silent new root.
fn read_carrier(header_reader: HeaderReader<'_>) -> Result<HashMap<String, String>, TracesError> {
    let mut keys: Vec<String> =
        global::get_text_map_propagator(|p| p.fields().map(str::to_owned).collect());
    if !keys.iter().any(|k| k == TRACEPARENT_HEADER) {
        keys.push(TRACEPARENT_HEADER.to_string());
    }

    let mut carrier = HashMap::with_capacity(keys.len());
    for key in keys {
        let Some(value) = header_reader(&key)? else {
            continue;
        };
        if key == TRACEPARENT_HEADER {
            validate_traceparent(&value)?;
        }
        carrier.insert(key, value);
    }
    Ok(carrier)
}

/// Checks the W3C `version-traceid-parentid-flags` layout.
pub fn validate_traceparent(value: &str) -> Result<(), TracesError> {
    let malformed = || TracesError::MalformedTraceParent(value.to_string());

    let parts: Vec<&str> = value.trim().split('-').collect();
    if parts.len() < 4 {
        return Err(malformed());
    }
    let (version, trace_id, parent_id, flags) = (parts[0], parts[1], parts[2], parts[3]);

    if !is_lower_hex(version, 2) || version == "ff" {
        return Err(malformed());
    }
    // Version 00 defines exactly four fields.
    if version == "00" && parts.len() != 4 {
        return Err(malformed());
    }
    if !is_lower_hex(trace_id, 32) || is_all_zero(trace_id) {
        return Err(malformed());
    }
    if !is_lower_hex(parent_id, 16) || is_all_zero(parent_id) {
        return Err(malformed());
    }
    if !is_lower_hex(flags, 2) {
        return Err(malformed());
    }
    Ok(())
}

fn is_lower_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn is_all_zero(s: &str) -> bool {
    s.bytes().all(|b| b == b'0')
}

/// Span handle over a `tracing::Span`. Ending drops the handle,
/// which closes the span once the handler's clone is gone too.
#[derive(Debug)]
pub struct OtelSpan {
    inner: Option<tracing::Span>,
}

impl Span for OtelSpan {
    fn tag(&mut self, tag: Tag, value: &str) {
        if let Some(span) = &self.inner {
            span.record(tag.key(), value);
        }
    }

    fn error(&mut self, message: &str) {
        if let Some(span) = &self.inner {
            span.record("error", true);
            span.record("error.message", message);
            span.record("otel.status_code", STATUS_ERROR);
            tracing::error!(parent: span, error = %message, "request failed");
        }
    }

    fn end(&mut self) {
        self.inner.take();
    }

    fn is_ended(&self) -> bool {
        self.inner.is_none()
    }

    fn tracing_span(&self) -> Option<tracing::Span> {
        self.inner.clone()
    }
}
