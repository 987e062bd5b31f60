//! Tracer that records every span operation for assertions.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::traces::{
    validate_traceparent, HeaderReader, Span, SpanOptions, Tag, Tracer, TracesError,
    TRACEPARENT_HEADER,
};

/// Everything that happened to one span.
#[derive(Debug, Clone, Default)]
pub struct SpanRecord {
    pub operation_name: String,
    pub options: SpanOptions,
    pub traceparent: Option<String>,
    pub tags: Vec<(Tag, String)>,
    pub errors: Vec<String>,
    pub end_calls: usize,
}

impl SpanRecord {
    /// Last value set for `tag`, looking at creation options too.
    pub fn tag(&self, tag: Tag) -> Option<&str> {
        self.options
            .tags
            .iter()
            .chain(self.tags.iter())
            .rev()
            .find(|(t, _)| *t == tag)
            .map(|(_, v)| v.as_str())
    }
}

/// Reads and validates `traceparent` like a real propagator would,
/// then records the span instead of exporting it.
#[derive(Debug, Clone, Default)]
pub struct RecordingTracer {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
}

impl RecordingTracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spans(&self) -> Vec<SpanRecord> {
        self.spans.lock().clone()
    }

    pub fn only_span(&self) -> SpanRecord {
        let spans = self.spans();
        assert_eq!(spans.len(), 1, "expected exactly one span, got {:?}", spans);
        spans.into_iter().next().unwrap()
    }
}

impl Tracer for RecordingTracer {
    fn create_entry_span(
        &self,
        operation_name: &str,
        header_reader: HeaderReader<'_>,
        opts: SpanOptions,
    ) -> Result<Box<dyn Span>, TracesError> {
        let traceparent = header_reader(TRACEPARENT_HEADER)?;
        if let Some(value) = &traceparent {
            validate_traceparent(value)?;
        }

        let mut spans = self.spans.lock();
        spans.push(SpanRecord {
            operation_name: operation_name.to_string(),
            options: opts,
            traceparent,
            ..SpanRecord::default()
        });

        Ok(Box::new(RecordingSpan {
            index: spans.len() - 1,
            spans: self.spans.clone(),
        }))
    }
}

/// Deliberately not idempotent: every `end` call is counted so tests can
/// prove the interceptor ends each span exactly once.
struct RecordingSpan {
    index: usize,
    spans: Arc<Mutex<Vec<SpanRecord>>>,
}

impl RecordingSpan {
    fn with<F: FnOnce(&mut SpanRecord)>(&self, f: F) {
        f(&mut self.spans.lock()[self.index]);
    }
}

impl Span for RecordingSpan {
    fn tag(&mut self, tag: Tag, value: &str) {
        self.with(|r| r.tags.push((tag, value.to_string())));
    }

    fn error(&mut self, message: &str) {
        self.with(|r| r.errors.push(message.to_string()));
    }

    fn end(&mut self) {
        self.with(|r| r.end_calls += 1);
    }

    fn is_ended(&self) -> bool {
        self.spans.lock()[self.index].end_calls > 0
    }
}
