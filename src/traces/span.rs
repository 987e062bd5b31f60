//! Span abstraction the interceptor talks to.
//!
//! The interceptor never touches `tracing` or OpenTelemetry directly; it
//! asks a [`Tracer`] for an entry span and drives the returned [`Span`].

use std::fmt;

use super::error::TracesError;

/// Component id identifying this HTTP integration among known components.
pub const COMPONENT_HTTP_SERVER: u16 = 5006;

/// Reads one request header for context propagation.
/// `Ok(None)` means the header is absent.
pub type HeaderReader<'a> = &'a (dyn Fn(&str) -> Result<Option<String>, TracesError> + 'a);

/// Well-known span tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    HttpMethod,
    Url,
    StatusCode,
}

impl Tag {
    /// Attribute key recorded on the span.
    pub const fn key(self) -> &'static str {
        match self {
            Tag::HttpMethod => "http.method",
            Tag::Url => "url",
            Tag::StatusCode => "status_code",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Logical layer a span belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpanLayer {
    #[default]
    Unknown,
    Database,
    RpcFramework,
    Http,
    Mq,
    Cache,
}

impl SpanLayer {
    pub const fn as_str(self) -> &'static str {
        match self {
            SpanLayer::Unknown => "unknown",
            SpanLayer::Database => "database",
            SpanLayer::RpcFramework => "rpc_framework",
            SpanLayer::Http => "http",
            SpanLayer::Mq => "mq",
            SpanLayer::Cache => "cache",
        }
    }
}

/// Options applied when a span is created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanOptions {
    pub layer: SpanLayer,
    pub tags: Vec<(Tag, String)>,
    pub component: u16,
}

impl SpanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, layer: SpanLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_tag(mut self, tag: Tag, value: impl Into<String>) -> Self {
        self.tags.push((tag, value.into()));
        self
    }

    pub fn with_component(mut self, component: u16) -> Self {
        self.component = component;
        self
    }
}

/// An open span. Owned by exactly one request.
pub trait Span: Send {
    /// Sets a tag on the span.
    fn tag(&mut self, tag: Tag, value: &str);

    /// Marks the span as failed with the given message.
    fn error(&mut self, message: &str);

    /// Closes the span. Calling it again is a no-op.
    fn end(&mut self);

    fn is_ended(&self) -> bool;

    /// The `tracing` span backing this span, if any, so handler work
    /// can be instrumented as its child.
    fn tracing_span(&self) -> Option<tracing::Span> {
        None
    }
}

/// Creates spans. Shared between all requests.
pub trait Tracer: Send + Sync {
    /// Creates a server-side entry span, extracting any propagated remote
    /// parent through `header_reader`.
    fn create_entry_span(
        &self,
        operation_name: &str,
        header_reader: HeaderReader<'_>,
        opts: SpanOptions,
    ) -> Result<Box<dyn Span>, TracesError>;
}

/// Span returned while tracing is switched off.
#[derive(Debug, Default)]
pub struct NoopSpan {
    ended: bool,
}

impl Span for NoopSpan {
    fn tag(&mut self, _tag: Tag, _value: &str) {}

    fn error(&mut self, _message: &str) {}

    fn end(&mut self) {
        self.ended = true;
    }

    fn is_ended(&self) -> bool {
        self.ended
    }
}
