//! HTTP entry-span interceptor.

use std::sync::Arc;

use tracing::{debug, warn};

use super::invocation::{Invocation, SpanState};
use super::request::{format_errors, RequestInfo};
use crate::matcher::IgnoreRules;
use crate::telemetry;
use crate::traces::{
    SpanLayer, SpanOptions, Tag, Tracer, TracesError, COMPONENT_HTTP_SERVER,
};

/// Lifecycle hooks the host framework calls around each request.
pub trait Interceptor<R: RequestInfo>: Send + Sync {
    /// Runs before the handler. An error means no span was opened; the
    /// request itself may still proceed.
    fn before_invoke(&self, invocation: &mut Invocation<R>) -> Result<(), TracesError>;

    /// Runs after the handler. Never fails in practice.
    fn after_invoke(&self, invocation: &mut Invocation<R>) -> Result<(), TracesError>;
}

/// HttpInterceptor opens one entry span per non-ignored request.
#[derive(Clone)]
pub struct HttpInterceptor {
    tracer: Arc<dyn Tracer>,
    rules: Arc<IgnoreRules>,
}

impl HttpInterceptor {
    pub fn new(tracer: Arc<dyn Tracer>, rules: Arc<IgnoreRules>) -> Self {
        Self { tracer, rules }
    }

    /// Span name: `<METHOD>:<path>`.
    pub fn operation_name<R: RequestInfo>(request: &R) -> String {
        format!("{}:{}", request.method(), request.path())
    }
}

impl<R: RequestInfo> Interceptor<R> for HttpInterceptor {
    fn before_invoke(&self, invocation: &mut Invocation<R>) -> Result<(), TracesError> {
        let request = invocation.request();

        if self.rules.matches(request.request_uri()) {
            debug!(
                component = "interceptor",
                event = "trace_ignored",
                url = request.request_uri(),
                "request matched ignore rule, span skipped"
            );
            telemetry::inc_spans_skipped();
            invocation.set_context(SpanState::Skipped);
            return Ok(());
        }

        let operation_name = Self::operation_name(request);
        let opts = SpanOptions::new()
            .with_layer(SpanLayer::Http)
            .with_tag(Tag::HttpMethod, request.method())
            .with_tag(Tag::Url, format!("{}{}", request.host(), request.path()))
            .with_component(COMPONENT_HTTP_SERVER);

        let reader = |key: &str| request.header(key);
        let created = self.tracer.create_entry_span(&operation_name, &reader, opts);

        match created {
            Ok(span) => {
                telemetry::inc_spans_started();
                invocation.set_context(SpanState::Active(span));
                Ok(())
            }
            Err(err) => {
                telemetry::inc_spans_failed();
                invocation.set_context(SpanState::Failed);
                Err(err)
            }
        }
    }

    fn after_invoke(&self, invocation: &mut Invocation<R>) -> Result<(), TracesError> {
        let mut span = match invocation.replace_context(SpanState::Closed) {
            SpanState::Active(span) => span,
            SpanState::Idle => {
                debug!(
                    component = "interceptor",
                    event = "after_without_before",
                    url = invocation.request().request_uri(),
                    "after hook ran without a before hook, nothing to close"
                );
                invocation.set_context(SpanState::Idle);
                return Ok(());
            }
            // Skipped and Failed stay as they were; Closed is already terminal.
            other => {
                invocation.set_context(other);
                return Ok(());
            }
        };

        let request = invocation.request();
        match request.status_code() {
            Some(status) => span.tag(Tag::StatusCode, &status.to_string()),
            None => warn!(
                component = "interceptor",
                event = "status_missing",
                url = request.request_uri(),
                "response status unknown when closing span"
            ),
        }

        if !request.errors().is_empty() {
            span.error(&format_errors(request.errors()));
        }

        span.end();
        telemetry::inc_spans_ended();
        Ok(())
    }
}
