//! Per-request call context shared by the before and after hooks.

use std::fmt;

use crate::traces::Span;

/// What the before-hook decided for this request.
#[derive(Default)]
pub enum SpanState {
    /// Before-hook has not run.
    #[default]
    Idle,
    /// URL matched an ignore rule; no span exists.
    Skipped,
    /// Span creation failed; no span exists.
    Failed,
    /// Span is open and owned by this invocation.
    Active(Box<dyn Span>),
    /// Span was ended by the after-hook.
    Closed,
}

impl SpanState {
    pub fn is_active(&self) -> bool {
        matches!(self, SpanState::Active(_))
    }

    pub fn span(&self) -> Option<&dyn Span> {
        match self {
            SpanState::Active(span) => Some(span.as_ref()),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpanState::Idle => "idle",
            SpanState::Skipped => "skipped",
            SpanState::Failed => "failed",
            SpanState::Active(_) => "active",
            SpanState::Closed => "closed",
        }
    }
}

impl fmt::Debug for SpanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One request's invocation: the request capability plus the span slot.
#[derive(Debug)]
pub struct Invocation<R> {
    request: R,
    context: SpanState,
}

impl<R> Invocation<R> {
    pub fn new(request: R) -> Self {
        Self {
            request,
            context: SpanState::Idle,
        }
    }

    pub fn request(&self) -> &R {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut R {
        &mut self.request
    }

    pub fn context(&self) -> &SpanState {
        &self.context
    }

    pub fn set_context(&mut self, state: SpanState) {
        self.context = state;
    }

    /// Moves the state out, leaving `replacement` behind.
    pub fn replace_context(&mut self, replacement: SpanState) -> SpanState {
        std::mem::replace(&mut self.context, replacement)
    }
}
