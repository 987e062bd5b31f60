//! Entry-span tracing middleware.
//

use axum::{extract::Request, middleware::Next, response::Response};
use std::sync::Arc;
use tracing::{warn, Instrument};

use super::handler_errors::HandlerErrors;
use crate::interceptor::{HttpExchange, HttpInterceptor, Interceptor, Invocation, RequestInfo};

/// TraceMiddleware drives the [`HttpInterceptor`] around every request.
#[derive(Clone)]
pub struct TraceMiddleware {
    interceptor: Arc<HttpInterceptor>,
}

impl TraceMiddleware {
    /// Creates a new trace middleware.
    pub fn new(interceptor: Arc<HttpInterceptor>) -> Self {
        Self { interceptor }
    }

    /// Middleware function: before-hook, handler, after-hook.
    pub async fn middleware(&self, request: Request, next: Next) -> Response {
        let mut invocation = Invocation::new(HttpExchange::from_request(&request));

        // Tracing must never block the request.
        if let Err(e) = self.interceptor.before_invoke(&mut invocation) {
            warn!(
                component = "trace_middleware",
                event = "before_invoke_failed",
                method = invocation.request().method(),
                url = invocation.request().request_uri(),
                error = %e,
                "entry span not created, request continues untraced"
            );
        }

        let parent = invocation
            .context()
            .span()
            .and_then(|span| span.tracing_span());

        let mut response = match parent {
            Some(span) => next.run(request).instrument(span).await,
            None => next.run(request).await,
        };

        let errors = response
            .extensions_mut()
            .remove::<HandlerErrors>()
            .map(HandlerErrors::into_inner)
            .unwrap_or_default();
        invocation
            .request_mut()
            .complete(response.status().as_u16(), errors);

        if let Err(e) = self.interceptor.after_invoke(&mut invocation) {
            warn!(
                component = "trace_middleware",
                event = "after_invoke_failed",
                url = invocation.request().request_uri(),
                error = %e,
                "failed to close entry span"
            );
        }

        response
    }
}

// Implementation of Middleware trait
impl crate::middleware::middleware::Middleware for TraceMiddleware {
    fn apply(&self, router: axum::Router) -> axum::Router {
        let this = self.clone();
        router.layer(axum::middleware::from_fn(
            move |request: Request, next: Next| {
                let this = this.clone();
                async move { this.middleware(request, next).await }
            },
        ))
    }
}
