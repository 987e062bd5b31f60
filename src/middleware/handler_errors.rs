//! Handler-reported errors carried on the response.

use axum::response::{IntoResponseParts, ResponseParts};
use std::convert::Infallible;

/// Errors a handler wants recorded on the request's span.
///
/// Return it as part of a response; the trace middleware takes it out of
/// the response extensions before the response leaves the service.
///
/// ```rust
/// # use axum::http::StatusCode;
/// # use tracehook::middleware::HandlerErrors;
/// async fn handler() -> (StatusCode, HandlerErrors, &'static str) {
///     (StatusCode::BAD_GATEWAY, HandlerErrors::single("upstream down"), "")
/// }
/// # let _ = handler;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerErrors(Vec<String>);

impl HandlerErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl IntoResponseParts for HandlerErrors {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        // Merge with errors an inner layer may already have attached.
        match res.extensions_mut().get_mut::<HandlerErrors>() {
            Some(existing) => existing.0.extend(self.0),
            None => {
                res.extensions_mut().insert(self);
            }
        }
        Ok(res)
    }
}
