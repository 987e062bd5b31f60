//! Request capability exposed to the interceptor.

use axum::http::{header, HeaderMap, Request};

use crate::traces::TracesError;

/// The narrow view of a request/response exchange the interceptor needs.
/// Host framework adapters implement it.
pub trait RequestInfo: Send {
    fn method(&self) -> &str;

    /// Path without the query string.
    fn path(&self) -> &str;

    /// Path and query as received; ignore rules match against it.
    fn request_uri(&self) -> &str;

    fn host(&self) -> &str;

    /// Looks a header up by name. `Ok(None)` if absent.
    fn header(&self, key: &str) -> Result<Option<String>, TracesError>;

    /// Response status, known only after the handler ran.
    fn status_code(&self) -> Option<u16>;

    /// Errors the handler reported while serving the request.
    fn errors(&self) -> &[String];
}

/// Formats handler errors into one message, one numbered line per error.
pub fn format_errors(errors: &[String]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("Error #{:02}: {}", i + 1, err))
        .collect::<Vec<_>>()
        .join("\n")
}

/// axum adapter: request data captured up front, response data filled in
/// by [`HttpExchange::complete`] once the handler returns.
#[derive(Debug, Clone)]
pub struct HttpExchange {
    method: String,
    path: String,
    request_uri: String,
    host: String,
    headers: HeaderMap,
    status: Option<u16>,
    errors: Vec<String>,
}

impl HttpExchange {
    pub fn from_request<B>(request: &Request<B>) -> Self {
        let uri = request.uri();
        let request_uri = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string());

        // Host header wins; absolute-form URIs carry the authority instead.
        let host = request
            .headers()
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
            .or_else(|| uri.authority().map(|a| a.as_str().to_string()))
            .unwrap_or_default();

        Self {
            method: request.method().as_str().to_string(),
            path: uri.path().to_string(),
            request_uri,
            host,
            headers: request.headers().clone(),
            status: None,
            errors: Vec::new(),
        }
    }

    /// Records the handler's outcome.
    pub fn complete(&mut self, status: u16, errors: Vec<String>) {
        self.status = Some(status);
        self.errors = errors;
    }
}

impl RequestInfo for HttpExchange {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn request_uri(&self) -> &str {
        &self.request_uri
    }

    fn host(&self) -> &str {
        &self.host
    }

    fn header(&self, key: &str) -> Result<Option<String>, TracesError> {
        match self.headers.get(key) {
            None => Ok(None),
            Some(value) => value
                .to_str()
                .map(|v| Some(v.to_string()))
                .map_err(|e| TracesError::HeaderRead {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
        }
    }

    fn status_code(&self) -> Option<u16> {
        self.status
    }

    fn errors(&self) -> &[String] {
        &self.errors
    }
}
