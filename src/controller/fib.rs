//! Fibonacci route.

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::http::Controller;
use crate::middleware::HandlerErrors;

/// Largest index whose value fits in a u64.
pub const MAX_FIB_INDEX: u32 = 93;

#[derive(Debug, Serialize)]
struct FibResponse {
    n: u32,
    value: u64,
}

/// Computes the n-th Fibonacci number, `None` on overflow.
pub fn fib(n: u32) -> Option<u64> {
    if n == 0 {
        return Some(0);
    }
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 1..n {
        let next = a.checked_add(b)?;
        a = b;
        b = next;
    }
    Some(b)
}

/// FibController serves `/fib/:n`.
pub struct FibController;

impl FibController {
    pub fn new() -> Self {
        Self
    }

    async fn get(Path(raw): Path<String>) -> Response {
        let n: u32 = match raw.parse() {
            Ok(n) => n,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    HandlerErrors::single(format!("invalid fib index {:?}: {}", raw, e)),
                    "invalid index",
                )
                    .into_response();
            }
        };

        match fib(n) {
            Some(value) => (
                StatusCode::OK,
                [("content-type", "application/json")],
                serde_json::to_string(&FibResponse { n, value }).unwrap_or_default(),
            )
                .into_response(),
            None => (
                StatusCode::UNPROCESSABLE_ENTITY,
                HandlerErrors::single(format!(
                    "fib index {} overflows u64 (max {})",
                    n, MAX_FIB_INDEX
                )),
                "index too large",
            )
                .into_response(),
        }
    }
}

impl Default for FibController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for FibController {
    fn add_route(&self, router: Router) -> Router {
        router.route("/fib/:n", get(Self::get))
    }
}
