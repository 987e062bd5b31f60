// HTTP middlewares.

pub mod handler_errors;
pub mod middleware;
pub mod trace_middleware;

pub use handler_errors::HandlerErrors;
pub use middleware::Middleware;
pub use trace_middleware::TraceMiddleware;
