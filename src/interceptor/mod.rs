//! Request lifecycle interceptor: opens an entry span before the handler
//! runs and closes it afterwards.

pub mod interceptor;
pub mod invocation;
pub mod request;


pub use interceptor::{HttpInterceptor, Interceptor};
pub use invocation::{Invocation, SpanState};
pub use request::{format_errors, HttpExchange, RequestInfo};
