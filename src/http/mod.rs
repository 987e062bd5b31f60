// HTTP module: server and the controller/middleware interfaces it composes.

pub mod server;

pub use crate::middleware::middleware::Middleware;

// Re-export server types
pub use server::{HttpServer, Server};

// Common controller interface
pub use crate::controller::controller::Controller;
