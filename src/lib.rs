#[cfg(test)]
mod tests;

#[cfg(test)]
pub use tests::support;

pub mod app;
pub mod config;
pub mod controller;
pub mod http;
pub mod interceptor;
pub mod logger;
pub mod matcher;
pub mod middleware;
pub mod shutdown;
pub mod telemetry;
pub mod traces;
