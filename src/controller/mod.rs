// HTTP controllers: demo routes plus admin endpoints.

pub mod boom;
pub mod controller;
pub mod fib;
pub mod greeting;
pub mod metrics;
pub mod probe;
pub mod traces;

#[cfg(test)]
mod fib_test;

// Re-export controller types for convenience
pub use boom::BoomController;
pub use fib::FibController;
pub use greeting::GreetingController;
pub use metrics::PrometheusMetricsController;
pub use probe::LivenessProbeController;
pub use traces::TracesController;
