//! End-to-end tests for the trace middleware.
//!
//! Requests run in-process through the full layered router; spans are
//! observed through a recording tracer instead of an exporter.

mod cases_ignore_test;

pub mod support;
