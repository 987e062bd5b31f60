//! Span lifecycle counters (Prometheus compatible).

use metrics::{counter, describe_counter};

pub const SPANS_STARTED: &str = "tracehook_spans_started_total";
pub const SPANS_ENDED: &str = "tracehook_spans_ended_total";
pub const SPANS_SKIPPED: &str = "tracehook_spans_skipped_total";
pub const SPANS_FAILED: &str = "tracehook_spans_failed_total";

/// Registers metric descriptions. Call once after the recorder is installed.
pub fn describe() {
    describe_counter!(SPANS_STARTED, "Entry spans opened");
    describe_counter!(SPANS_ENDED, "Entry spans closed");
    describe_counter!(SPANS_SKIPPED, "Requests skipped by an ignore rule");
    describe_counter!(SPANS_FAILED, "Entry spans that could not be created");
}

pub fn inc_spans_started() {
    counter!(SPANS_STARTED).increment(1);
}

pub fn inc_spans_ended() {
    counter!(SPANS_ENDED).increment(1);
}

pub fn inc_spans_skipped() {
    counter!(SPANS_SKIPPED).increment(1);
}

pub fn inc_spans_failed() {
    counter!(SPANS_FAILED).increment(1);
}
