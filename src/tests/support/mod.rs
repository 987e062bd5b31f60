// Shared test support code.

pub mod capture;
pub mod harness;
pub mod lock;
pub mod recorder;

pub use capture::{CapturedEvent, CapturedSpan, FieldCapture};
pub use harness::{body_string, get, get_with_headers, test_router, test_router_with_rules};
pub use lock::with_global_lock;
pub use recorder::{RecordingTracer, SpanRecord};
