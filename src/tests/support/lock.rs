//! Global test lock for serializing tests that flip the tracing switch.

use std::sync::OnceLock;
use tokio::sync::Mutex;

static GLOBAL_TEST_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Executes a test function while holding a global lock.
///
/// Tests touching `traces::enable_tracing` / `disable_tracing` must run
/// through this so they don't observe each other's state.
pub async fn with_global_lock<F, Fut, T>(f: F) -> T
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = T>,
{
    let lock = GLOBAL_TEST_LOCK.get_or_init(|| Mutex::new(()));
    let _guard = lock.lock().await;
    f().await
}
