//! Quiet, capture-friendly tracing for tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Filter directive: `TEST_LOG`, then `RUST_LOG`, then `warn`.
pub fn filter_directive() -> String {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string())
}

/// Install the test subscriber once per process. Safe to call repeatedly.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        fmt()
            .with_env_filter(EnvFilter::new(filter_directive()))
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
