//! Unified test logging initialization.
//!
//! One init function shared by unit and integration tests across the
//! workspace, so log capture behaves the same everywhere.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize structured logging for tests.
///
/// Idempotent and race-safe; calling it from every test is fine. The level
/// is taken from `TEST_LOG`, then `RUST_LOG`, then defaults to `"warn"`.
/// Output goes through `with_test_writer()` so cargo/nextest capture works,
/// and timestamps are stripped for stable output.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
