//! Test support utilities shared by the workspace test suites.
//!
//! Provides unique test-data generation (ULID-backed, so parallel test runs
//! never collide) and the common tracing bootstrap for tests.

pub mod logging;

use ulid::Ulid;

/// Generate a unique string with the given prefix.
///
/// # Examples
/// ```
/// use test_support::unique_str;
///
/// let a = unique_str("player");
/// let b = unique_str("player");
/// assert_ne!(a, b);
/// assert!(a.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}
