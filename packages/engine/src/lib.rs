#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod domain;
pub mod errors;

// Re-exports for public API
pub use domain::cards::{Card, Rank, Suit};
pub use domain::game::{Game, Hint, PassOutcome, PlayOutcome};
pub use domain::hands::{classify, HandCategory, HandClass, RankedHand};
pub use domain::roles::{GameMode, Role};
pub use domain::scoring::{FinalScore, ScoreResult};
pub use domain::snapshot::{GameView, LastHandView, PlayerView};
pub use domain::state::{Player, PlayerId};
pub use domain::win::GameOutcome;
pub use errors::{EngineError, RuleViolationKind, SetupIssueKind};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_support::logging::init();
}
