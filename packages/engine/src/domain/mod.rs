//! Domain layer: pure game logic types plus the `Game` facade.

pub mod cards;
pub mod cards_parsing;
pub mod cards_serde;
pub mod dealing;
pub mod game;
pub mod hands;
pub mod hints;
pub mod legality;
pub mod roles;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod turns;
pub mod win;

#[cfg(test)]
mod tests_game;

// Re-exports for ergonomics
pub use cards::{Card, Rank, Suit};
pub use game::{Game, Hint, PassOutcome, PlayOutcome};
pub use hands::{classify, compare_dominance, HandCategory, HandClass, RankedHand};
pub use legality::check_valid_play;
pub use roles::{GameMode, Role};
pub use scoring::{FinalScore, ScoreResult};
pub use snapshot::{GameView, LastHandView, PlayerView};
pub use state::{GameState, Player, PlayerId};
pub use win::GameOutcome;
