//! Turn rotation and pass-round bookkeeping over the game state.

use crate::domain::state::{GameState, Player};
use crate::errors::EngineError;

/// A player who can still act: connected and not finished.
#[inline]
pub fn is_eligible(player: &Player) -> bool {
    player.connected && !player.finished
}

/// Connected, unfinished player count.
pub fn active_player_count(players: &[Player]) -> usize {
    players.iter().filter(|p| is_eligible(p)).count()
}

/// Next eligible seat counter-clockwise from `from` (decreasing slot index
/// with wraparound, skipping finished or disconnected players).
///
/// Two full rotations without an eligible player is a structural fault; the
/// caller force-ends the game when this errors.
pub fn next_eligible_index(players: &[Player], from: usize) -> Result<usize, EngineError> {
    let n = players.len();
    if n == 0 {
        return Err(EngineError::fatal("No players seated"));
    }
    let mut idx = from;
    for _ in 0..n * 2 {
        idx = (idx + n - 1) % n;
        if is_eligible(&players[idx]) {
            return Ok(idx);
        }
    }
    Err(EngineError::fatal(
        "No eligible player found within two full rotations",
    ))
}

/// True once every other active player has passed on the table hand. The
/// leader may have finished and still hold the table, so the threshold is
/// based on the current active count.
pub fn all_others_passed(state: &GameState) -> bool {
    let active = active_player_count(&state.players);
    state.last_player_who_played.is_some()
        && state.consecutive_passes as usize >= active.saturating_sub(1)
}

/// Clear the table for a new round.
pub fn reset_pile(state: &mut GameState) {
    state.center_pile.clear();
    state.last_hand = None;
    state.consecutive_passes = 0;
}
