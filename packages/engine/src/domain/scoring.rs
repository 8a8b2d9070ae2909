//! Terminal-result scoring: outcome label to per-player deltas.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::roles::{GameMode, Role};
use crate::domain::state::{Player, PlayerId};
use crate::domain::win::GameOutcome;

/// Per-player cumulative score after a terminal result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalScore {
    pub id: PlayerId,
    pub name: String,
    pub score: i32,
    pub role: Option<Role>,
}

/// Broadcast-ready terminal score result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub outcome: GameOutcome,
    pub score_changes: BTreeMap<PlayerId, i32>,
    pub final_scores: Vec<FinalScore>,
}

/// Score deltas as (landlord-side, farmer) for a mode/outcome pairing. The
/// landlord-side delta applies to D in standard mode and DD in
/// double-landlord mode. Unmatched pairings score as a wash.
pub fn outcome_deltas(mode: GameMode, outcome: GameOutcome) -> (i32, i32) {
    match (mode, outcome) {
        (GameMode::Standard, GameOutcome::Draw) => (0, 0),
        (GameMode::Standard, GameOutcome::LandlordWin) => (1, -1),
        (GameMode::Standard, GameOutcome::FarmerWin) => (-1, 1),
        (GameMode::Standard, GameOutcome::LandlordGrandWin) => (2, -2),
        (GameMode::Standard, GameOutcome::FarmerGrandWin) => (-2, 2),
        (GameMode::DoubleLandlord, GameOutcome::DoubleLandlordGrandWin) => (6, -2),
        (GameMode::DoubleLandlord, GameOutcome::DoubleLandlordWin) => (3, -1),
        (GameMode::DoubleLandlord, GameOutcome::FarmerWin) => (-3, 1),
        (GameMode::DoubleLandlord, GameOutcome::FarmerGrandWin) => (-6, 2),
        _ => (0, 0),
    }
}

/// Apply the outcome to every player's cumulative score and assemble the
/// result. A player with no assigned role (force-ended before a successful
/// start) scores zero.
pub fn apply_outcome(
    players: &mut [Player],
    mode: GameMode,
    outcome: GameOutcome,
) -> ScoreResult {
    let (landlord_side, farmer) = outcome_deltas(mode, outcome);
    let mut score_changes = BTreeMap::new();
    for player in players.iter_mut() {
        let delta = match player.role {
            Some(Role::Landlord) | Some(Role::DoubleLandlord) => landlord_side,
            Some(Role::Farmer) => farmer,
            None => 0,
        };
        player.score += delta;
        score_changes.insert(player.id, delta);
    }
    ScoreResult {
        outcome,
        score_changes,
        final_scores: players
            .iter()
            .map(|p| FinalScore {
                id: p.id,
                name: p.name.clone(),
                score: p.score,
                role: p.role,
            })
            .collect(),
    }
}
