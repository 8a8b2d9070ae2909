//! Win-condition evaluation over the role sequence of finished players.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::roles::{GameMode, Role};

/// Terminal result labels, per mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    LandlordGrandWin,
    FarmerGrandWin,
    LandlordWin,
    FarmerWin,
    Draw,
    DoubleLandlordGrandWin,
    DoubleLandlordWin,
}

impl GameOutcome {
    pub fn label(self) -> &'static str {
        match self {
            GameOutcome::LandlordGrandWin => "landlord_grand_win",
            GameOutcome::FarmerGrandWin => "farmer_grand_win",
            GameOutcome::LandlordWin => "landlord_win",
            GameOutcome::FarmerWin => "farmer_win",
            GameOutcome::Draw => "draw",
            GameOutcome::DoubleLandlordGrandWin => "double_landlord_grand_win",
            GameOutcome::DoubleLandlordWin => "double_landlord_win",
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Evaluate the finish-role sequence. A `Some` result ends the game
/// immediately, even before all four players have emptied their hands.
pub fn evaluate(mode: GameMode, finish_roles: &[Role]) -> Option<GameOutcome> {
    use Role::{DoubleLandlord as DD, Farmer as F, Landlord as D};

    match mode {
        GameMode::Standard => {
            if finish_roles.len() >= 2 {
                match (finish_roles[0], finish_roles[1]) {
                    (D, D) => return Some(GameOutcome::LandlordGrandWin),
                    (F, F) => return Some(GameOutcome::FarmerGrandWin),
                    _ => {}
                }
            }
            if finish_roles.len() >= 3 {
                match (finish_roles[0], finish_roles[1], finish_roles[2]) {
                    (D, F, D) => return Some(GameOutcome::LandlordWin),
                    (F, D, F) => return Some(GameOutcome::FarmerWin),
                    (D, F, F) | (F, D, D) => return Some(GameOutcome::Draw),
                    _ => {}
                }
            }
            // Under a 2D/2F split every 3-prefix matches above; the 4-length
            // arm mirrors the full rule table for completeness.
            if finish_roles.len() == 4 {
                match (finish_roles[0], finish_roles[1], finish_roles[2], finish_roles[3]) {
                    (D, F, D, F) => return Some(GameOutcome::LandlordWin),
                    (F, D, F, D) => return Some(GameOutcome::FarmerWin),
                    (D, F, F, D) | (F, D, D, F) => return Some(GameOutcome::Draw),
                    _ => {}
                }
            }
            None
        }
        GameMode::DoubleLandlord => {
            match finish_roles {
                [DD, ..] => Some(GameOutcome::DoubleLandlordGrandWin),
                [F, F, F, ..] => Some(GameOutcome::FarmerGrandWin),
                [F, DD, ..] => Some(GameOutcome::DoubleLandlordWin),
                [F, F, DD, ..] => Some(GameOutcome::FarmerWin),
                _ => None,
            }
        }
    }
}
