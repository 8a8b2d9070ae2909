//! Role assignment and game-mode selection from the initial deal.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::cards::Card;
use crate::domain::state::Player;
use crate::errors::{EngineError, SetupIssueKind};

/// Player role for one played game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Role {
    Landlord,
    Farmer,
    DoubleLandlord,
}

impl Role {
    /// Compact wire code: "D" / "F" / "DD".
    pub fn code(self) -> &'static str {
        match self {
            Role::Landlord => "D",
            Role::Farmer => "F",
            Role::DoubleLandlord => "DD",
        }
    }
}

impl Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "D" => Ok(Role::Landlord),
            "F" => Ok(Role::Farmer),
            "DD" => Ok(Role::DoubleLandlord),
            _ => Err(serde::de::Error::custom(format!("Invalid role: {s}"))),
        }
    }
}

/// Scoring mode, fixed for the life of one played game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Standard,
    DoubleLandlord,
}

/// Index of the hand holding `card`, if any.
pub fn locate_holder(hands: &[Vec<Card>], card: Card) -> Option<usize> {
    hands.iter().position(|hand| hand.contains(&card))
}

/// Locate both role-determining cards in the dealt hands. A missing card is
/// a corrupt deal and must abort the start.
pub fn locate_role_cards(hands: &[Vec<Card>]) -> Result<(usize, usize), EngineError> {
    let s3 = locate_holder(hands, Card::SPADE_THREE).ok_or_else(|| {
        EngineError::setup(SetupIssueKind::MissingRoleCard, "Spade-3 missing from deal")
    })?;
    let sa = locate_holder(hands, Card::SPADE_ACE).ok_or_else(|| {
        EngineError::setup(SetupIssueKind::MissingRoleCard, "Spade-A missing from deal")
    })?;
    Ok((s3, sa))
}

/// Assign roles given the Spade-3 and Spade-A holder indices and return the
/// selected mode. One player holding both plays alone as double-landlord.
pub fn assign_roles(players: &mut [Player], s3: usize, sa: usize) -> GameMode {
    if s3 == sa {
        for (idx, player) in players.iter_mut().enumerate() {
            player.role = Some(if idx == s3 {
                Role::DoubleLandlord
            } else {
                Role::Farmer
            });
        }
        GameMode::DoubleLandlord
    } else {
        for (idx, player) in players.iter_mut().enumerate() {
            player.role = Some(if idx == s3 || idx == sa {
                Role::Landlord
            } else {
                Role::Farmer
            });
        }
        GameMode::Standard
    }
}
