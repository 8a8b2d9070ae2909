//! Mutable game aggregate: players and per-game table state.

use crate::domain::cards::Card;
use crate::domain::hands::RankedHand;
use crate::domain::roles::{GameMode, Role};
use crate::errors::EngineError;

pub type PlayerId = i64;

/// One seated player. Created by the room layer before the game starts;
/// the engine only marks state mid-game, never removes the record.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Fixed 0-based seat used for rotation.
    pub slot: u8,
    /// Kept sorted ascending by rank then suit for presentation.
    pub hand: Vec<Card>,
    /// Cumulative score, carried across games in the same room.
    pub score: i32,
    pub connected: bool,
    pub finished: bool,
    pub role: Option<Role>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, slot: u8) -> Self {
        Self {
            id,
            name: name.into(),
            slot,
            hand: Vec::new(),
            score: 0,
            connected: true,
            finished: false,
            role: None,
        }
    }
}

/// The aggregate table state, exclusively owned by one `Game` facade.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    /// Seated players, kept ordered by slot.
    pub players: Vec<Player>,
    /// Cards not yet dealt (empty after a full deal).
    pub deck: Vec<Card>,
    /// Cards currently on the table to beat.
    pub center_pile: Vec<Card>,
    /// Classification of the center pile; None means the table is clear.
    pub last_hand: Option<RankedHand>,
    /// Index into `players` of whoever acts next.
    pub current_player: Option<usize>,
    pub first_turn: bool,
    pub started: bool,
    pub finished: bool,
    /// First player to empty their hand.
    pub winner: Option<PlayerId>,
    /// Fixed once `start_game` succeeds.
    pub mode: Option<GameMode>,
    /// Append-only ids in finishing order.
    pub finish_order: Vec<PlayerId>,
    pub consecutive_passes: u32,
    pub last_player_who_played: Option<PlayerId>,
}

impl GameState {
    pub fn player_index(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Roles of finishers in finishing order. Every finisher has a role in
    /// any started game.
    pub fn finish_roles(&self) -> Vec<Role> {
        self.finish_order
            .iter()
            .filter_map(|id| self.player(*id).and_then(|p| p.role))
            .collect()
    }

    pub fn require_current(&self, ctx: &'static str) -> Result<usize, EngineError> {
        self.current_player.ok_or_else(|| {
            EngineError::fatal(format!("Invariant violated: current player must be set ({ctx})"))
        })
    }
}
