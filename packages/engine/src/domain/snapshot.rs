//! Per-recipient state projection: the sole state-export surface.
//!
//! The requesting player sees their own hand; everyone else is reduced to a
//! hand count. No other accessor exposes hidden information.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::cards::Card;
use crate::domain::hands::HandCategory;
use crate::domain::roles::{GameMode, Role};
use crate::domain::state::{GameState, PlayerId};

/// Public info about a single seat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub slot: u8,
    pub score: i32,
    pub role: Option<Role>,
    pub finished: bool,
    pub connected: bool,
    /// Present only for the requesting player.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<Card>>,
    pub hand_count: usize,
}

/// The table hand to beat, as shown to clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LastHandView {
    pub category: HandCategory,
    pub cards: Vec<Card>,
}

/// Full projection broadcast to one recipient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub players: Vec<PlayerView>,
    pub center_pile: Vec<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_hand: Option<LastHandView>,
    pub current_player_id: Option<PlayerId>,
    pub first_turn: bool,
    pub started: bool,
    pub finished: bool,
    pub winner_id: Option<PlayerId>,
    pub mode: Option<GameMode>,
    pub roles: BTreeMap<PlayerId, Role>,
    pub finish_order: Vec<PlayerId>,
    pub last_player_who_played: Option<PlayerId>,
}

/// Build the projection for one recipient.
pub fn state_for_player(state: &GameState, requesting_id: PlayerId) -> GameView {
    let players = state
        .players
        .iter()
        .map(|p| PlayerView {
            id: p.id,
            name: p.name.clone(),
            slot: p.slot,
            score: p.score,
            role: p.role,
            finished: p.finished,
            connected: p.connected,
            hand: (p.id == requesting_id).then(|| p.hand.clone()),
            hand_count: p.hand.len(),
        })
        .collect();

    let roles = state
        .players
        .iter()
        .filter_map(|p| p.role.map(|r| (p.id, r)))
        .collect();

    let current_player_id = if state.finished {
        None
    } else {
        state
            .current_player
            .and_then(|idx| state.players.get(idx))
            .map(|p| p.id)
    };

    GameView {
        players,
        center_pile: state.center_pile.clone(),
        last_hand: state.last_hand.as_ref().map(|rh| LastHandView {
            category: rh.category(),
            cards: rh.cards.clone(),
        }),
        current_player_id,
        first_turn: state.first_turn,
        started: state.started,
        finished: state.finished,
        winner_id: state.winner,
        mode: state.mode,
        roles,
        finish_order: state.finish_order.clone(),
        last_player_who_played: state.last_player_who_played,
    }
}
