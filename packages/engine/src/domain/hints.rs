//! Hint candidate enumeration and the per-player hint cycle cache.

use std::collections::BTreeMap;

use crate::domain::cards::{Card, Rank};
use crate::domain::hands::{compare_dominance, RankedHand};
use crate::domain::legality::check_valid_play;
use crate::domain::state::PlayerId;

/// Enumerate every legal single, same-rank pair, and same-rank triple from
/// the hand against the current table state, sorted weakest first. Pairs
/// and triples use the lowest cards of their rank by rank-then-suit order.
pub fn candidate_plays(
    hand: &[Card],
    table_hand: Option<&RankedHand>,
    first_turn: bool,
) -> Vec<RankedHand> {
    let mut candidates = Vec::new();

    for &card in hand {
        if let Ok(ranked) = check_valid_play(&[card], table_hand, first_turn) {
            candidates.push(ranked);
        }
    }

    let mut by_rank: BTreeMap<Rank, Vec<Card>> = BTreeMap::new();
    for &card in hand {
        by_rank.entry(card.rank).or_default().push(card);
    }
    for group in by_rank.values_mut() {
        group.sort_unstable();
    }

    for group in by_rank.values() {
        if group.len() >= 2 {
            if let Ok(ranked) = check_valid_play(&group[..2], table_hand, first_turn) {
                candidates.push(ranked);
            }
        }
        if group.len() >= 3 {
            if let Ok(ranked) = check_valid_play(&group[..3], table_hand, first_turn) {
                candidates.push(ranked);
            }
        }
    }

    candidates.sort_by(compare_dominance);
    candidates
}

/// Cached hint list for one player, invalidated by every state-changing
/// action.
#[derive(Debug, Clone, Default)]
pub struct HintCache {
    pub player: Option<PlayerId>,
    pub plays: Vec<Vec<Card>>,
}

impl HintCache {
    pub fn invalidate(&mut self) {
        self.player = None;
        self.plays.clear();
    }

    pub fn is_populated_for(&self, player: PlayerId) -> bool {
        self.player == Some(player) && !self.plays.is_empty()
    }

    pub fn populate(&mut self, player: PlayerId, candidates: &[RankedHand]) {
        self.player = Some(player);
        self.plays = candidates.iter().map(|rh| rh.cards.clone()).collect();
    }
}
