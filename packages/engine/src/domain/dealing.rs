//! Deck construction, unbiased shuffling, and dealing.

use rand::RngCore;

use crate::domain::cards::{Card, ALL_RANKS, ALL_SUITS};
use crate::domain::rules::DECK_SIZE;
use crate::errors::{EngineError, SetupIssueKind};

/// Generate the full 52-card deck in canonical order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in ALL_SUITS {
        for rank in ALL_RANKS {
            deck.push(Card { rank, suit });
        }
    }
    deck
}

/// Draw a uniform index in `0..bound` from the RNG.
fn uniform_index(rng: &mut impl RngCore, bound: usize) -> usize {
    let m = bound as u64;
    // Compute largest multiple of m that fits in u64 to avoid modulo bias.
    // Values >= limit are discarded using rejection sampling.
    let limit = u64::MAX - (u64::MAX % m);

    loop {
        let x = rng.next_u64();
        if x < limit {
            return (x % m) as usize;
        }
    }
}

/// Fisher-Yates shuffle over any injected RNG source.
pub fn shuffle(deck: &mut [Card], rng: &mut impl RngCore) {
    for i in (1..deck.len()).rev() {
        let j = uniform_index(rng, i + 1);
        deck.swap(i, j);
    }
}

/// Deal `per_player` cards to each of `players` hands, removing from the
/// deck tail one card per hand in slot rotation. Each dealt hand comes back
/// sorted ascending by rank then suit.
///
/// Fails before any card moves if the deck cannot cover the request.
pub fn deal_from_tail(
    deck: &mut Vec<Card>,
    players: usize,
    per_player: usize,
) -> Result<Vec<Vec<Card>>, EngineError> {
    let total = players * per_player;
    if total > deck.len() {
        return Err(EngineError::setup(
            SetupIssueKind::DeckUnderflow,
            format!("Cannot deal {total} cards from a deck of {}", deck.len()),
        ));
    }

    let mut hands: Vec<Vec<Card>> = vec![Vec::with_capacity(per_player); players];
    for i in 0..total {
        let card = deck.pop().ok_or_else(|| {
            EngineError::setup(SetupIssueKind::DeckUnderflow, "Deck ran out mid-deal")
        })?;
        hands[i % players].push(card);
    }
    for hand in &mut hands {
        hand.sort_unstable();
    }
    Ok(hands)
}
