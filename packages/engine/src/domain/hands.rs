//! Hand classification and same-category comparison.
//!
//! All game-specific pattern logic lives here: which 1/2/3/5-card sets form
//! a legal combination, and how two combinations of the same category rank
//! against each other.

use std::cmp::Ordering;

use crate::domain::cards::{Card, Rank, Suit};
use crate::errors::{EngineError, RuleViolationKind};

/// Combination categories in ascending dominance order. A higher category
/// always beats a lower one regardless of card values; the derived `Ord`
/// encodes that.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HandCategory {
    Single,
    Pair,
    Triple,
    Straight,
    Flush,
    FullHouse,
    StraightFlush,
}

/// Tagged classification, one case per category, each carrying only the
/// keys its comparison needs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum HandClass {
    Single { card: Card },
    Pair { high: Card },
    Triple { high: Card },
    Straight { top: Rank },
    Flush { cards: [Card; 5] },
    FullHouse { triple: Rank },
    StraightFlush { top: Rank, suit: Suit },
}

impl HandClass {
    pub fn category(&self) -> HandCategory {
        match self {
            HandClass::Single { .. } => HandCategory::Single,
            HandClass::Pair { .. } => HandCategory::Pair,
            HandClass::Triple { .. } => HandCategory::Triple,
            HandClass::Straight { .. } => HandCategory::Straight,
            HandClass::Flush { .. } => HandCategory::Flush,
            HandClass::FullHouse { .. } => HandCategory::FullHouse,
            HandClass::StraightFlush { .. } => HandCategory::StraightFlush,
        }
    }
}

/// A successful classification: the class plus the classified cards sorted
/// descending by rank then suit.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RankedHand {
    pub class: HandClass,
    pub cards: Vec<Card>,
}

impl RankedHand {
    pub fn category(&self) -> HandCategory {
        self.class.category()
    }
}

fn bomb(detail: &str) -> EngineError {
    EngineError::rule(RuleViolationKind::DisallowedBomb, detail)
}

fn unrecognized(detail: &str) -> EngineError {
    EngineError::rule(RuleViolationKind::UnrecognizedCombination, detail)
}

/// Top rank of a 5-card straight, if the cards form one. Five distinct
/// ranks whose strengths span exactly 4; the custom order has no wraparound
/// (Three is highest and does not connect to Four).
fn straight_top(sorted_desc: &[Card]) -> Option<Rank> {
    let mut strengths: Vec<u8> = sorted_desc.iter().map(|c| c.rank.strength()).collect();
    strengths.sort_unstable();
    strengths.dedup();
    if strengths.len() == 5 && strengths[4] - strengths[0] == 4 {
        Some(sorted_desc[0].rank)
    } else {
        None
    }
}

/// Largest same-rank group size and, for 5-card sets, the rank of the
/// triple in a 3+2 split.
fn rank_counts(sorted_desc: &[Card]) -> Vec<(Rank, usize)> {
    let mut counts: Vec<(Rank, usize)> = Vec::new();
    for card in sorted_desc {
        match counts.iter_mut().find(|(r, _)| *r == card.rank) {
            Some((_, n)) => *n += 1,
            None => counts.push((card.rank, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Classify a candidate play. Accepts 1, 2, 3, or 5 cards in any order;
/// four-of-a-kind is rejected as a disallowed bomb whether standalone or
/// embedded in a 5-card set.
pub fn classify(cards: &[Card]) -> Result<RankedHand, EngineError> {
    let mut sorted: Vec<Card> = cards.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let class = match sorted.len() {
        1 => HandClass::Single { card: sorted[0] },
        2 => {
            if sorted[0].rank != sorted[1].rank {
                return Err(unrecognized("Two cards must share a rank to form a pair"));
            }
            HandClass::Pair { high: sorted[0] }
        }
        3 => {
            if sorted.iter().any(|c| c.rank != sorted[0].rank) {
                return Err(unrecognized(
                    "Three cards must share a rank to form a triple",
                ));
            }
            HandClass::Triple { high: sorted[0] }
        }
        4 => {
            if sorted.iter().all(|c| c.rank == sorted[0].rank) {
                return Err(bomb("Four-of-a-kind bombs are not allowed"));
            }
            return Err(unrecognized("Four-card plays are not a recognized type"));
        }
        5 => {
            let counts = rank_counts(&sorted);
            if counts[0].1 == 4 {
                return Err(bomb("Four-of-a-kind with a kicker is not allowed"));
            }
            let flush = sorted.iter().all(|c| c.suit == sorted[0].suit);
            let straight = straight_top(&sorted);
            match (straight, flush) {
                (Some(top), true) => HandClass::StraightFlush {
                    top,
                    suit: sorted[0].suit,
                },
                _ if counts[0].1 == 3 && counts[1].1 == 2 => HandClass::FullHouse {
                    triple: counts[0].0,
                },
                (_, true) => HandClass::Flush {
                    cards: [sorted[0], sorted[1], sorted[2], sorted[3], sorted[4]],
                },
                (Some(top), false) => HandClass::Straight { top },
                _ => {
                    return Err(unrecognized(
                        "Five cards must form a straight, flush, or full house",
                    ))
                }
            }
        }
        _ => return Err(unrecognized("A play must be 1, 2, 3, or 5 cards")),
    };

    Ok(RankedHand {
        class,
        cards: sorted,
    })
}

/// Total order between two classifications of the same category and size.
/// The precondition is enforced by the caller; cross-category dominance is
/// decided one level up via `compare_dominance`.
pub fn compare_same_category(a: &RankedHand, b: &RankedHand) -> Ordering {
    match (&a.class, &b.class) {
        (
            HandClass::StraightFlush { top: ta, suit: sa },
            HandClass::StraightFlush { top: tb, suit: sb },
        ) => ta.cmp(tb).then(sa.cmp(sb)),
        (HandClass::FullHouse { triple: ta }, HandClass::FullHouse { triple: tb }) => ta.cmp(tb),
        (HandClass::Straight { top: ta }, HandClass::Straight { top: tb }) => ta.cmp(tb),
        (HandClass::Flush { cards: ca }, HandClass::Flush { cards: cb }) => ca
            .iter()
            .zip(cb.iter())
            .map(|(x, y)| x.cmp(y))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal),
        (HandClass::Triple { high: ha }, HandClass::Triple { high: hb })
        | (HandClass::Pair { high: ha }, HandClass::Pair { high: hb }) => ha.cmp(hb),
        (HandClass::Single { card: ca }, HandClass::Single { card: cb }) => ca.cmp(cb),
        // Caller guarantees matching categories; mismatches compare equal
        // like the rest of the unreachable arms.
        _ => Ordering::Equal,
    }
}

/// Full ordering used for hint ranking: category dominance first, then the
/// same-category comparison.
pub fn compare_dominance(a: &RankedHand, b: &RankedHand) -> Ordering {
    a.category()
        .cmp(&b.category())
        .then_with(|| compare_same_category(a, b))
}
