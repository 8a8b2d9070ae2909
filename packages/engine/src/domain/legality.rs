//! Play validation against the table state and the first-turn constraint.

use std::cmp::Ordering;

use crate::domain::cards::Card;
use crate::domain::hands::{classify, compare_same_category, RankedHand};
use crate::errors::{EngineError, RuleViolationKind};

/// Validate a proposed play.
///
/// Classifies the cards, then applies the ladder: the opening play must
/// include the Diamond-4; a clear table accepts any legal combination; a
/// live table hand must be matched in category and size and strictly
/// outranked. Hand-membership is the caller's responsibility.
pub fn check_valid_play(
    proposed: &[Card],
    table_hand: Option<&RankedHand>,
    first_turn: bool,
) -> Result<RankedHand, EngineError> {
    let ranked = classify(proposed)?;

    if first_turn {
        // The table is clear by construction on the first turn.
        if !proposed.contains(&Card::DIAMOND_FOUR) {
            return Err(EngineError::rule(
                RuleViolationKind::FirstPlayNeedsDiamondFour,
                "The first play must include the Diamond-4",
            ));
        }
        return Ok(ranked);
    }

    let Some(table) = table_hand else {
        return Ok(ranked);
    };

    if ranked.category() != table.category() {
        return Err(EngineError::rule(
            RuleViolationKind::WrongCategory,
            format!("Must play the same type as the table hand ({:?})", table.category()),
        ));
    }
    if ranked.cards.len() != table.cards.len() {
        return Err(EngineError::rule(
            RuleViolationKind::WrongSize,
            format!("Must play {} cards to match the table hand", table.cards.len()),
        ));
    }
    if compare_same_category(&ranked, table) != Ordering::Greater {
        return Err(EngineError::rule(
            RuleViolationKind::DoesNotBeat,
            "Play must beat the previous hand",
        ));
    }
    Ok(ranked)
}
