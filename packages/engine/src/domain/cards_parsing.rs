//! Card parsing and formatting for compact tokens (e.g., "AS", "4D", "TS").

use std::fmt;
use std::str::FromStr;

use super::cards::{Card, Rank, Suit};
use crate::errors::{EngineError, RuleViolationKind};

impl FromStr for Card {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || {
            EngineError::rule(
                RuleViolationKind::UnrecognizedCombination,
                format!("Parse card: {s}"),
            )
        };
        if s.len() != 2 {
            return Err(parse_err());
        }
        let mut chars = s.chars();
        let rank_ch = chars.next().ok_or_else(parse_err)?;
        let suit_ch = chars.next().ok_or_else(parse_err)?;
        let rank = match rank_ch {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return Err(parse_err()),
        };
        let suit = match suit_ch {
            'D' => Suit::Diamonds,
            'C' => Suit::Clubs,
            'H' => Suit::Hearts,
            'S' => Suit::Spades,
            _ => return Err(parse_err()),
        };
        Ok(Card { rank, suit })
    }
}

impl Rank {
    pub fn as_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

impl Suit {
    pub fn as_char(self) -> char {
        match self {
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.as_char(), self.suit.as_char())
    }
}

/// Non-panicking helper to parse card tokens (e.g., "AS", "4D") into Card
/// instances. Fails if any token is invalid.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, EngineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
