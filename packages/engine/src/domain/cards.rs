//! Core card types: Card, Rank, Suit.
//!
//! Both enums are declared in game strength order, so the derived `Ord` is
//! the comparison used everywhere in the rules. Note the rank order is the
//! climbing-game order (Four weakest, Three strongest), not the natural one.

/// Suits in strength order: Diamonds < Clubs < Hearts < Spades.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Diamonds,
    Clubs,
    Hearts,
    Spades,
}

/// Ranks in strength order: 4 < 5 < ... < K < A < 2 < 3.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Two,
    Three,
}

impl Rank {
    /// Strength value (0 = weakest). Consecutive values form straights.
    #[inline]
    pub fn strength(self) -> u8 {
        self as u8
    }
}

impl Suit {
    /// Strength value (0 = weakest), used as the straight-flush tiebreak.
    #[inline]
    pub fn strength(self) -> u8 {
        self as u8
    }
}

/// A playing card. Pure value type; equality is (rank, suit).
// Field order matters: the derived Ord compares rank first, then suit,
// which is the single-card comparison the rules use.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// The card that must be part of the opening play.
    pub const DIAMOND_FOUR: Card = Card {
        rank: Rank::Four,
        suit: Suit::Diamonds,
    };
    /// Role-determining card (landlord side).
    pub const SPADE_THREE: Card = Card {
        rank: Rank::Three,
        suit: Suit::Spades,
    };
    /// Role-determining card (landlord side).
    pub const SPADE_ACE: Card = Card {
        rank: Rank::Ace,
        suit: Suit::Spades,
    };
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Diamonds, Suit::Clubs, Suit::Hearts, Suit::Spades];

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
    Rank::Two,
    Rank::Three,
];
