//! Fixed table constants.

pub const PLAYERS: usize = 4;
pub const HAND_SIZE: usize = 13;
pub const DECK_SIZE: usize = 52;
