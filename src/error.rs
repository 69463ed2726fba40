//! Rule failures raised by zones and surfaced by the move engine.
//!
//! Every failure is local and recoverable: the engine rolls back any partial
//! change before handing one of these to the caller.

use derive_more::{Display, Error};

use crate::card::{Card, Suit};

/// Which kind of zone an operation was attempted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ZoneKind {
    #[display("deck")]
    Deck,
    #[display("waste")]
    Waste,
    #[display("pile")]
    Pile,
    #[display("foundation")]
    Foundation,
}

/// The specific rule a rejected push or move broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Violation {
    #[display("{card} is the same color as {top}")]
    SameColor { card: Card, top: Card },
    #[display("{card} is not one rank below {top}")]
    NotOneBelow { card: Card, top: Card },
    #[display("only a king can start an empty pile, not {card}")]
    NotKing { card: Card },
    #[display("{card} does not belong on the {suit} foundation")]
    WrongSuit { card: Card, suit: Suit },
    #[display("{card} is not the next card for the {suit} foundation")]
    NotNextInSuit { card: Card, suit: Suit },
    #[display("source and target pile are the same")]
    SamePile,
}

/// Error returned by zone operations and by `run_action`.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// A draw was attempted on an empty zone.
    #[display("cannot draw from an empty {zone}")]
    EmptyZone { zone: ZoneKind },

    /// A pile draw asked for more cards than are face-up.
    #[display("cannot take {requested} cards, only {revealed} are face-up")]
    NotRevealed { requested: usize, revealed: usize },

    /// A pile draw (or pile index) fell outside the zone.
    #[display("{requested} is out of bounds for a {zone} of {len}")]
    OutOfBounds {
        zone: ZoneKind,
        requested: usize,
        len: usize,
    },

    /// A push broke the suit, color or rank-sequence rules.
    #[display("invalid move: {violation}")]
    InvalidMove { violation: Violation },

    /// Drawing any number of cards other than one from the deck.
    #[display("drawing {count} cards at a time is not supported")]
    Unsupported { count: usize },
}

impl From<Violation> for MoveError {
    fn from(violation: Violation) -> Self {
        MoveError::InvalidMove { violation }
    }
}
