//! Zone primitives: the deck (stock), the waste, the seven piles and the
//! four foundations.
//!
//! Each zone enforces its own push/draw legality, so the move engine only
//! has to orchestrate draw + push pairs. All zones store their cards
//! bottom-to-top, with the playable card last.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg64;

use crate::card::{Card, Rank, Suit, is_one_lower_opposite_color, standard_deck};
use crate::error::{MoveError, Violation, ZoneKind};

/// The face-down stock the player draws from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    seed: u64,
}

impl Deck {
    /// Build a full 52-card deck shuffled deterministically from `seed`.
    ///
    /// The same seed always yields the same order.
    pub fn shuffled(seed: u64) -> Self {
        let mut cards = standard_deck();
        let mut rng = Pcg64::seed_from_u64(seed);
        cards.shuffle(&mut rng);
        Deck { cards, seed }
    }

    /// Build a deck from an explicit card order (bottom to top).
    pub fn from_cards(cards: Vec<Card>, seed: u64) -> Self {
        Deck { cards, seed }
    }

    /// The seed this deck was shuffled from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn draw(&mut self) -> Result<Card, MoveError> {
        self.cards.pop().ok_or(MoveError::EmptyZone {
            zone: ZoneKind::Deck,
        })
    }

    /// Append a card. The deck only ever receives cards recycled from the
    /// waste, so there is no rule to check.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Draw up to `count` cards, in draw order. Stops early if the deck
    /// runs out.
    pub(crate) fn deal(&mut self, count: usize) -> Vec<Card> {
        (0..count).map_while(|_| self.cards.pop()).collect()
    }

    pub(crate) fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// Face-up cards drawn from the deck.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Waste {
    cards: Vec<Card>,
}

impl Waste {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All waste cards, bottom to top. Every waste card is face-up.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn draw(&mut self) -> Result<Card, MoveError> {
        self.cards.pop().ok_or(MoveError::EmptyZone {
            zone: ZoneKind::Waste,
        })
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }
}

/// Snapshot of a pile's shape, taken before a move so the engine can put the
/// pile back exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PileMark {
    len: usize,
    revealed_count: usize,
}

/// One of the seven piles.
///
/// Only the top `revealed_count` cards are face-up; the rest are face-down.
/// Invariant: `revealed_count <= cards.len()`, and `revealed_count == 0`
/// exactly when the pile is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pile {
    cards: Vec<Card>,
    revealed_count: usize,
}

impl Pile {
    pub fn new() -> Self {
        Self::default()
    }

    /// A freshly dealt pile: all cards face-down except the top one.
    pub fn dealt(cards: Vec<Card>) -> Self {
        let revealed_count = cards.len().min(1);
        Pile {
            cards,
            revealed_count,
        }
    }

    /// All cards in the pile, bottom to top, face-down ones included.
    ///
    /// Renderers must use `revealed_count` to decide which are shown.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    /// The face-up run, bottom to top.
    pub fn revealed(&self) -> &[Card] {
        &self.cards[self.cards.len() - self.revealed_count..]
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// The card `depth` positions from the top (depth 1 is the top card).
    pub fn card_at_depth(&self, depth: usize) -> Option<Card> {
        if depth == 0 || depth > self.cards.len() {
            return None;
        }
        Some(self.cards[self.cards.len() - depth])
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether `card` may be pushed onto this pile right now.
    pub fn check_push(&self, card: Card) -> Result<(), Violation> {
        match self.top() {
            None if card.rank() == Rank::King => Ok(()),
            None => Err(Violation::NotKing { card }),
            Some(top) if top.color() == card.color() => Err(Violation::SameColor { card, top }),
            Some(top) if !is_one_lower_opposite_color(card, top) => {
                Err(Violation::NotOneBelow { card, top })
            }
            Some(_) => Ok(()),
        }
    }

    /// Remove the top `count` cards as a run, preserving their order.
    ///
    /// If the whole face-up run is taken, the newly exposed card (if any) is
    /// turned face-up.
    pub fn draw(&mut self, count: usize) -> Result<Vec<Card>, MoveError> {
        if count > self.revealed_count {
            return Err(MoveError::NotRevealed {
                requested: count,
                revealed: self.revealed_count,
            });
        }
        if count == 0 || count > self.cards.len() {
            return Err(MoveError::OutOfBounds {
                zone: ZoneKind::Pile,
                requested: count,
                len: self.cards.len(),
            });
        }

        let run = self.cards.split_off(self.cards.len() - count);
        if count == self.revealed_count {
            self.revealed_count = self.cards.len().min(1);
        } else {
            self.revealed_count -= count;
        }
        Ok(run)
    }

    /// Push a single card, enforcing the alternating-color descending rule
    /// (or King-on-empty). A pushed card is always face-up.
    pub fn push(&mut self, card: Card) -> Result<(), MoveError> {
        self.check_push(card)?;
        self.cards.push(card);
        self.revealed_count += 1;
        Ok(())
    }

    pub(crate) fn mark(&self) -> PileMark {
        PileMark {
            len: self.cards.len(),
            revealed_count: self.revealed_count,
        }
    }

    /// Put the pile back to the shape recorded in `mark`: drop anything
    /// pushed since, then re-append `returned` (cards drawn since).
    pub(crate) fn restore(&mut self, mark: PileMark, returned: impl IntoIterator<Item = Card>) {
        self.cards.truncate(mark.len);
        self.cards.extend(returned);
        debug_assert_eq!(self.cards.len(), mark.len);
        self.revealed_count = mark.revealed_count;
    }
}

/// Per-suit ascending stack, Ace first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Foundation {
    suit: Suit,
    cards: Vec<Card>,
}

impl Foundation {
    pub fn new(suit: Suit) -> Self {
        Foundation {
            suit,
            cards: Vec::new(),
        }
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub(crate) fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Whether `card` may be pushed onto this foundation right now.
    pub fn check_push(&self, card: Card) -> Result<(), Violation> {
        if card.suit() != self.suit {
            return Err(Violation::WrongSuit {
                card,
                suit: self.suit,
            });
        }
        let top_number = self.top().map_or(0, |top| top.rank().number());
        if card.rank().number() != top_number + 1 {
            return Err(Violation::NotNextInSuit {
                card,
                suit: self.suit,
            });
        }
        Ok(())
    }

    pub fn draw(&mut self) -> Result<Card, MoveError> {
        self.cards.pop().ok_or(MoveError::EmptyZone {
            zone: ZoneKind::Foundation,
        })
    }

    pub fn push(&mut self, card: Card) -> Result<(), MoveError> {
        self.check_push(card)?;
        self.cards.push(card);
        Ok(())
    }

    /// Return a card that was just drawn from this foundation.
    pub(crate) fn put_back(&mut self, card: Card) {
        debug_assert!(self.check_push(card).is_ok());
        self.cards.push(card);
    }
}
