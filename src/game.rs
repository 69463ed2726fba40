//! Game-level state: every zone plus the history of applied actions.
//!
//! `Game` owns exactly the data needed to describe a Klondike position:
//!   - the deck (stock), which also remembers the seed it was shuffled from
//!   - the waste
//!   - the seven piles
//!   - the four foundations, one per suit in `Suit::ALL` order
//!   - the append-only history of actions applied since the deal
//!
//! All 52 cards are conserved across these zones at all times. The only way
//! to change a `Game` after creation is `run_action`.

use rand::Rng;
use tracing::info;

use crate::card::{Card, Suit};
use crate::error::MoveError;
use crate::moves::{self, Action};
use crate::zones::{Deck, Foundation, Pile, Waste};

/// Number of piles in the layout.
pub const NUM_PILES: usize = 7;
/// Number of foundations, one per suit.
pub const NUM_FOUNDATIONS: usize = 4;

/// Append-only log of the actions applied to a game, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    actions: Vec<Action>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The most recently applied action.
    pub fn last(&self) -> Option<&Action> {
        self.actions.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }
}

/// Complete description of a single game at a point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    pub(crate) deck: Deck,
    pub(crate) waste: Waste,
    pub(crate) piles: [Pile; NUM_PILES],
    pub(crate) foundations: [Foundation; NUM_FOUNDATIONS],
    pub(crate) history: History,
}

impl Game {
    /// Shuffle and deal a new game.
    ///
    /// With `Some(seed)` the deal is fully reproducible. With `None` a seed
    /// is drawn from the thread-local RNG and recorded on the deck, so
    /// `seed()` can always reproduce the game.
    pub fn create(seed: Option<u64>) -> Self {
        Self::create_with_rng(seed, &mut rand::thread_rng())
    }

    /// Like `create`, but a missing seed is drawn from `rng`.
    pub fn create_with_rng<R: Rng + ?Sized>(seed: Option<u64>, rng: &mut R) -> Self {
        let seed = seed.unwrap_or_else(|| rng.r#gen());
        info!(seed, "dealing new game");
        Self::deal(Deck::shuffled(seed))
    }

    /// Deal from `deck`: pile `i` receives `i + 1` cards, drawn one at a time
    /// from the top of the deck, with only its top card face-up.
    pub fn deal(mut deck: Deck) -> Self {
        let piles = std::array::from_fn(|i| Pile::dealt(deck.deal(i + 1)));
        Self::from_zones(deck, Waste::new(), piles)
    }

    /// Assemble a game from explicit zones, with empty foundations and an
    /// empty history.
    pub fn from_zones(deck: Deck, waste: Waste, piles: [Pile; NUM_PILES]) -> Self {
        Game {
            deck,
            waste,
            piles,
            foundations: Suit::ALL.map(Foundation::new),
            history: History::new(),
        }
    }

    /// Rebuild a game by dealing from `seed` and replaying `actions` in order.
    ///
    /// Fails with the error of the first action that is rejected.
    pub fn replay(
        seed: u64,
        actions: impl IntoIterator<Item = Action>,
    ) -> Result<Self, MoveError> {
        let mut game = Self::create(Some(seed));
        for action in actions {
            game.run_action(action)?;
        }
        Ok(game)
    }

    /// The seed the deck was shuffled from.
    pub fn seed(&self) -> u64 {
        self.deck.seed()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn waste(&self) -> &Waste {
        &self.waste
    }

    pub fn piles(&self) -> &[Pile; NUM_PILES] {
        &self.piles
    }

    /// Foundations in `Suit::ALL` order.
    pub fn foundations(&self) -> &[Foundation; NUM_FOUNDATIONS] {
        &self.foundations
    }

    pub fn foundation(&self, suit: Suit) -> &Foundation {
        &self.foundations[suit.index() as usize]
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Every card in every zone: deck, waste, piles, then foundations.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.deck
            .cards()
            .iter()
            .chain(self.waste.cards())
            .chain(self.piles.iter().flat_map(Pile::cards))
            .chain(self.foundations.iter().flat_map(Foundation::cards))
            .copied()
    }

    /// All actions that are currently legal. See `moves::possible_actions`.
    pub fn possible_actions(&self) -> Vec<Action> {
        moves::possible_actions(self)
    }

    /// Apply an action. See `moves::run_action`.
    pub fn run_action(&mut self, action: Action) -> Result<(), MoveError> {
        moves::run_action(self, action)
    }
}
