//! Action representation, legal-action enumeration and the move engine.
//!
//! An `Action` is a purely descriptive value naming a source zone, a target
//! zone and whatever parameters the move needs. `possible_actions` lists
//! every action that is legal in a given `Game`; `run_action` applies one,
//! rolling back any partial change if a zone rejects it.

use core::fmt;

use tracing::{debug, instrument, warn};

use crate::card::{Card, Rank, Suit, is_one_lower_opposite_color};
use crate::error::{MoveError, Violation, ZoneKind};
use crate::game::{Game, NUM_PILES};
use crate::zones::{Foundation, Pile};

/// One player move. Pile indices are 0-based; human text shows them 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Turn the top deck card onto the waste, recycling the waste into the
    /// deck first if the deck is empty. Only `count == 1` is supported.
    DrawFromDeck { count: usize },

    WasteToPile { target_pile: usize },

    FoundationToPile { source_suit: Suit, target_pile: usize },

    /// Move the top `count` face-up cards of one pile onto another.
    PileToPile {
        source_pile: usize,
        target_pile: usize,
        count: usize,
    },

    WasteToFoundation { target_suit: Suit },

    PileToFoundation { source_pile: usize, target_suit: Suit },
}

impl Action {
    /// Human-readable description, e.g. "Move 2 from pile 3 to pile 5".
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Action::DrawFromDeck { count } => write!(f, "Draw {count} from deck"),
            Action::WasteToPile { target_pile } => {
                write!(f, "Move from waste to pile {}", target_pile + 1)
            }
            Action::FoundationToPile {
                source_suit,
                target_pile,
            } => write!(
                f,
                "Move from {source_suit} foundation to pile {}",
                target_pile + 1
            ),
            Action::PileToPile {
                source_pile,
                target_pile,
                count,
            } => write!(
                f,
                "Move {count} from pile {} to pile {}",
                source_pile + 1,
                target_pile + 1
            ),
            Action::WasteToFoundation { target_suit } => {
                write!(f, "Move from waste to {target_suit} foundation")
            }
            Action::PileToFoundation {
                source_pile,
                target_suit,
            } => write!(
                f,
                "Move from pile {} to {target_suit} foundation",
                source_pile + 1
            ),
        }
    }
}

// ----- Internal helpers -----

/// True if `card` may be placed on `pile` (King onto empty, otherwise
/// one rank lower and opposite color).
#[inline]
fn can_land_on_pile(pile: &Pile, card: Card) -> bool {
    match pile.top() {
        None => card.rank() == Rank::King,
        Some(top) => is_one_lower_opposite_color(card, top),
    }
}

/// True if `card` is the next card for its suit's foundation.
#[inline]
fn can_move_to_foundation(game: &Game, card: Card) -> bool {
    game.foundation(card.suit()).check_push(card).is_ok()
}

fn check_pile_index(index: usize) -> Result<usize, MoveError> {
    if index < NUM_PILES {
        Ok(index)
    } else {
        Err(MoveError::OutOfBounds {
            zone: ZoneKind::Pile,
            requested: index,
            len: NUM_PILES,
        })
    }
}

/// Borrow two distinct piles mutably at once.
fn pile_pair(piles: &mut [Pile], source: usize, target: usize) -> (&mut Pile, &mut Pile) {
    debug_assert_ne!(source, target);
    if source < target {
        let (left, right) = piles.split_at_mut(target);
        (&mut left[source], &mut right[0])
    } else {
        let (left, right) = piles.split_at_mut(source);
        (&mut right[0], &mut left[target])
    }
}

// ----- Public move generation -----

/// Generate every action that is legal in `game`, in a stable order.
///
/// The scan order is:
///   1. each pile (by index): pile -> foundation, then pile -> every other
///      pile for each face-up depth
///   2. waste -> foundation, then waste -> each pile
///   3. each foundation -> each pile
///   4. a single draw from the deck, if deck or waste holds any card
///
/// Every returned action succeeds when passed to `run_action` on the same
/// state, and no legal single-step action is missing.
pub fn possible_actions(game: &Game) -> Vec<Action> {
    let mut actions = Vec::new();
    let piles = game.piles();

    // Pile -> Foundation, Pile -> Pile
    for (source_pile, pile) in piles.iter().enumerate() {
        let Some(top) = pile.top() else {
            continue;
        };
        if can_move_to_foundation(game, top) {
            actions.push(Action::PileToFoundation {
                source_pile,
                target_suit: top.suit(),
            });
        }

        for (target_pile, target) in piles.iter().enumerate() {
            if target_pile == source_pile {
                continue;
            }
            for count in 1..=pile.revealed_count() {
                let Some(card) = pile.card_at_depth(count) else {
                    break;
                };
                if can_land_on_pile(target, card) {
                    actions.push(Action::PileToPile {
                        source_pile,
                        target_pile,
                        count,
                    });
                }
            }
        }
    }

    // Waste -> Foundation, Waste -> Pile
    if let Some(card) = game.waste().top() {
        if can_move_to_foundation(game, card) {
            actions.push(Action::WasteToFoundation {
                target_suit: card.suit(),
            });
        }
        for (target_pile, target) in piles.iter().enumerate() {
            if can_land_on_pile(target, card) {
                actions.push(Action::WasteToPile { target_pile });
            }
        }
    }

    // Foundation -> Pile
    for foundation in game.foundations() {
        let Some(card) = foundation.top() else {
            continue;
        };
        for (target_pile, target) in piles.iter().enumerate() {
            if can_land_on_pile(target, card) {
                actions.push(Action::FoundationToPile {
                    source_suit: foundation.suit(),
                    target_pile,
                });
            }
        }
    }

    if !game.deck().is_empty() || !game.waste().is_empty() {
        actions.push(Action::DrawFromDeck { count: 1 });
    }

    actions
}

// ----- Mutating application of an action -----

/// Apply `action` to `game`.
///
/// Each action is a draw from its source zone followed by a push onto its
/// target zone. If the target rejects the push, the source is restored and
/// the zone's error is returned, so a failed action leaves `game` exactly as
/// it was. On success the action is appended to the game's history.
#[instrument(skip(game), fields(seed = game.seed()))]
pub fn run_action(game: &mut Game, action: Action) -> Result<(), MoveError> {
    match action {
        Action::DrawFromDeck { count } => draw_from_deck(game, count)?,

        Action::WasteToPile { target_pile } => {
            let target_pile = check_pile_index(target_pile)?;
            let card = game.waste.draw()?;
            if let Err(err) = game.piles[target_pile].push(card) {
                game.waste.push(card);
                warn!(%action, %err, "rolled back");
                return Err(err);
            }
        }

        Action::FoundationToPile {
            source_suit,
            target_pile,
        } => {
            let target_pile = check_pile_index(target_pile)?;
            let source = foundation_slot(source_suit);
            let card = game.foundations[source].draw()?;
            if let Err(err) = game.piles[target_pile].push(card) {
                game.foundations[source].put_back(card);
                warn!(%action, %err, "rolled back");
                return Err(err);
            }
        }

        Action::PileToPile {
            source_pile,
            target_pile,
            count,
        } => {
            let source_pile = check_pile_index(source_pile)?;
            let target_pile = check_pile_index(target_pile)?;
            if source_pile == target_pile {
                return Err(Violation::SamePile.into());
            }
            let (source, target) = pile_pair(&mut game.piles, source_pile, target_pile);
            if let Err(err) = move_run_between_piles(source, target, count) {
                warn!(%action, %err, "rolled back");
                return Err(err);
            }
        }

        Action::WasteToFoundation { target_suit } => {
            let target = foundation_slot(target_suit);
            let card = game.waste.draw()?;
            if let Err(err) = game.foundations[target].push(card) {
                game.waste.push(card);
                warn!(%action, %err, "rolled back");
                return Err(err);
            }
        }

        Action::PileToFoundation {
            source_pile,
            target_suit,
        } => {
            let source_pile = check_pile_index(source_pile)?;
            let target = foundation_slot(target_suit);
            let pile = &mut game.piles[source_pile];
            let mark = pile.mark();
            let run = pile.draw(1)?;
            if let Err(err) = push_all_to_foundation(&mut game.foundations[target], &run) {
                game.piles[source_pile].restore(mark, run);
                warn!(%action, %err, "rolled back");
                return Err(err);
            }
        }
    }

    debug!(%action, "applied");
    game.history.push(action);
    Ok(())
}

/// Index of a suit's foundation within `Game::foundations`.
#[inline]
fn foundation_slot(suit: Suit) -> usize {
    suit.index() as usize
}

fn push_all_to_foundation(foundation: &mut Foundation, cards: &[Card]) -> Result<(), MoveError> {
    cards.iter().try_for_each(|&card| foundation.push(card))
}

fn draw_from_deck(game: &mut Game, count: usize) -> Result<(), MoveError> {
    if count != 1 {
        return Err(MoveError::Unsupported { count });
    }
    if game.deck.is_empty() {
        let mut recycled = 0usize;
        while let Ok(card) = game.waste.draw() {
            game.deck.push(card);
            recycled += 1;
        }
        debug!(recycled, "recycled waste into deck");
    }
    let card = game.deck.draw()?;
    game.waste.push(card);
    Ok(())
}

/// Move the top `count` cards of `source` onto `target`, one card at a time
/// in their original order.
///
/// If any push fails, both piles are put back exactly as they were before
/// the call and the failure is returned.
fn move_run_between_piles(
    source: &mut Pile,
    target: &mut Pile,
    count: usize,
) -> Result<(), MoveError> {
    let source_mark = source.mark();
    let target_mark = target.mark();
    let run = source.draw(count)?;

    for &card in &run {
        if let Err(err) = target.push(card) {
            target.restore(target_mark, []);
            source.restore(source_mark, run);
            return Err(err);
        }
    }
    Ok(())
}

// ----- Tests -----
