use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use klondike_engine::game::NUM_PILES;
use klondike_engine::{Action, ContentHash, Game, MoveError, Suit, possible_actions};

/// Every action shape the engine accepts, with every parameter value that
/// could possibly matter for `game`.
fn candidate_actions(game: &Game) -> Vec<Action> {
    let mut out = vec![
        Action::DrawFromDeck { count: 1 },
        Action::DrawFromDeck { count: 2 },
    ];
    for target_pile in 0..NUM_PILES {
        out.push(Action::WasteToPile { target_pile });
        for source_suit in Suit::ALL {
            out.push(Action::FoundationToPile {
                source_suit,
                target_pile,
            });
        }
    }
    for source_pile in 0..NUM_PILES {
        for target_suit in Suit::ALL {
            out.push(Action::PileToFoundation {
                source_pile,
                target_suit,
            });
        }
        for target_pile in 0..NUM_PILES {
            for count in 0..=game.piles()[source_pile].len() + 1 {
                out.push(Action::PileToPile {
                    source_pile,
                    target_pile,
                    count,
                });
            }
        }
    }
    for target_suit in Suit::ALL {
        out.push(Action::WasteToFoundation { target_suit });
    }
    out
}

fn assert_conserved(game: &Game) {
    let cards: Vec<_> = game.cards().collect();
    assert_eq!(cards.len(), 52, "card count drifted");
    let unique: HashSet<_> = cards.iter().copied().collect();
    assert_eq!(unique.len(), 52, "duplicate card in play");
}

fn assert_piles_well_formed(game: &Game) {
    for pile in game.piles() {
        assert!(pile.revealed_count() <= pile.len());
        assert_eq!(pile.revealed_count() == 0, pile.is_empty());
    }
    for foundation in game.foundations() {
        if let Some(top) = foundation.top() {
            assert_eq!(top.suit(), foundation.suit());
            assert_eq!(top.rank().number() as usize, foundation.len());
        }
    }
}

/// Try every candidate on a copy of `game`. Successful ones are returned;
/// rejected ones must leave the copy untouched.
fn brute_force_legal(game: &Game) -> HashSet<Action> {
    let before = game.sha256_hash();
    let mut legal = HashSet::new();
    for action in candidate_actions(game) {
        let mut trial = game.clone();
        match trial.run_action(action) {
            Ok(()) => {
                assert_conserved(&trial);
                assert_eq!(trial.history().last(), Some(&action));
                legal.insert(action);
            }
            Err(_) => {
                assert_eq!(trial.sha256_hash(), before, "{action} left partial state");
                assert_eq!(trial, *game);
            }
        }
    }
    legal
}

/// Play `steps` random legal actions from a seeded deal, calling `check`
/// on every position reached.
fn random_playout(seed: u64, steps: usize, mut check: impl FnMut(&Game)) {
    let mut rng = Pcg64::seed_from_u64(seed ^ 0x5EED);
    let mut game = Game::create(Some(seed));
    check(&game);
    for _ in 0..steps {
        let actions = possible_actions(&game);
        let Some(&action) = actions.choose(&mut rng) else {
            break;
        };
        game.run_action(action).unwrap();
        check(&game);
    }
}

#[test]
fn cards_are_conserved_through_random_play() {
    for seed in 0..20 {
        random_playout(seed, 200, |game| {
            assert_conserved(game);
            assert_piles_well_formed(game);
        });
    }
}

#[test]
fn enumeration_matches_brute_force() {
    for seed in [3_u64, 42, 1234, 987_654_321] {
        random_playout(seed, 120, |game| {
            let listed = possible_actions(game);
            let listed_set: HashSet<Action> = listed.iter().copied().collect();
            assert_eq!(listed.len(), listed_set.len(), "duplicate action listed");
            assert_eq!(listed_set, brute_force_legal(game));
        });
    }
}

#[test]
fn same_seed_deals_identical_games() {
    let a = Game::create(Some(123));
    let b = Game::create(Some(123));
    assert_eq!(a.sha256_hash(), b.sha256_hash());
    assert_eq!(a.seed(), 123);
    let a_piles: Vec<_> = a.piles().iter().map(|p| p.cards().to_vec()).collect();
    let b_piles: Vec<_> = b.piles().iter().map(|p| p.cards().to_vec()).collect();
    assert_eq!(a_piles, b_piles);
}

#[test]
fn history_records_only_successful_actions() {
    let mut game = Game::create(Some(8));
    let mut rng = Pcg64::seed_from_u64(8);
    let mut applied = Vec::new();

    for _ in 0..50 {
        let action = if rng.gen_bool(0.3) {
            Action::DrawFromDeck { count: 3 }
        } else {
            match possible_actions(&game).choose(&mut rng) {
                Some(&action) => action,
                None => break,
            }
        };
        match game.run_action(action) {
            Ok(()) => applied.push(action),
            Err(err) => assert_eq!(err, MoveError::Unsupported { count: 3 }),
        }
    }
    assert_eq!(game.history().as_slice(), applied.as_slice());

    let replayed = Game::replay(8, applied).unwrap();
    assert_eq!(replayed, game);
}

#[test]
fn recycling_the_waste_keeps_every_card() {
    let mut game = Game::create(Some(11));
    // Three full passes through the 24-card deck.
    for _ in 0..72 {
        game.run_action(Action::DrawFromDeck { count: 1 }).unwrap();
        assert_conserved(&game);
        assert_eq!(game.deck().len() + game.waste().len(), 24);
    }
    // After 72 draws the deck has been emptied exactly three times.
    assert!(game.deck().is_empty());
    assert_eq!(game.waste().len(), 24);
}
