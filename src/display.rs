//! Human-readable rendering of a Klondike game.
//!
//! This module renders a `Game` as multi-line text using the compact `Card`
//! representation. Face-down cards are shown as "XX" and face-up cards with
//! their `short_str()` rank/suit code. It only reads state; nothing here
//! knows the rules.

use crate::card::Card;
use crate::game::{Game, NUM_PILES};
use crate::zones::Pile;

/// Format a single card for display, either face-up or face-down.
///
/// - Face-down cards are rendered as `"XX"`.
/// - Face-up cards use `Card::short_str()` such as `"AH"`, `"7C"`, `"TD"`.
pub fn format_card_visible(card: Card, face_up: bool) -> String {
    if face_up {
        card.short_str()
    } else {
        "XX".to_string()
    }
}

/// Render the foundation row in `Suit::ALL` order.
///
///   - Empty foundation: `[ S]` (just the suit letter)
///   - Non-empty: the top card, e.g. `[AH]`, `[7C]`, `[KD]`
pub fn render_foundations(game: &Game) -> String {
    let cells: Vec<String> = game
        .foundations()
        .iter()
        .map(|f| match f.top() {
            Some(card) => format!("[{}]", card.short_str()),
            None => format!("[ {}]", f.suit().short_char()),
        })
        .collect();
    format!("Foundations: {}", cells.join(" "))
}

fn cards_noun(n: usize) -> &'static str {
    if n == 1 { "card" } else { "cards" }
}

/// Render the deck (face-down) and waste (face-up) on a single line.
///
/// The deck is shown as a count only; its order stays hidden.
pub fn render_deck_and_waste(game: &Game) -> String {
    let deck = match game.deck().len() {
        0 => "Deck: [empty]".to_string(),
        n => format!("Deck: [{n} {}]", cards_noun(n)),
    };
    let waste = match game.waste().top() {
        None => "Waste: [empty]".to_string(),
        Some(top) => {
            let n = game.waste().len();
            format!("Waste: [{}] ({n} {})", top.short_str(), cards_noun(n))
        }
    };
    format!("{deck}    {waste}")
}

/// Whether the card at `index` (0 = bottom) of `pile` is face-up.
fn is_face_up(pile: &Pile, index: usize) -> bool {
    index >= pile.len() - pile.revealed_count()
}

/// Render all piles as a multi-line string.
///
/// Piles are arranged in 7 vertical stacks, each cell four characters wide.
/// The bottom card of every pile shares the first row; the last non-empty
/// row of a pile is its playable card.
pub fn render_piles(game: &Game) -> String {
    let mut s = String::new();

    s.push_str("Piles:\n");
    s.push_str("      ");
    for pile_idx in 0..NUM_PILES {
        s.push_str(&format!(" P{} ", pile_idx + 1));
    }
    s.push('\n');

    let max_height = game.piles().iter().map(Pile::len).max().unwrap_or(0);

    for row in 0..max_height {
        s.push_str("      ");
        for pile in game.piles() {
            match pile.cards().get(row) {
                None => s.push_str("    "),
                Some(&card) => {
                    let rep = format_card_visible(card, is_face_up(pile, row));
                    s.push_str(&format!("{rep:>3} "));
                }
            }
        }
        s.push('\n');
    }

    s
}

/// Render the full game (foundations, deck/waste, and piles).
pub fn render_game(game: &Game) -> String {
    let mut s = String::new();

    s.push_str(&render_foundations(game));
    s.push('\n');
    s.push_str(&render_deck_and_waste(game));
    s.push('\n');
    s.push('\n');
    s.push_str(&render_piles(game));

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use crate::moves::Action;
    use crate::zones::{Deck, Waste};

    /// The grid the renderer should produce, computed straight from the
    /// piles: grid[row][pile] = "", "XX", or "AH", etc.
    fn expected_pile_grid(game: &Game) -> Vec<Vec<String>> {
        let max_height = game.piles().iter().map(Pile::len).max().unwrap_or(0);
        let mut grid = vec![vec![String::new(); NUM_PILES]; max_height];

        for (pile_idx, pile) in game.piles().iter().enumerate() {
            let hidden = pile.len() - pile.revealed_count();
            for (row, &card) in pile.cards().iter().enumerate() {
                grid[row][pile_idx] = format_card_visible(card, row >= hidden);
            }
        }

        grid
    }

    /// Parse `render_piles` output back into a grid of cell strings.
    fn parse_rendered_pile_grid(rendered: &str) -> Vec<Vec<String>> {
        let lines: Vec<&str> = rendered.lines().collect();
        if lines.len() <= 2 {
            return Vec::new();
        }
        let body = &lines[2..];
        let mut grid = vec![vec![String::new(); NUM_PILES]; body.len()];

        let base_offset = 6;
        for (row_idx, line) in body.iter().enumerate() {
            for pile_idx in 0..NUM_PILES {
                let start = base_offset + 4 * pile_idx;
                if start >= line.len() {
                    continue;
                }
                let end = (start + 4).min(line.len());
                grid[row_idx][pile_idx] = line[start..end].trim().to_string();
            }
        }

        grid
    }

    #[test]
    fn initial_deal_renders_hidden_and_visible_cards() {
        let game = Game::create(Some(123456789));
        let rendered = render_piles(&game);

        let parsed = parse_rendered_pile_grid(&rendered);
        assert_eq!(parsed, expected_pile_grid(&game));

        // Seven piles, tallest has seven cards, one face-up card per pile.
        assert_eq!(parsed.len(), 7);
        let face_up = parsed
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty() && cell.as_str() != "XX")
            .count();
        assert_eq!(face_up, NUM_PILES);
    }

    #[test]
    fn deck_and_waste_line_tracks_counts() {
        let mut game = Game::from_zones(
            Deck::from_cards(Vec::new(), 0),
            Waste::new(),
            std::array::from_fn(|_| Pile::new()),
        );
        let line = render_deck_and_waste(&game);
        assert!(line.contains("Deck: [empty]"));
        assert!(line.contains("Waste: [empty]"));

        game.deck.push(Card::new(Suit::Hearts, Rank::Ace));
        game.deck.push(Card::new(Suit::Clubs, Rank::Two));
        game.run_action(Action::DrawFromDeck { count: 1 }).unwrap();
        let line = render_deck_and_waste(&game);
        assert!(line.contains("Deck: [1 card]"));
        assert!(line.contains("Waste: [2C] (1 card)"));

        game.run_action(Action::DrawFromDeck { count: 1 }).unwrap();
        let line = render_deck_and_waste(&game);
        assert!(line.contains("Deck: [empty]"));
        assert!(line.contains("Waste: [AH] (2 cards)"));
    }

    #[test]
    fn foundations_show_suit_until_an_ace_lands() {
        let mut game = Game::from_zones(
            Deck::from_cards(Vec::new(), 0),
            Waste::new(),
            std::array::from_fn(|_| Pile::new()),
        );
        assert_eq!(
            render_foundations(&game),
            "Foundations: [ S] [ H] [ D] [ C]"
        );

        game.waste.push(Card::new(Suit::Diamonds, Rank::Ace));
        game.run_action(Action::WasteToFoundation {
            target_suit: Suit::Diamonds,
        })
        .unwrap();
        assert_eq!(
            render_foundations(&game),
            "Foundations: [ S] [ H] [AD] [ C]"
        );
    }

    #[test]
    fn full_render_stacks_the_sections() {
        let game = Game::create(Some(1));
        let rendered = render_game(&game);
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].starts_with("Foundations:"));
        assert!(lines[1].starts_with("Deck: [24 cards]"));
        assert_eq!(lines[3], "Piles:");
    }
}
