//! Content-addressed digests of cards, zones and whole games.
//!
//! Every value is hashed the same way: the digest of a type tag, followed by
//! the digests of its children in order, all hashed once more. Structurally
//! identical states therefore share a digest, and any change in card order,
//! face-up count or zone contents changes it.
//!
//! The combinator is generic over any `sha2::Digest` hasher; SHA-256 is the
//! default used for display and state comparison.

use std::iter;

use sha2::digest::Output;
use sha2::{Digest, Sha256};

use crate::card::{Card, Rank, Suit};
use crate::game::Game;
use crate::zones::{Deck, Foundation, Pile, Waste};

/// Values that can be reduced to a stable, order-sensitive digest.
pub trait ContentHash {
    fn content_hash<D: Digest>(&self) -> Output<D>;

    fn sha256_hash(&self) -> Output<Sha256> {
        self.content_hash::<Sha256>()
    }

    fn sha256_hex(&self) -> String {
        hex::encode(self.sha256_hash())
    }
}

/// Hash `tag`, then hash that digest together with every child digest.
pub fn combine<D: Digest>(tag: &[u8], children: impl IntoIterator<Item = Output<D>>) -> Output<D> {
    let mut hasher = D::new();
    hasher.update(D::digest(tag));
    for child in children {
        hasher.update(child);
    }
    hasher.finalize()
}

fn cards_hash<'a, D: Digest>(tag: &[u8], cards: impl IntoIterator<Item = &'a Card>) -> Output<D> {
    combine::<D>(tag, cards.into_iter().map(|card| card.content_hash::<D>()))
}

impl ContentHash for Suit {
    fn content_hash<D: Digest>(&self) -> Output<D> {
        D::digest(format!("Suit.{self:?}"))
    }
}

impl ContentHash for Rank {
    fn content_hash<D: Digest>(&self) -> Output<D> {
        D::digest(format!("Rank.{self:?}"))
    }
}

impl ContentHash for Card {
    fn content_hash<D: Digest>(&self) -> Output<D> {
        combine::<D>(
            b"Card",
            [self.suit().content_hash::<D>(), self.rank().content_hash::<D>()],
        )
    }
}

impl ContentHash for Deck {
    fn content_hash<D: Digest>(&self) -> Output<D> {
        cards_hash::<D>(b"Deck", self.cards())
    }
}

impl ContentHash for Waste {
    fn content_hash<D: Digest>(&self) -> Output<D> {
        cards_hash::<D>(b"Waste", self.cards())
    }
}

impl ContentHash for Pile {
    fn content_hash<D: Digest>(&self) -> Output<D> {
        let revealed = D::digest((self.revealed_count() as u64).to_le_bytes());
        combine::<D>(
            b"Pile",
            iter::once(revealed).chain(self.cards().iter().map(|card| card.content_hash::<D>())),
        )
    }
}

impl ContentHash for Foundation {
    fn content_hash<D: Digest>(&self) -> Output<D> {
        combine::<D>(
            b"Foundation",
            iter::once(self.suit().content_hash::<D>())
                .chain(self.cards().iter().map(|card| card.content_hash::<D>())),
        )
    }
}

/// The game digest covers every zone but not the history: two games that
/// reached the same layout by different routes hash equal.
impl ContentHash for Game {
    fn content_hash<D: Digest>(&self) -> Output<D> {
        let zones = [
            self.deck().content_hash::<D>(),
            self.waste().content_hash::<D>(),
        ];
        combine::<D>(
            b"Game",
            zones
                .into_iter()
                .chain(self.piles().iter().map(|pile| pile.content_hash::<D>()))
                .chain(self.foundations().iter().map(|f| f.content_hash::<D>())),
        )
    }
}
