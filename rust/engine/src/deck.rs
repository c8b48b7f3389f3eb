use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// An ordered, mutable sequence of cards owned by exactly one game.
/// Cards are drawn from the top (the end of the sequence) and the deck is
/// never replenished mid-round; a draw from an empty deck returns `None`.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Full 52-card deck with an OS-entropy-seeded RNG. The RNG is seeded
    /// once per deck, not once per shuffle.
    pub fn new() -> Self {
        Self {
            cards: full_deck(),
            rng: ChaCha20Rng::from_os_rng(),
        }
    }

    /// Deterministic deck for reproducible rounds and tests.
    pub fn new_with_seed(seed: u64) -> Self {
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Fixture deck with an exact card order. Draws pop from the end of
    /// `cards`, so the last element is the first card dealt.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            rng: ChaCha20Rng::seed_from_u64(0),
        }
    }

    /// Restores the full 52 cards and produces a uniformly random
    /// permutation (Fisher-Yates via `SliceRandom`).
    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
    }

    /// Removes and returns the top card, or `None` when the deck is empty.
    /// Callers treat `None` as a fatal round-abort, not a retryable error.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
