use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// The ordered cards held by one party (player or dealer) within a round.
/// Mutated only by appending a drawn card, or by undoing the most recent
/// draw when a forbidden-total rule rejects it.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes and returns the most recently drawn card. Used by the
    /// deal/hit/stand retry rules; the removed card does not return to the
    /// deck.
    pub fn undo_last_draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Blackjack total, recomputed from scratch on every call: base values
    /// are summed (ace 11, face 10, numeric rank), then 10 is subtracted per
    /// ace while the total exceeds 21. Soften status is not persisted
    /// per-card, which is why the score cannot be maintained incrementally.
    pub fn total(&self) -> u32 {
        let mut total = 0u32;
        let mut aces = 0u32;
        for card in &self.cards {
            let value = card.blackjack_value();
            if value == 0 {
                // unreachable with the closed Rank enumeration
                tracing::warn!(?card, "card has no blackjack value, scoring as 0");
            }
            total += value;
            if card.rank == Rank::Ace {
                aces += 1;
            }
        }
        while aces > 0 && total > 21 {
            total -= 10;
            aces -= 1;
        }
        total
    }
}
