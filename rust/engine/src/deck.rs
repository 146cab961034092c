use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Ordered 52-card deck consumed front to back.
///
/// The shuffle source is always injected so a fixed seed reproduces the
/// same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Deck {
    /// Unshuffled deck in construction order.
    pub fn ordered() -> Self {
        Self {
            cards: full_deck(),
            position: 0,
        }
    }

    /// Fresh 52 cards, Fisher–Yates shuffled with `rng`.
    pub fn new_shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = full_deck();
        cards.shuffle(rng);
        Self { cards, position: 0 }
    }

    /// Deck that deals `cards` in the given order. Intended for scripted hands.
    pub fn stacked(cards: Vec<Card>) -> Self {
        Self { cards, position: 0 }
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        let card = self
            .cards
            .get(self.position)
            .copied()
            .ok_or(GameError::EmptyDeck)?;
        self.position += 1;
        Ok(card)
    }

    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if self.remaining() < n {
            return Err(GameError::EmptyDeck);
        }
        (0..n).map(|_| self.draw()).collect()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::ordered()
    }
}
