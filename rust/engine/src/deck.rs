use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// A 52-card deck dealt from the top. `reset` refills and reshuffles it.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Shuffled deck seeded from entropy.
    pub fn new() -> Self {
        Self::new_with_seed(rand::random())
    }

    /// Shuffled deck whose order is fully determined by `seed`.
    pub fn new_with_seed(seed: u64) -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(52),
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        deck.reset();
        deck
    }

    /// Repopulates all 52 cards and shuffles them.
    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
    }

    /// Removes and returns the top card, `None` once the deck is empty.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn deal_many(&mut self, n: usize) -> Vec<Card> {
        (0..n).map_while(|_| self.deal()).collect()
    }

    pub fn burn(&mut self) {
        let _ = self.deal();
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}
