use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck exhausted: requested {requested} cards, {remaining} remaining")]
    Exhausted { requested: usize, remaining: usize },
}

/// A standard 52-card deck, shuffled once when built and dealt from the front.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    fn ordered() -> VecDeque<Card> {
        let mut cards = VecDeque::with_capacity(52);
        for &s in &Suit::ALL {
            for &r in &Rank::ALL {
                cards.push_back(Card::new(r, s));
            }
        }
        cards
    }

    /// Build and shuffle a deck with the provided RNG. Every permutation is equally likely
    /// for an unbiased `rng` (Fisher-Yates via `SliceRandom::shuffle`).
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = Self::ordered();
        cards.make_contiguous().shuffle(rng);
        Self { cards }
    }

    /// Build and shuffle a deck from a seed for reproducibility.
    ///
    /// ```
    /// use holdem_core::deck::Deck;
    ///
    /// let mut a = Deck::seeded(42);
    /// let mut b = Deck::seeded(42);
    /// assert_eq!(a.len(), 52);
    /// assert_eq!(a.deal_card(), b.deal_card());
    /// ```
    pub fn seeded(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Build and shuffle a deck from OS entropy.
    pub fn new() -> Self {
        Self::shuffled(&mut rand::rng())
    }

    /// Build a deck whose front is exactly `cards`, in order. Used to stage known deals.
    pub fn stacked(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Deal the front card, or `None` once the deck is exhausted.
    pub fn deal_card(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Deal `n` cards from the front. Nothing is dealt if fewer than `n` remain.
    pub fn deal_n(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if self.cards.len() < n {
            return Err(DeckError::Exhausted {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
