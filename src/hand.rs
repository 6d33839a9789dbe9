use crate::cards::{parse_cards, Card};
use std::collections::HashSet;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("too many community cards: {0}")]
    TooManyCommunityCards(usize),
    #[error("duplicate community cards")]
    DuplicateCommunityCards,
    #[error("hole cards overlap with community cards")]
    Overlap,
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A player's two private hole cards.
///
/// ```
/// use holdem_core::cards::{Card, Rank, Suit};
/// use holdem_core::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spade),
///     Card::new(Rank::King, Suit::Spade),
/// ).unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        if slice.len() != 2 {
            return Err(HandError::HoleCount(slice.len()));
        }
        Self::try_new(slice[0], slice[1])
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s)
            .map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

/// The shared cards of a hand. All five are dealt up front and turned face up
/// stage by stage; only the revealed prefix is visible to players.
///
/// ```
/// use holdem_core::hand::CommunityCards;
///
/// let mut community: CommunityCards = "2c 3c 4c 5d 9h".parse().unwrap();
/// assert!(community.revealed().is_empty());
/// community.reveal(3);
/// assert_eq!(community.revealed().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityCards {
    cards: Vec<Card>,
    revealed: usize,
}

impl CommunityCards {
    pub const FULL: usize = 5;

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > Self::FULL {
            return Err(HandError::TooManyCommunityCards(cards.len()));
        }
        let set: HashSet<Card> = cards.iter().copied().collect();
        if set.len() != cards.len() {
            return Err(HandError::DuplicateCommunityCards);
        }
        Ok(Self { cards, revealed: 0 })
    }

    /// Build with every card already face up.
    pub fn revealed_all(cards: Vec<Card>) -> Result<Self, HandError> {
        let mut out = Self::try_new(cards)?;
        out.revealed = out.cards.len();
        Ok(out)
    }

    /// Turn up to `n` more cards face up and return the newly revealed ones.
    pub fn reveal(&mut self, n: usize) -> &[Card] {
        let start = self.revealed;
        self.revealed = (self.revealed + n).min(self.cards.len());
        &self.cards[start..self.revealed]
    }

    pub fn revealed(&self) -> &[Card] {
        &self.cards[..self.revealed]
    }

    /// True once all five cards are face up.
    pub fn is_complete(&self) -> bool {
        self.revealed == Self::FULL
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl FromStr for CommunityCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s)
            .map_err(|e| HandError::CardParse(e.to_string()))?;
        CommunityCards::try_new(cards)
    }
}

/// Validate that hole cards and community cards form a consistent Hold'em state:
/// at most five community cards and no card appearing twice.
pub fn validate_holdem(hole: &HoleCards, community: &[Card]) -> Result<(), HandError> {
    if community.len() > CommunityCards::FULL {
        return Err(HandError::TooManyCommunityCards(community.len()));
    }
    let set: HashSet<Card> = community.iter().copied().collect();
    if set.len() != community.len() {
        return Err(HandError::DuplicateCommunityCards);
    }
    if set.contains(&hole.first()) || set.contains(&hole.second()) {
        return Err(HandError::Overlap);
    }
    if hole.first() == hole.second() {
        return Err(HandError::DuplicateHoleCards);
    }
    Ok(())
}
