use crate::cards::{Card, Suit};

/// Flush information for a 7-card set. At most one suit can hold five or more cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuitInfo {
    pub suit_counts: [u8; 4],
    pub flush_suit: Option<Suit>,
    /// Every card of the flush suit, highest first. Empty without a flush.
    pub flush_cards: Vec<Card>,
}

impl SuitInfo {
    /// `cards_desc` must already be sorted highest first.
    pub fn detect(cards_desc: &[Card]) -> Self {
        let mut suit_counts = [0u8; 4];
        for c in cards_desc {
            suit_counts[c.suit().index()] += 1;
        }
        let flush_suit = Suit::ALL
            .iter()
            .copied()
            .find(|s| suit_counts[s.index()] >= 5);
        let flush_cards = match flush_suit {
            Some(suit) => cards_desc
                .iter()
                .copied()
                .filter(|c| c.suit() == suit)
                .collect(),
            None => Vec::new(),
        };
        Self {
            suit_counts,
            flush_suit,
            flush_cards,
        }
    }

    /// The five highest cards of the flush suit.
    pub fn top_five(&self) -> Option<[Card; 5]> {
        self.flush_cards.get(..5)?.try_into().ok()
    }
}
