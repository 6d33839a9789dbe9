use super::rank_groups::RankGroups;
use super::straight_info::StraightInfo;
use super::suit_info::SuitInfo;
use crate::cards::{Card, Rank};

/// Pre-computed analysis of a 7-card set.
/// Built once and shared by all category detectors.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    /// Highest rank first, ties broken by suit.
    pub sorted_cards: [Card; 7],
    pub rank_groups: RankGroups,
    pub suit_info: SuitInfo,
    pub straight_info: StraightInfo,
    /// Best straight within the flush suit only.
    pub straight_flush_info: StraightInfo,
}

impl HandAnalysis {
    pub fn new(cards: &[Card; 7]) -> Self {
        let mut sorted_cards = *cards;
        sorted_cards.sort_by(|a, b| b.cmp(a));

        let mut rank_counts = [0u8; 13];
        for c in sorted_cards.iter() {
            rank_counts[c.rank().index()] += 1;
        }

        let rank_groups = RankGroups::from_counts(&rank_counts);
        let suit_info = SuitInfo::detect(&sorted_cards);
        let straight_info = StraightInfo::detect(&sorted_cards);
        let straight_flush_info = StraightInfo::detect(&suit_info.flush_cards);

        Self {
            sorted_cards,
            rank_groups,
            suit_info,
            straight_info,
            straight_flush_info,
        }
    }

    /// Pick five cards: `take` cards of each listed rank in order, then the highest
    /// remaining cards of other ranks as kickers.
    pub fn assemble(&self, groups: &[(Rank, usize)]) -> [Card; 5] {
        let mut out = [self.sorted_cards[0]; 5];
        let mut used = [false; 7];
        let mut n = 0;

        for &(rank, take) in groups {
            let mut taken = 0;
            for (i, c) in self.sorted_cards.iter().enumerate() {
                if n == 5 || taken == take {
                    break;
                }
                if !used[i] && c.rank() == rank {
                    out[n] = *c;
                    used[i] = true;
                    n += 1;
                    taken += 1;
                }
            }
        }

        for (i, c) in self.sorted_cards.iter().enumerate() {
            if n == 5 {
                break;
            }
            if !used[i] && !groups.iter().any(|(rank, _)| *rank == c.rank()) {
                out[n] = *c;
                used[i] = true;
                n += 1;
            }
        }

        // Seven cards always leave enough kickers, this only keeps the fill total.
        for (i, c) in self.sorted_cards.iter().enumerate() {
            if n == 5 {
                break;
            }
            if !used[i] {
                out[n] = *c;
                used[i] = true;
                n += 1;
            }
        }

        out
    }
}
