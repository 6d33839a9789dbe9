use crate::cards::{Card, Rank};

/// The highest straight among a set of cards, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub top_rank: Option<Rank>,
    /// The five straight cards, highest first; the wheel reads 5-4-3-2-A.
    pub cards: Option<[Card; 5]>,
}

impl StraightInfo {
    /// Detect the best straight. `cards_desc` must be sorted highest first so that the
    /// first card seen for each rank is the one kept.
    pub fn detect(cards_desc: &[Card]) -> Self {
        let mut by_rank: [Option<Card>; 13] = [None; 13];
        for &c in cards_desc {
            by_rank[c.rank().index()].get_or_insert(c);
        }

        // Tops from Ace down to Six.
        for top in (4..13).rev() {
            let run = [
                by_rank[top],
                by_rank[top - 1],
                by_rank[top - 2],
                by_rank[top - 3],
                by_rank[top - 4],
            ];
            if let Some(cards) = collect(run) {
                return Self {
                    top_rank: Some(Rank::ALL[top]),
                    cards: Some(cards),
                };
            }
        }

        // Wheel: A-2-3-4-5 with the Ace playing low.
        let wheel = [
            by_rank[Rank::Five.index()],
            by_rank[Rank::Four.index()],
            by_rank[Rank::Three.index()],
            by_rank[Rank::Two.index()],
            by_rank[Rank::Ace.index()],
        ];
        if let Some(cards) = collect(wheel) {
            return Self {
                top_rank: Some(Rank::Five),
                cards: Some(cards),
            };
        }

        Self {
            top_rank: None,
            cards: None,
        }
    }
}

fn collect(run: [Option<Card>; 5]) -> Option<[Card; 5]> {
    Some([run[0]?, run[1]?, run[2]?, run[3]?, run[4]?])
}
