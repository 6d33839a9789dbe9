use crate::cards::Rank;

/// Groups ranks by their frequency among the seven cards, sorted by (count desc, rank desc).
///
/// Example: AAAKKQ2 groups as [(Ace, 3), (King, 2), (Queen, 1), (Two, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    /// Create RankGroups from a count array indexed by `Rank::index()`.
    pub fn from_counts(rank_counts: &[u8; 13]) -> Self {
        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .map(|&rank| (rank, rank_counts[rank.index()]))
            .filter(|&(_, count)| count > 0)
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
        Self { groups }
    }

    /// Rank of the highest four-of-a-kind, if present.
    pub fn quad(&self) -> Option<Rank> {
        self.groups
            .iter()
            .find(|(_, count)| *count == 4)
            .map(|(rank, _)| *rank)
    }

    /// Rank of the highest three-of-a-kind, if present.
    pub fn trips(&self) -> Option<Rank> {
        self.groups
            .iter()
            .find(|(_, count)| *count == 3)
            .map(|(rank, _)| *rank)
    }

    /// Best full house as (trips rank, pair rank). A second set of trips may fill the pair.
    pub fn full_house(&self) -> Option<(Rank, Rank)> {
        let trips = self.trips()?;
        let pair = self
            .groups
            .iter()
            .find(|(rank, count)| *rank != trips && *count >= 2)
            .map(|(rank, _)| *rank)?;
        Some((trips, pair))
    }

    /// All pair ranks, in descending order.
    pub fn pairs(&self) -> Vec<Rank> {
        self.groups
            .iter()
            .filter(|(_, count)| *count == 2)
            .map(|(rank, _)| *rank)
            .collect()
    }

    #[cfg(test)]
    pub fn groups(&self) -> &[(Rank, u8)] {
        &self.groups
    }
}
