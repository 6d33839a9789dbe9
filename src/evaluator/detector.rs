use super::hand_analysis::HandAnalysis;
use crate::cards::{Card, Rank};
use crate::evaluator::Category;

/// Strategy pattern: each category detector knows how to recognise its category and
/// pick the five cards that make it.
pub trait CategoryDetector {
    fn category(&self) -> Category;
    /// The ordered best five if the analysed cards hold this category.
    fn detect(&self, analysis: &HandAnalysis) -> Option<[Card; 5]>;
}

// ============================================================================
// Detector Implementations (in priority order: highest to lowest)
// ============================================================================

/// Royal Flush: Ten through Ace, all same suit
pub struct RoyalFlushDetector;

impl CategoryDetector for RoyalFlushDetector {
    fn category(&self) -> Category {
        Category::RoyalFlush
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Card; 5]> {
        let info = analysis.straight_flush_info;
        if info.top_rank == Some(Rank::Ace) {
            info.cards
        } else {
            None
        }
    }
}

/// Straight Flush: Five consecutive ranks, all same suit
pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn category(&self) -> Category {
        Category::StraightFlush
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Card; 5]> {
        analysis.straight_flush_info.cards
    }
}

/// Four of a Kind: Four cards of the same rank
pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn category(&self) -> Category {
        Category::FourOfAKind
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Card; 5]> {
        let quad = analysis.rank_groups.quad()?;
        Some(analysis.assemble(&[(quad, 4)]))
    }
}

/// Full House: Three of a kind plus a pair
pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn category(&self) -> Category {
        Category::FullHouse
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Card; 5]> {
        let (trips, pair) = analysis.rank_groups.full_house()?;
        Some(analysis.assemble(&[(trips, 3), (pair, 2)]))
    }
}

/// Flush: Five cards of the same suit
pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn category(&self) -> Category {
        Category::Flush
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Card; 5]> {
        analysis.suit_info.top_five()
    }
}

/// Straight: Five consecutive ranks
pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn category(&self) -> Category {
        Category::Straight
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Card; 5]> {
        analysis.straight_info.cards
    }
}

/// Three of a Kind: Three cards of the same rank
pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn category(&self) -> Category {
        Category::ThreeOfAKind
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Card; 5]> {
        let trips = analysis.rank_groups.trips()?;
        Some(analysis.assemble(&[(trips, 3)]))
    }
}

/// Two Pair: Two different pairs
pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn category(&self) -> Category {
        Category::TwoPair
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Card; 5]> {
        let pairs = analysis.rank_groups.pairs();
        match pairs.as_slice() {
            // A third pair's rank stays available as the kicker.
            [high, low, ..] => Some(analysis.assemble(&[(*high, 2), (*low, 2)])),
            _ => None,
        }
    }
}

/// One Pair: Two cards of the same rank
pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn category(&self) -> Category {
        Category::Pair
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Card; 5]> {
        let pair = *analysis.rank_groups.pairs().first()?;
        Some(analysis.assemble(&[(pair, 2)]))
    }
}

/// High Card: No other category matches
pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn category(&self) -> Category {
        Category::HighCard
    }

    fn detect(&self, analysis: &HandAnalysis) -> Option<[Card; 5]> {
        Some(analysis.assemble(&[]))
    }
}

/// All category detectors in priority order (highest to lowest).
pub const DETECTORS: &[&dyn CategoryDetector] = &[
    &RoyalFlushDetector,
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn analyse(s: &str) -> HandAnalysis {
        let cards: [Card; 7] = parse_cards(s).unwrap().try_into().unwrap();
        HandAnalysis::new(&cards)
    }

    fn ranks(five: [Card; 5]) -> String {
        five.iter().map(|c| c.rank().to_char()).collect()
    }

    #[test]
    fn test_royal_needs_ace_high_straight_flush() {
        let royal = analyse("Th Jh Qh Kh Ah 2c 2d");
        assert!(RoyalFlushDetector.detect(&royal).is_some());
        let king_high = analyse("9h Th Jh Qh Kh As 2d");
        assert!(RoyalFlushDetector.detect(&king_high).is_none());
        assert!(StraightFlushDetector.detect(&king_high).is_some());
    }

    #[test]
    fn test_steel_wheel_is_straight_flush() {
        let a = analyse("Ah 2h 3h 4h 5h Kc Qd");
        let five = StraightFlushDetector.detect(&a).unwrap();
        assert_eq!(ranks(five), "5432A");
        assert!(RoyalFlushDetector.detect(&a).is_none());
    }

    #[test]
    fn test_four_of_a_kind_detector() {
        let a = analyse("7c 7d 7h 7s 2c 9d Kh");
        let five = FourOfAKindDetector.detect(&a).unwrap();
        assert_eq!(ranks(five), "7777K");
    }

    #[test]
    fn test_full_house_detector() {
        let a = analyse("Kc Kd Kh Qc Qs 2d 3h");
        let five = FullHouseDetector.detect(&a).unwrap();
        assert_eq!(ranks(five), "KKKQQ");
    }

    #[test]
    fn test_flush_detector_takes_top_five() {
        let a = analyse("Ad Jd 9d 5d 2d 3d Kc");
        let five = FlushDetector.detect(&a).unwrap();
        assert_eq!(ranks(five), "AJ953");
    }

    #[test]
    fn test_two_pair_detector_with_three_pairs() {
        let a = analyse("Jc Jd 4c 4h 3s 3d 2h");
        let five = TwoPairDetector.detect(&a).unwrap();
        assert_eq!(ranks(five), "JJ443");
    }

    #[test]
    fn test_high_card_always_matches() {
        let a = analyse("Ah Kd 7s 5c 2d 9h 3c");
        let five = HighCardDetector.detect(&a).unwrap();
        assert_eq!(ranks(five), "AK975");
        assert!(OnePairDetector.detect(&a).is_none());
    }

    #[test]
    fn test_detectors_order() {
        let categories: Vec<Category> = DETECTORS.iter().map(|d| d.category()).collect();
        let mut sorted = categories.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(categories, sorted);
        assert_eq!(categories.len(), 10);
    }
}
