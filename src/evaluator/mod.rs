//! Seven-card Hold'em hand evaluation.
//!
//! A 7-card set is analysed once (rank groups, flush suit, straights) and then offered to
//! the category detectors strongest first; the first match produces the
//! [`Evaluation`]. Its `best_five` cards are arranged so that comparing two
//! evaluations of the same category card by card settles the tie.

pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::Card;
use crate::hand::{validate_holdem, CommunityCards, HandError, HoleCards};
use crate::player::SeatId;
use core::cmp::Ordering;

/// Compact, comparable hand strength. Higher is better.
/// Encodes the category and the ranks of the ordered best five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u64);

/// Poker hand category from weakest to strongest. The discriminant is the hand rank 0..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "high card",
            Category::Pair => "one pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
            Category::RoyalFlush => "royal flush",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of evaluating a hand. Ordering and equality use `value` only, so suits never
/// break ties.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct Evaluation {
    pub category: Category,
    /// The five cards that make the hand, in tie-break order.
    pub best_five: [Card; 5],
    value: HandValue,
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Evaluation {}

impl Evaluation {
    pub(crate) fn new(category: Category, best_five: [Card; 5]) -> Self {
        let value = HandValue::from_parts(category, &best_five);
        Self {
            category,
            best_five,
            value,
        }
    }

    /// Hand rank 0 (high card) ..= 9 (royal flush).
    pub const fn rank(&self) -> u8 {
        self.category.ordinal()
    }

    /// Return the packed comparable value for ordering/caching.
    pub const fn value(&self) -> HandValue {
        self.value
    }
}

impl HandValue {
    /// Return the packed comparable value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack a category and the ranks of five ordered cards into a comparable value.
    pub fn from_parts(category: Category, ordered: &[Card; 5]) -> Self {
        // Layout (most significant -> least):
        // [ category (8 bits) | r0 (6) | r1 (6) | r2 (6) | r3 (6) | r4 (6) | 10 zero bits ]
        const CAT_SHIFT: u32 = 48;
        const RANK_STRIDE: u32 = 6;
        let mut v: u64 = (category as u64) << CAT_SHIFT;
        for (i, c) in ordered.iter().enumerate() {
            let offset = CAT_SHIFT - RANK_STRIDE * (i as u32 + 1);
            v |= (c.rank().value() as u64) << offset;
        }
        HandValue(v)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("not enough cards to evaluate: need 5 community cards, got {0}")]
    NotEnoughCards(usize),
}

/// Evaluate a Hold'em hand: two hole cards plus exactly five community cards.
///
/// ```
/// use holdem_core::cards::{Card, Rank, Suit};
/// use holdem_core::evaluator::{evaluate_holdem, Category};
/// use holdem_core::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spade),
///     Card::new(Rank::Ace, Suit::Heart),
/// ).unwrap();
/// let community = [
///     Card::new(Rank::Queen, Suit::Club),
///     Card::new(Rank::Jack, Suit::Diamond),
///     Card::new(Rank::Nine, Suit::Heart),
///     Card::new(Rank::Three, Suit::Spade),
///     Card::new(Rank::Two, Suit::Club),
/// ];
/// let eval = evaluate_holdem(&hole, &community).unwrap();
/// assert_eq!(eval.category, Category::Pair);
/// assert_eq!(eval.rank(), 1);
/// ```
pub fn evaluate_holdem(hole: &HoleCards, community: &[Card]) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, community)?;
    if community.len() < CommunityCards::FULL {
        return Err(EvalError::NotEnoughCards(community.len()));
    }
    let seven = [
        hole.first(),
        hole.second(),
        community[0],
        community[1],
        community[2],
        community[3],
        community[4],
    ];
    Ok(evaluate_seven(&seven))
}

/// Evaluate seven cards directly: classify once, strongest category first.
pub fn evaluate_seven(cards: &[Card; 7]) -> Evaluation {
    use detector::DETECTORS;
    use hand_analysis::HandAnalysis;

    let analysis = HandAnalysis::new(cards);
    for detector in DETECTORS.iter() {
        if let Some(best_five) = detector.detect(&analysis) {
            return Evaluation::new(detector.category(), best_five);
        }
    }
    // HighCardDetector always matches; kept total for the type checker.
    Evaluation::new(Category::HighCard, analysis.assemble(&[]))
}

/// Compare two Hold'em hands on shared community cards.
///
/// ```
/// use holdem_core::evaluator::compare_holdem;
/// use holdem_core::hand::HoleCards;
/// use holdem_core::cards::parse_cards;
/// use std::cmp::Ordering;
///
/// let community = parse_cards("Qc Jd 9h 3s 2c").unwrap();
/// let a: HoleCards = "As Ah".parse().unwrap();
/// let b: HoleCards = "Ks Kh".parse().unwrap();
/// assert_eq!(compare_holdem(&a, &b, &community).unwrap(), Ordering::Greater);
/// ```
pub fn compare_holdem(
    a: &HoleCards,
    b: &HoleCards,
    community: &[Card],
) -> Result<Ordering, EvalError> {
    let va = evaluate_holdem(a, community)?;
    let vb = evaluate_holdem(b, community)?;
    Ok(va.cmp(&vb))
}

/// Seats holding a maximal evaluation. More than one seat means a split.
pub fn winners_among(evaluations: &[(SeatId, Evaluation)]) -> Vec<SeatId> {
    let Some(best) = evaluations.iter().map(|(_, e)| *e).max() else {
        return Vec::new();
    };
    evaluations
        .iter()
        .filter(|(_, e)| *e == best)
        .map(|(seat, _)| *seat)
        .collect()
}

/// Entry point used by the betting round at showdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandEvaluator;

impl HandEvaluator {
    pub fn evaluate_hand(hole: &HoleCards, community: &[Card]) -> Result<Evaluation, EvalError> {
        evaluate_holdem(hole, community)
    }

    /// Evaluate every hand and return the seats whose evaluation is maximal under
    /// (category, then the ordered best five card by card).
    pub fn determine_winners(
        hands: &[(SeatId, HoleCards)],
        community: &[Card],
    ) -> Result<Vec<SeatId>, EvalError> {
        let evaluations = hands
            .iter()
            .map(|(seat, hole)| Ok((*seat, evaluate_holdem(hole, community)?)))
            .collect::<Result<Vec<_>, EvalError>>()?;
        Ok(winners_among(&evaluations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Rank, Suit};

    fn seven(s: &str) -> [Card; 7] {
        let cards = parse_cards(s).expect("valid cards");
        cards.try_into().expect("seven cards")
    }

    fn ranks(e: &Evaluation) -> String {
        e.best_five.iter().map(|c| c.rank().to_char()).collect()
    }

    #[test]
    fn not_enough_cards_errors() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let community = parse_cards("2c").unwrap();
        let err = evaluate_holdem(&hole, &community).unwrap_err();
        assert_eq!(err, EvalError::NotEnoughCards(1));
    }

    #[test]
    fn overlapping_cards_error() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let community = parse_cards("As 2c 3d 4h 9s").unwrap();
        let err = evaluate_holdem(&hole, &community).unwrap_err();
        assert!(matches!(err, EvalError::InvalidHand(HandError::Overlap)));
    }

    #[test]
    fn every_category_from_seven_cards() {
        let cases = [
            ("Ts Js Qs Ks As 2d 3c", Category::RoyalFlush),
            ("9h 8h 7h 6h 5h Ac Ad", Category::StraightFlush),
            ("Kc Kd Kh Ks 2s 3d 4c", Category::FourOfAKind),
            ("Tc Td Th 2s 2h 9c 8d", Category::FullHouse),
            ("Ah 9h 7h 3h 2h Kc Qd", Category::Flush),
            ("Ac 2d 3h 4s 5c Kd Kh", Category::Straight),
            ("Qc Qd Qh 9s 2c 5d 7h", Category::ThreeOfAKind),
            ("Jc Jd 9c 9h 2s 4d 6h", Category::TwoPair),
            ("Ah Ad Ts 9c 2d 4s 6h", Category::Pair),
            ("Ah Kd 7s 5c 2d 9h 3c", Category::HighCard),
        ];
        for (cards, expected) in cases {
            let e = evaluate_seven(&seven(cards));
            assert_eq!(e.category, expected, "{cards}");
            assert_eq!(e.rank(), expected.ordinal());
        }
    }

    #[test]
    fn wheel_orders_ace_last() {
        let e = evaluate_seven(&seven("Ac 2d 3h 4s 5c Kd Qh"));
        assert_eq!(e.category, Category::Straight);
        assert_eq!(ranks(&e), "5432A");
    }

    #[test]
    fn two_triples_make_full_house_with_higher_triple() {
        let e = evaluate_seven(&seven("9c 9d 9h 4s 4c 4d Kh"));
        assert_eq!(e.category, Category::FullHouse);
        assert_eq!(ranks(&e), "99944");
    }

    #[test]
    fn three_pairs_keep_best_kicker() {
        let e = evaluate_seven(&seven("Kc Kd 8h 8s 5c 5d 2h"));
        assert_eq!(e.category, Category::TwoPair);
        assert_eq!(ranks(&e), "KK885");
    }

    #[test]
    fn straight_flush_uses_flush_suit_only() {
        // Off-suit 9 would extend the straight, but only hearts count for the straight flush.
        let e = evaluate_seven(&seven("4h 5h 6h 7h 8h 9c Th"));
        assert_eq!(e.category, Category::StraightFlush);
        assert!(e.best_five.iter().all(|c| c.suit() == Suit::Heart));
        assert_eq!(e.best_five[0].rank(), Rank::Eight);
    }

    #[test]
    fn winners_among_reports_ties() {
        let board = parse_cards("Ac Kd Qh Js 2c").unwrap();
        let a: HoleCards = "Tc 3d".parse().unwrap();
        let b: HoleCards = "Th 4s".parse().unwrap();
        let c: HoleCards = "9c 9d".parse().unwrap();
        let hands = [(0, a), (1, b), (2, c)];
        let winners = HandEvaluator::determine_winners(&hands, &board).unwrap();
        assert_eq!(winners, vec![0, 1]);
        assert!(winners_among(&[]).is_empty());
    }
}
