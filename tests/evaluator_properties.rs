use holdem_core::cards::{Card, Rank, Suit};
use holdem_core::evaluator::{evaluate_seven, Category, Evaluation, HandEvaluator};
use holdem_core::hand::HoleCards;
use proptest::prelude::*;
use proptest::sample::subsequence;
use std::cmp::Ordering;

fn full_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s)))
        .collect()
}

fn distinct_cards(n: usize) -> impl Strategy<Value = Vec<Card>> {
    subsequence(full_deck(), n).prop_shuffle()
}

/// Independent five-card key: (category, tie-break ranks), compared lexicographically.
fn five_key(cards: &[Card; 5]) -> (u8, Vec<u8>) {
    let mut vals: Vec<u8> = cards.iter().map(|c| c.rank().value()).collect();
    vals.sort_unstable_by(|a, b| b.cmp(a));
    let flush = cards.iter().all(|c| c.suit() == cards[0].suit());

    let mut uniq = vals.clone();
    uniq.dedup();
    let straight_top = if uniq.len() == 5 && vals[0] - vals[4] == 4 {
        Some(vals[0])
    } else if vals == [14, 5, 4, 3, 2] {
        Some(5)
    } else {
        None
    };

    let count = |v: u8| vals.iter().filter(|&&x| x == v).count() as u8;
    let mut groups: Vec<(u8, u8)> = uniq.iter().map(|&v| (count(v), v)).collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));
    let pattern: Vec<u8> = groups.iter().map(|g| g.0).collect();
    let tiebreak: Vec<u8> = groups.iter().map(|g| g.1).collect();

    match (straight_top, flush) {
        (Some(14), true) => (9, vec![14]),
        (Some(top), true) => (8, vec![top]),
        _ if pattern == [4, 1] => (7, tiebreak),
        _ if pattern == [3, 2] => (6, tiebreak),
        (_, true) => (5, vals),
        (Some(top), false) => (4, vec![top]),
        _ if pattern == [3, 1, 1] => (3, tiebreak),
        _ if pattern == [2, 2, 1] => (2, tiebreak),
        _ if pattern == [2, 1, 1, 1] => (1, tiebreak),
        _ => (0, vals),
    }
}

/// Best key over all 21 five-card subsets.
fn brute_force(cards: &[Card]) -> (u8, Vec<u8>) {
    let mut best: Option<(u8, Vec<u8>)> = None;
    for i in 0..3 {
        for j in (i + 1)..4 {
            for k in (j + 1)..5 {
                for l in (k + 1)..6 {
                    for m in (l + 1)..7 {
                        let key = five_key(&[cards[i], cards[j], cards[k], cards[l], cards[m]]);
                        if best.as_ref().map_or(true, |b| key > *b) {
                            best = Some(key);
                        }
                    }
                }
            }
        }
    }
    best.unwrap()
}

/// Every card except the spade ten through ace.
fn outside_spade_royal() -> Vec<Card> {
    let royal = |c: &Card| c.suit() == Suit::Spade && c.rank() >= Rank::Ten;
    full_deck().into_iter().filter(|c| !royal(c)).collect()
}

fn eval7(cards: &[Card]) -> Evaluation {
    let arr: [Card; 7] = cards.try_into().unwrap();
    evaluate_seven(&arr)
}

proptest! {
    #[test]
    fn category_matches_brute_force(cards in distinct_cards(7)) {
        let eval = eval7(&cards);
        let (reference, _) = brute_force(&cards);
        prop_assert!(eval.rank() <= 9);
        prop_assert_eq!(eval.rank(), reference);
    }

    #[test]
    fn ordering_matches_brute_force(cards in distinct_cards(9)) {
        // two hands sharing the last five cards as the board
        let a: Vec<Card> = cards[0..2].iter().chain(&cards[4..9]).copied().collect();
        let b: Vec<Card> = cards[2..4].iter().chain(&cards[4..9]).copied().collect();
        let expected = brute_force(&a).cmp(&brute_force(&b));
        prop_assert_eq!(eval7(&a).cmp(&eval7(&b)), expected);
    }

    #[test]
    fn best_five_are_drawn_from_input_and_distinct(cards in distinct_cards(7)) {
        let eval = eval7(&cards);
        for (i, c) in eval.best_five.iter().enumerate() {
            prop_assert!(cards.contains(c));
            prop_assert!(!eval.best_five[..i].contains(c));
        }
    }

    #[test]
    fn royal_flush_with_any_two_extra(extra in subsequence(outside_spade_royal(), 2)) {
        let mut cards: Vec<Card> = [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace]
            .iter()
            .map(|&r| Card::new(r, Suit::Spade))
            .collect();
        cards.extend(extra);
        let eval = eval7(&cards);
        prop_assert_eq!(eval.category, Category::RoyalFlush);
        prop_assert_eq!(eval.rank(), 9);
    }

    #[test]
    fn winners_are_exactly_the_maximal_hands(cards in distinct_cards(11)) {
        let community = &cards[6..11];
        let hands: Vec<(usize, HoleCards)> = (0..3)
            .map(|i| (i, HoleCards::try_new(cards[2 * i], cards[2 * i + 1]).unwrap()))
            .collect();
        let winners = HandEvaluator::determine_winners(&hands, community).unwrap();
        let evals: Vec<Evaluation> = hands
            .iter()
            .map(|(_, h)| HandEvaluator::evaluate_hand(h, community).unwrap())
            .collect();
        let best = evals.iter().max().unwrap();
        prop_assert!(!winners.is_empty());
        for (i, e) in evals.iter().enumerate() {
            prop_assert_eq!(winners.contains(&i), e.cmp(best) == Ordering::Equal);
        }
    }
}
