use holdem_core::agents::{
    CallingAgent, Decision, DecisionError, DecisionRequest, DecisionSource, FoldingAgent,
    ScriptedAgent,
};
use holdem_core::hand::CommunityCards;
use holdem_core::player::{Player, PlayerStatus, TablePlayer};
use holdem_core::pot::PayoutKind;
use holdem_core::round::{Blinds, CycleOutcome, HistoryEntry, HistoryVerb, Round, RoundError, Stage};
use std::time::Duration;

const BLINDS: Blinds = Blinds { small: 5, big: 10 };

fn seats(stacks: &[u64]) -> Vec<TablePlayer> {
    stacks
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let mut p = TablePlayer::new(format!("p{i}"), c);
            p.reset_for_hand();
            p
        })
        .collect()
}

fn board() -> CommunityCards {
    "2c 7d 9h Js 3c".parse().unwrap()
}

fn boxed(agent: impl DecisionSource + 'static) -> Box<dyn DecisionSource> {
    Box::new(agent)
}

fn script(decision: Decision) -> Box<dyn DecisionSource> {
    boxed(ScriptedAgent::new(vec![decision]))
}

fn callers(n: usize) -> Vec<Box<dyn DecisionSource>> {
    (0..n).map(|_| boxed(CallingAgent)).collect()
}

/// A round with the button on seat 0.
fn new_round<'a>(
    players: &'a mut [TablePlayer],
    agents: &'a mut [Box<dyn DecisionSource>],
    cards: CommunityCards,
) -> Round<'a, TablePlayer> {
    Round::new(players, agents, cards, BLINDS, 0).unwrap()
}

struct Stalled;

impl DecisionSource for Stalled {
    fn request_decision(&mut self, _: &DecisionRequest) -> Result<Decision, DecisionError> {
        Err(DecisionError::TimedOut(Duration::from_millis(5)))
    }
}

#[test_log::test]
fn all_checks_settle_after_one_pass() {
    let mut players = seats(&[100, 100, 100]);
    let mut agents = callers(3);
    let mut round = new_round(&mut players, &mut agents, board());
    assert_eq!(round.advance_stage(), Stage::Flop);
    assert_eq!(round.community().revealed().len(), 3);
    let cycle = round.start_betting_cycle().unwrap();
    assert_eq!(cycle, CycleOutcome::Settled { passes: 1 });
    assert_eq!(round.pots().total(), 0);
}

#[test_log::test]
fn single_raise_adds_exactly_one_pass() {
    let mut players = seats(&[100, 100, 100]);
    let mut agents = vec![
        boxed(CallingAgent),
        script(Decision::Raise(20)),
        boxed(CallingAgent),
    ];
    let mut round = new_round(&mut players, &mut agents, board());
    round.advance_stage();
    let cycle = round.start_betting_cycle().unwrap();
    assert_eq!(cycle, CycleOutcome::Settled { passes: 2 });
    assert_eq!(round.current_bet(), 20);
    assert_eq!(round.pots().total(), 60);
}

#[test_log::test]
fn fold_out_ends_hand_without_evaluation() {
    // nobody holds cards: evaluating any hand would fail with MissingHoleCards
    let mut players = seats(&[100, 100, 100]);
    let mut agents = vec![
        boxed(FoldingAgent),
        boxed(FoldingAgent),
        boxed(CallingAgent),
    ];
    let round = new_round(&mut players, &mut agents, board());
    let outcome = round.play().unwrap();

    assert!(!outcome.showdown);
    assert_eq!(outcome.ended_at, Stage::PreFlop);
    assert!(outcome.evaluations.is_empty());
    assert_eq!(outcome.winners, vec![2]);
    assert_eq!(outcome.payouts.len(), 1);
    assert_eq!(outcome.payouts[0].amount, 15);
    assert_eq!(outcome.payouts[0].kind, PayoutKind::Win);
    assert_eq!(players[2].chips(), 105);
    assert_eq!(players[1].chips(), 95);
    assert_eq!(players[0].chips(), 100);
}

#[test_log::test]
fn fold_mid_cycle_stops_before_remaining_seats_act() {
    let mut players = seats(&[100, 100]);
    let mut agents = vec![script(Decision::Fold), script(Decision::Raise(999))];
    let mut round = new_round(&mut players, &mut agents, board());
    round.collect_blinds().unwrap();
    let cycle = round.start_betting_cycle().unwrap();
    assert_eq!(cycle, CycleOutcome::Uncontested { winner: 1 });
    assert_eq!(round.remaining_players(), vec![1]);
    // seat 1 never got to act on its raise
    let verbs: Vec<HistoryVerb> = round.history().iter().map(|h| h.verb).collect();
    assert!(!verbs.contains(&HistoryVerb::RaiseTo));
}

#[test_log::test]
fn stalled_decision_source_is_folded() {
    let mut players = seats(&[100, 100]);
    let mut agents = vec![boxed(Stalled), boxed(CallingAgent)];
    let round = new_round(&mut players, &mut agents, board());
    let outcome = round.play().unwrap();

    assert_eq!(outcome.winners, vec![1]);
    let timed_out = |h: &HistoryEntry| h.seat == 0 && h.verb == HistoryVerb::TimeoutFold;
    assert!(outcome.history.iter().any(timed_out));
    assert_eq!(players[0].status(), PlayerStatus::Folded);
    assert_eq!(players[0].chips(), 95);
    assert_eq!(players[1].chips(), 105);
}

#[test_log::test]
fn malformed_decision_aborts_round() {
    let mut players = seats(&[100, 100, 100]);
    let mut agents = vec![
        script(Decision::Check),
        boxed(CallingAgent),
        boxed(CallingAgent),
    ];
    let round = new_round(&mut players, &mut agents, board());
    let err = round.play().unwrap_err();
    let RoundError::InvalidDecision { seat, decision, .. } = &err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!((*seat, *decision), (0, Decision::Check));
}

#[test_log::test]
fn three_way_all_in_pays_each_side_pot() {
    let mut players = seats(&[50, 100, 200]);
    players[0].deal("As Ad".parse().unwrap());
    players[1].deal("Ks Kd".parse().unwrap());
    players[2].deal("Qs Qd".parse().unwrap());
    let mut agents: Vec<_> = (0..3).map(|_| script(Decision::Raise(1000))).collect();
    let round = new_round(&mut players, &mut agents, board());
    let outcome = round.play().unwrap();

    assert!(outcome.showdown);
    assert_eq!(outcome.ended_at, Stage::Showdown);
    assert_eq!(outcome.evaluations.len(), 3);
    assert_eq!(outcome.winners, vec![0, 1, 2]);
    assert_eq!(outcome.payouts.iter().map(|p| p.amount).sum::<u64>(), 350);
    assert_eq!(players[0].chips(), 150);
    assert_eq!(players[1].chips(), 100);
    assert_eq!(players[2].chips(), 100);
}

#[test_log::test]
fn kicker_decides_showdown() {
    let mut players = seats(&[100, 100]);
    players[0].deal("Ac Qh".parse().unwrap());
    players[1].deal("Ah Th".parse().unwrap());
    let mut agents = callers(2);
    let community: CommunityCards = "As Kd 8c 5s 2h".parse().unwrap();
    let round = new_round(&mut players, &mut agents, community);
    let outcome = round.play().unwrap();
    assert_eq!(outcome.winners, vec![0]);
    assert_eq!(players[0].chips(), 110);
    assert_eq!(players[1].chips(), 90);
}

#[test_log::test]
fn all_in_players_are_skipped() {
    let mut players = seats(&[10, 100, 100]);
    let mut agents = vec![
        script(Decision::Raise(50)),
        boxed(CallingAgent),
        boxed(CallingAgent),
    ];
    let mut round = new_round(&mut players, &mut agents, board());
    round.collect_blinds().unwrap();
    // seat 0 shoves 10 against a 10 big blind: no raise, one pass
    let preflop = round.start_betting_cycle().unwrap();
    assert_eq!(preflop, CycleOutcome::Settled { passes: 1 });
    round.advance_stage();
    let flop = round.start_betting_cycle().unwrap();
    assert_eq!(flop, CycleOutcome::Settled { passes: 1 });
    let acted: Vec<usize> = round
        .history()
        .iter()
        .filter(|h| h.stage == Stage::Flop)
        .map(|h| h.seat)
        .collect();
    assert_eq!(acted, vec![1, 2]);
}

#[test_log::test]
fn heads_up_dealer_acts_first_after_the_flop() {
    let mut players = seats(&[100, 100]);
    let mut agents = callers(2);
    let mut round = new_round(&mut players, &mut agents, board());
    round.collect_blinds().unwrap();
    assert_eq!(round.big_blind_seat(), Some(1));
    round.start_betting_cycle().unwrap();
    round.advance_stage();
    round.start_betting_cycle().unwrap();
    let flop: Vec<usize> = round
        .history()
        .iter()
        .filter(|h| h.stage == Stage::Flop)
        .map(|h| h.seat)
        .collect();
    assert_eq!(flop, vec![0, 1]);
}
