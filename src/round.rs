//! One hand of betting: blinds, a betting cycle per stage, then payout.
//!
//! The round borrows the seated players and their decision sources for the duration of
//! the hand and owns the community cards and the [`PotManager`]. Decisions are requested
//! one seat at a time in seat order; nothing runs concurrently.

use crate::agents::{Decision, DecisionRequest, DecisionSource};
use crate::evaluator::{winners_among, EvalError, Evaluation, HandEvaluator};
use crate::hand::CommunityCards;
use crate::player::{Player, SeatId};
use crate::pot::{Payout, PayoutKind, PotError, PotManager};
use tracing::{debug, info, trace_span, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum Stage {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Stage {
    /// Community cards turned face up when the stage begins.
    pub const fn reveal_count(self) -> usize {
        match self {
            Stage::PreFlop => 0,
            Stage::Flop => 3,
            Stage::Turn => 1,
            Stage::River => 1,
            Stage::Showdown => 0,
        }
    }

    /// The following stage. Showdown is terminal.
    pub const fn next(self) -> Stage {
        match self {
            Stage::PreFlop => Stage::Flop,
            Stage::Flop => Stage::Turn,
            Stage::Turn => Stage::River,
            Stage::River | Stage::Showdown => Stage::Showdown,
        }
    }
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Stage::PreFlop => "pre-flop",
            Stage::Flop => "flop",
            Stage::Turn => "turn",
            Stage::River => "river",
            Stage::Showdown => "showdown",
        };
        f.pad(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HistoryVerb {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    RaiseTo,
    Win,
    Split,
    Refund,
    /// The decision source failed and the seat was folded for it.
    TimeoutFold,
}

impl HistoryVerb {
    /// Short text used when a history line is printed.
    pub fn label(self) -> &'static str {
        match self {
            HistoryVerb::SmallBlind => "SB",
            HistoryVerb::BigBlind => "BB",
            HistoryVerb::Fold => "Fold",
            HistoryVerb::Check => "Check",
            HistoryVerb::Call => "Call",
            HistoryVerb::RaiseTo => "Raise to",
            HistoryVerb::Win => "Win",
            HistoryVerb::Split => "Split",
            HistoryVerb::Refund => "Refund",
            HistoryVerb::TimeoutFold => "Fold (timeout)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HistoryEntry {
    pub seat: SeatId,
    pub verb: HistoryVerb,
    pub amount: Option<u64>,
    pub stage: Stage,
}

/// Renders as `pre-flop  seat 1  BB 10`.
impl core::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = self.verb.label();
        write!(f, "{:<10}seat {}  {label}", self.stage, self.seat)?;
        match self.amount {
            Some(amount) => write!(f, " {amount}"),
            None => Ok(()),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("seat {seat} made an invalid decision ({decision}): {reason}")]
    InvalidDecision {
        seat: SeatId,
        decision: Decision,
        reason: String,
    },
    #[error(transparent)]
    Pot(#[from] PotError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("{players} players but {agents} decision sources")]
    SeatCountMismatch { players: usize, agents: usize },
    #[error("need at least two players in the hand, got {0}")]
    NotEnoughPlayers(usize),
    #[error("seat {0} reached showdown without hole cards")]
    MissingHoleCards(SeatId),
    #[error("showdown needs five community cards, {revealed} revealed")]
    BoardIncomplete { revealed: usize },
}

/// Forced bet sizes for a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blinds {
    pub small: u64,
    pub big: u64,
}

/// How a betting cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Every active player matched the bet. `passes` is 0 when nobody could act.
    Settled { passes: usize },
    /// All but one player folded.
    Uncontested { winner: SeatId },
}

/// Chips paid out at the end of the hand and the hands that were shown for them.
#[derive(Debug, Clone, Default)]
pub struct Settlement {
    pub payouts: Vec<Payout>,
    pub evaluations: Vec<(SeatId, Evaluation)>,
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct RoundOutcome {
    pub payouts: Vec<Payout>,
    pub evaluations: Vec<(SeatId, Evaluation)>,
    /// True when hands were evaluated, false when everyone else folded.
    pub showdown: bool,
    pub ended_at: Stage,
    /// Seats that won or split at least one pot.
    pub winners: Vec<SeatId>,
    pub history: Vec<HistoryEntry>,
}

pub struct Round<'a, P: Player> {
    players: &'a mut [P],
    agents: &'a mut [Box<dyn DecisionSource>],
    community: CommunityCards,
    pots: PotManager,
    stage: Stage,
    current_bet: u64,
    stage_contrib: Vec<u64>,
    blinds: Blinds,
    dealer: SeatId,
    bb_seat: Option<SeatId>,
    history: Vec<HistoryEntry>,
}

impl<'a, P: Player> Round<'a, P> {
    /// Set up a hand. Seats that are already folded (sitting out) take no part.
    /// `community` holds the cards to be revealed as the stages advance.
    pub fn new(
        players: &'a mut [P],
        agents: &'a mut [Box<dyn DecisionSource>],
        community: CommunityCards,
        blinds: Blinds,
        dealer: SeatId,
    ) -> Result<Self, RoundError> {
        if players.len() != agents.len() {
            return Err(RoundError::SeatCountMismatch {
                players: players.len(),
                agents: agents.len(),
            });
        }
        let live: Vec<SeatId> = (0..players.len())
            .filter(|&s| !players[s].is_folded())
            .collect();
        if live.len() < 2 {
            return Err(RoundError::NotEnoughPlayers(live.len()));
        }
        let n = players.len();
        Ok(Self {
            pots: PotManager::new(n, live),
            stage_contrib: vec![0; n],
            players,
            agents,
            community,
            stage: Stage::PreFlop,
            current_bet: 0,
            blinds,
            dealer: dealer % n,
            bb_seat: None,
            history: Vec::new(),
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn pots(&self) -> &PotManager {
        &self.pots
    }

    pub fn community(&self) -> &CommunityCards {
        &self.community
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn big_blind_seat(&self) -> Option<SeatId> {
        self.bb_seat
    }

    /// Seats still contesting the pot.
    pub fn remaining_players(&self) -> Vec<SeatId> {
        (0..self.players.len())
            .filter(|&s| !self.players[s].is_folded())
            .collect()
    }

    fn next_live(&self, from: SeatId) -> SeatId {
        let n = self.players.len();
        (1..=n)
            .map(|k| (from + k) % n)
            .find(|&s| !self.players[s].is_folded())
            .unwrap_or(from)
    }

    /// Post the small and big blinds. Heads-up the dealer posts the small blind.
    pub fn collect_blinds(&mut self) -> Result<(), RoundError> {
        let heads_up = self.remaining_players().len() == 2;
        let sb = if heads_up && !self.players[self.dealer].is_folded() {
            self.dealer
        } else {
            self.next_live(self.dealer)
        };
        let bb = self.next_live(sb);

        let paid_sb = self.pay(sb, self.blinds.small)?;
        self.record(sb, HistoryVerb::SmallBlind, Some(paid_sb));
        let paid_bb = self.pay(bb, self.blinds.big)?;
        self.record(bb, HistoryVerb::BigBlind, Some(paid_bb));

        self.bb_seat = Some(bb);
        self.current_bet = paid_sb.max(paid_bb);
        debug!(sb, bb, paid_sb, paid_bb, "blinds posted");
        Ok(())
    }

    fn can_act(&self, seat: SeatId) -> bool {
        !self.players[seat].is_folded() && !self.players[seat].is_all_in()
    }

    fn to_call(&self, seat: SeatId) -> u64 {
        self.current_bet.saturating_sub(self.stage_contrib[seat])
    }

    /// True when some seat still has a decision to make this stage.
    fn needs_action(&self) -> bool {
        let mut actors = (0..self.players.len()).filter(|&s| self.can_act(s));
        match (actors.next(), actors.next()) {
            (None, _) => false,
            (Some(only), None) => self.to_call(only) > 0,
            _ => true,
        }
    }

    fn sole_remaining(&self) -> Option<SeatId> {
        match self.remaining_players().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Run full passes over the table until a pass ends with no raise or only one player
    /// is left.
    ///
    /// Every stage's pass starts at the seat after the big blind, or after the dealer when
    /// no blinds were posted. Heads-up the dealer posts the small blind, so the dealer acts
    /// first on every street, the flop included.
    pub fn start_betting_cycle(&mut self) -> Result<CycleOutcome, RoundError> {
        if let Some(winner) = self.sole_remaining() {
            return Ok(CycleOutcome::Uncontested { winner });
        }
        let n = self.players.len();
        let start = match self.bb_seat {
            Some(bb) => (bb + 1) % n,
            None => (self.dealer + 1) % n,
        };

        let mut passes = 0;
        while self.needs_action() {
            passes += 1;
            let mut raised = false;
            for k in 0..n {
                let seat = (start + k) % n;
                if !self.can_act(seat) {
                    continue;
                }
                let decision = self.request(seat);
                raised |= self.apply(seat, decision)?;
                if let Some(winner) = self.sole_remaining() {
                    debug!(winner, stage = %self.stage, "all others folded");
                    return Ok(CycleOutcome::Uncontested { winner });
                }
            }
            if !raised {
                break;
            }
        }
        Ok(CycleOutcome::Settled { passes })
    }

    fn request(&mut self, seat: SeatId) -> Decision {
        let request = DecisionRequest {
            seat,
            stage: self.stage,
            current_bet: self.current_bet,
            to_call: self.to_call(seat),
            chips: self.players[seat].chips(),
            pot_total: self.pots.total(),
            community: self.community.revealed().to_vec(),
            hole: self.players[seat].hand(),
        };
        match self.agents[seat].request_decision(&request) {
            Ok(decision) => decision,
            Err(err) => {
                warn!(seat, error = %err, "decision source failed, folding seat");
                self.players[seat].fold();
                self.record(seat, HistoryVerb::TimeoutFold, None);
                Decision::Fold
            }
        }
    }

    /// Apply a decision. Returns true when it raised the stage bet.
    fn apply(&mut self, seat: SeatId, decision: Decision) -> Result<bool, RoundError> {
        let owed = self.to_call(seat);
        match decision {
            Decision::Fold => {
                if !self.players[seat].is_folded() {
                    self.players[seat].fold();
                    self.record(seat, HistoryVerb::Fold, None);
                }
                Ok(false)
            }
            Decision::Check if owed > 0 => Err(RoundError::InvalidDecision {
                seat,
                decision,
                reason: format!("cannot check while owing {owed}"),
            }),
            Decision::Check | Decision::Call if owed == 0 => {
                self.record(seat, HistoryVerb::Check, None);
                Ok(false)
            }
            Decision::Check | Decision::Call => {
                let paid = self.pay(seat, owed)?;
                self.record(seat, HistoryVerb::Call, Some(paid));
                Ok(false)
            }
            Decision::Raise(to) => {
                if to <= self.current_bet {
                    return Err(RoundError::InvalidDecision {
                        seat,
                        decision,
                        reason: format!("raise must exceed current bet {}", self.current_bet),
                    });
                }
                self.pay(seat, to - self.stage_contrib[seat])?;
                let reached = self.stage_contrib[seat];
                let raised = reached > self.current_bet;
                if raised {
                    self.current_bet = reached;
                    self.record(seat, HistoryVerb::RaiseTo, Some(reached));
                } else {
                    self.record(seat, HistoryVerb::Call, Some(reached));
                }
                Ok(raised)
            }
        }
    }

    /// Move up to `amount` chips from the seat into the pots.
    fn pay(&mut self, seat: SeatId, amount: u64) -> Result<u64, RoundError> {
        let paid = self.players[seat].deduct_chips(amount);
        self.stage_contrib[seat] += paid;
        self.pots.add_contribution(seat, paid, &*self.players)?;
        debug!(
            seat,
            paid,
            stage_total = self.stage_contrib[seat],
            current_bet = self.current_bet,
            all_in = self.players[seat].is_all_in(),
            "chips committed"
        );
        Ok(paid)
    }

    /// Enter the next stage and turn its community cards face up.
    pub fn advance_stage(&mut self) -> Stage {
        self.stage = self.stage.next();
        let revealed = self.community.reveal(self.stage.reveal_count()).len();
        self.current_bet = 0;
        self.stage_contrib.iter_mut().for_each(|c| *c = 0);
        debug!(stage = %self.stage, revealed, "stage advanced");
        self.stage
    }

    /// Pay out every pot. A lone remaining player takes everything without evaluation;
    /// otherwise each pot goes to the best hand among its own eligible players.
    pub fn determine_and_pay_winners(&mut self) -> Result<Settlement, RoundError> {
        let remaining = self.remaining_players();
        if remaining.len() <= 1 {
            let payouts = self
                .pots
                .distribute_winnings(&remaining, self.players, self.dealer)?;
            self.record_payouts(&payouts);
            return Ok(Settlement {
                payouts,
                evaluations: Vec::new(),
            });
        }

        if !self.community.is_complete() {
            let revealed = self.community.revealed().len();
            return Err(RoundError::BoardIncomplete { revealed });
        }
        let board = self.community.revealed().to_vec();
        let evaluations = remaining
            .iter()
            .map(|&seat| {
                let missing = RoundError::MissingHoleCards(seat);
                let hole = self.players[seat].hand().ok_or(missing)?;
                Ok((seat, HandEvaluator::evaluate_hand(&hole, &board)?))
            })
            .collect::<Result<Vec<_>, RoundError>>()?;
        for (seat, eval) in &evaluations {
            debug!(seat, category = %eval.category, "hand shown");
        }

        let best_of = |contenders: &[SeatId]| {
            let shown: Vec<(SeatId, Evaluation)> = evaluations
                .iter()
                .filter(|(s, _)| contenders.contains(s))
                .copied()
                .collect();
            winners_among(&shown)
        };
        let payouts = self
            .pots
            .distribute_with(self.players, self.dealer, best_of)?;
        self.record_payouts(&payouts);
        Ok(Settlement {
            payouts,
            evaluations,
        })
    }

    /// Play the hand to completion.
    pub fn play(mut self) -> Result<RoundOutcome, RoundError> {
        let players = self.remaining_players().len();
        info!(dealer = self.dealer, players, "hand started");
        self.collect_blinds()?;

        let mut contested = true;
        loop {
            let span = trace_span!("stage", stage = %self.stage);
            let _guard = span.enter();
            if let CycleOutcome::Uncontested { .. } = self.start_betting_cycle()? {
                contested = false;
                break;
            }
            if self.stage == Stage::River {
                self.advance_stage();
                break;
            }
            self.advance_stage();
        }

        let ended_at = self.stage;
        let settlement = self.determine_and_pay_winners()?;
        let mut winners: Vec<SeatId> = settlement
            .payouts
            .iter()
            .filter(|p| p.kind != PayoutKind::Refund)
            .map(|p| p.seat)
            .collect();
        winners.sort_unstable();
        winners.dedup();
        info!(?winners, stage = %ended_at, showdown = contested, "hand finished");

        Ok(RoundOutcome {
            payouts: settlement.payouts,
            evaluations: settlement.evaluations,
            showdown: contested,
            ended_at,
            winners,
            history: self.history,
        })
    }

    fn record(&mut self, seat: SeatId, verb: HistoryVerb, amount: Option<u64>) {
        self.history.push(HistoryEntry {
            seat,
            verb,
            amount,
            stage: self.stage,
        });
    }

    fn record_payouts(&mut self, payouts: &[Payout]) {
        for p in payouts {
            let verb = match p.kind {
                PayoutKind::Win => HistoryVerb::Win,
                PayoutKind::Split => HistoryVerb::Split,
                PayoutKind::Refund => HistoryVerb::Refund,
            };
            info!(seat = p.seat, amount = p.amount, kind = ?p.kind, "payout");
            self.record(p.seat, verb, Some(p.amount));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{CallingAgent, ScriptedAgent};
    use crate::player::TablePlayer;

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
        "2c 7d 9h Js Kc".parse().unwrap()
    }

    fn callers(n: usize) -> Vec<Box<dyn DecisionSource>> {
        (0..n)
            .map(|_| Box::new(CallingAgent) as Box<dyn DecisionSource>)
            .collect()
    }

    /// A round with the blinds already posted.
    fn blinded<'a>(
        players: &'a mut [TablePlayer],
        agents: &'a mut [Box<dyn DecisionSource>],
        cards: CommunityCards,
        dealer: SeatId,
    ) -> Round<'a, TablePlayer> {
        let mut round = Round::new(players, agents, cards, BLINDS, dealer).unwrap();
        round.collect_blinds().unwrap();
        round
    }

    const BLINDS: Blinds = Blinds { small: 5, big: 10 };

    #[test]
    fn stage_order_and_reveals() {
        let mut s = Stage::PreFlop;
        let mut total = 0;
        while s != Stage::Showdown {
            s = s.next();
            total += s.reveal_count();
        }
        assert_eq!(total, 5);
        assert_eq!(Stage::Showdown.next(), Stage::Showdown);
    }

    #[test]
    fn blinds_follow_dealer() {
        let mut players = seats(&[100, 100, 100]);
        let mut agents = callers(3);
        let round = blinded(&mut players, &mut agents, board(), 0);
        assert_eq!(round.big_blind_seat(), Some(2));
        assert_eq!(round.current_bet(), 10);
        assert_eq!(round.pots().total(), 15);
        assert_eq!(round.history()[0].seat, 1);
    }

    #[test]
    fn heads_up_dealer_posts_small_blind() {
        let mut players = seats(&[100, 100]);
        let mut agents = callers(2);
        let round = blinded(&mut players, &mut agents, board(), 1);
        assert_eq!(round.history()[0].verb, HistoryVerb::SmallBlind);
        assert_eq!(round.history()[0].seat, 1);
        assert_eq!(round.big_blind_seat(), Some(0));
    }

    #[test]
    fn check_while_owing_is_invalid() {
        let mut players = seats(&[100, 100]);
        let mut agents: Vec<Box<dyn DecisionSource>> = vec![
            Box::new(ScriptedAgent::new(vec![Decision::Check])),
            Box::new(ScriptedAgent::new(vec![Decision::Check])),
        ];
        let mut round = blinded(&mut players, &mut agents, board(), 0);
        // seat 0 is the dealer and small blind, first to act heads-up pre-flop
        let err = round.start_betting_cycle().unwrap_err();
        assert!(matches!(err, RoundError::InvalidDecision { seat: 0, .. }));
    }

    #[test]
    fn raise_not_above_current_bet_is_invalid() {
        let mut players = seats(&[100, 100]);
        let mut agents: Vec<Box<dyn DecisionSource>> = vec![
            Box::new(ScriptedAgent::new(vec![Decision::Raise(10)])),
            Box::new(CallingAgent),
        ];
        let mut round = blinded(&mut players, &mut agents, board(), 0);
        let err = round.start_betting_cycle().unwrap_err();
        let RoundError::InvalidDecision { seat, decision, .. } = &err else {
            panic!("unexpected error {err:?}");
        };
        assert_eq!((*seat, *decision), (0, Decision::Raise(10)));
    }

    #[test]
    fn mismatched_agents_rejected() {
        let mut players = seats(&[100, 100]);
        let mut agents = callers(1);
        let round = Round::new(&mut players, &mut agents, board(), BLINDS, 0);
        let Err(err) = round else {
            panic!("round accepted one decision source for two seats");
        };
        let expected = RoundError::SeatCountMismatch {
            players: 2,
            agents: 1,
        };
        assert_eq!(err, expected);
    }

    #[test]
    fn showdown_needs_full_board() {
        let mut players = seats(&[100, 100]);
        players[0].deal("As Ad".parse().unwrap());
        players[1].deal("Ks Kd".parse().unwrap());
        let mut agents = callers(2);
        let community: CommunityCards = "2c 7d 9h".parse().unwrap();
        let mut round = blinded(&mut players, &mut agents, community, 0);
        assert_eq!(
            round.determine_and_pay_winners().unwrap_err(),
            RoundError::BoardIncomplete { revealed: 0 }
        );
    }
}
