//! A table of seated players that plays hands one after another.

use crate::agents::{AgentKind, DecisionSource};
use crate::cards::Card;
use crate::config::{ConfigError, TableConfig};
use crate::deck::{Deck, DeckError};
use crate::hand::{CommunityCards, HandError, HoleCards};
use crate::player::{Player, SeatId, TablePlayer};
use crate::round::{Round, RoundError, RoundOutcome};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    #[error("need at least two players with chips, got {0}")]
    NotEnoughPlayers(usize),
    #[error("table is full ({0} seats)")]
    TableFull(usize),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    Round(#[from] RoundError),
}

/// Record of one finished hand.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct HandSummary {
    /// 1-based hand counter.
    pub hand_number: u64,
    pub dealer: SeatId,
    pub community: Vec<Card>,
    pub outcome: RoundOutcome,
}

pub struct Table {
    config: TableConfig,
    players: Vec<TablePlayer>,
    agents: Vec<Box<dyn DecisionSource>>,
    dealer: SeatId,
    rng: ChaCha8Rng,
    hands_played: u64,
}

impl core::fmt::Debug for Table {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Table")
            .field("config", &self.config)
            .field("players", &self.players)
            .field("dealer", &self.dealer)
            .field("hands_played", &self.hands_played)
            .finish_non_exhaustive()
    }
}

impl Table {
    pub fn new(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::rng().next_u64()),
        };
        Ok(Self {
            config,
            players: Vec::new(),
            agents: Vec::new(),
            dealer: 0,
            rng,
            hands_played: 0,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn players(&self) -> &[TablePlayer] {
        &self.players
    }

    pub fn dealer(&self) -> SeatId {
        self.dealer
    }

    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    /// Who controls `seat`, if it is occupied.
    pub fn agent_kind(&self, seat: SeatId) -> Option<AgentKind> {
        self.agents.get(seat).map(|agent| agent.kind())
    }

    /// Total chips on the table. Unchanged by any hand.
    pub fn total_chips(&self) -> u64 {
        self.players.iter().map(Player::chips).sum()
    }

    /// Seat a new player with the configured starting stack.
    pub fn seat_player(
        &mut self,
        name: impl Into<String>,
        agent: Box<dyn DecisionSource>,
    ) -> Result<SeatId, TableError> {
        if self.players.len() >= self.config.max_seats {
            return Err(TableError::TableFull(self.config.max_seats));
        }
        let seat = self.players.len();
        info!(seat, kind = ?agent.kind(), "player seated");
        self.players.push(TablePlayer::new(name, self.config.starting_stack));
        self.agents.push(agent);
        Ok(seat)
    }

    /// Deal and play one hand, then move the button.
    pub fn play_hand(&mut self) -> Result<HandSummary, TableError> {
        for p in &mut self.players {
            p.reset_for_hand();
        }
        let funded = self.players.iter().filter(|p| !p.is_folded()).count();
        if funded < 2 {
            return Err(TableError::NotEnoughPlayers(funded));
        }

        let n = self.players.len();
        if self.players[self.dealer].is_folded() {
            self.dealer = self.next_funded(self.dealer);
        }

        let mut deck = Deck::shuffled(&mut self.rng);
        let order: Vec<SeatId> = (1..=n)
            .map(|k| (self.dealer + k) % n)
            .filter(|&s| !self.players[s].is_folded())
            .collect();
        let mut dealt: Vec<Vec<Card>> = vec![Vec::with_capacity(2); n];
        for _ in 0..2 {
            for &seat in &order {
                dealt[seat].extend(deck.deal_n(1)?);
            }
        }
        for &seat in &order {
            let hole = HoleCards::from_slice(&dealt[seat])?;
            self.players[seat].deal(hole);
        }
        let board = deck.deal_n(CommunityCards::FULL)?;
        let community = CommunityCards::try_new(board.clone())?;

        self.hands_played += 1;
        info!(
            hand = self.hands_played,
            dealer = self.dealer,
            seats = order.len(),
            "dealing"
        );
        let round = Round::new(
            &mut self.players,
            &mut self.agents,
            community,
            self.config.blinds(),
            self.dealer,
        )?;
        let outcome = round.play()?;

        let summary = HandSummary {
            hand_number: self.hands_played,
            dealer: self.dealer,
            community: board,
            outcome,
        };
        self.dealer = (self.dealer + 1) % n;
        Ok(summary)
    }

    /// Play up to `hands` hands, stopping early once fewer than two players have chips.
    pub fn play_hands(&mut self, hands: u64) -> Result<Vec<HandSummary>, TableError> {
        let mut out = Vec::new();
        for _ in 0..hands {
            if self.players.iter().filter(|p| p.chips() > 0).count() < 2 {
                break;
            }
            out.push(self.play_hand()?);
        }
        Ok(out)
    }

    fn next_funded(&self, from: SeatId) -> SeatId {
        let n = self.players.len();
        (1..=n)
            .map(|k| (from + k) % n)
            .find(|&s| !self.players[s].is_folded())
            .unwrap_or(from)
    }
}
