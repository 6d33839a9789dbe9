//! Agents: pluggable decision sources (bots, scripted players, humans via other frontends).
//!
//! The betting round never decides for a player. It hands a [`DecisionRequest`] to the
//! seat's [`DecisionSource`] and applies whatever [`Decision`] comes back. A source that
//! errors (timeout, disconnect) is folded by the round.

use crate::cards::Card;
use crate::hand::HoleCards;
use crate::player::SeatId;
use crate::round::Stage;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
    Scripted,
}

/// A player's answer to a decision request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Fold,
    Check,
    Call,
    /// Raise the stage bet to this total.
    Raise(u64),
}

impl core::fmt::Display for Decision {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Decision::Fold => f.write_str("fold"),
            Decision::Check => f.write_str("check"),
            Decision::Call => f.write_str("call"),
            Decision::Raise(to) => write!(f, "raise to {to}"),
        }
    }
}

/// Everything a seat may see when it is asked to act.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct DecisionRequest {
    pub seat: SeatId,
    pub stage: Stage,
    /// Highest amount any player has put in during this stage.
    pub current_bet: u64,
    /// Chips this seat needs to add to match `current_bet`.
    pub to_call: u64,
    pub chips: u64,
    pub pot_total: u64,
    pub community: Vec<Card>,
    pub hole: Option<HoleCards>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecisionError {
    #[error("decision timed out after {0:?}")]
    TimedOut(Duration),
    #[error("decision source disconnected")]
    Disconnected,
}

/// A seat controller that answers decision requests.
pub trait DecisionSource {
    fn request_decision(&mut self, request: &DecisionRequest) -> Result<Decision, DecisionError>;
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
}

mod bots;

pub use bots::{BotAgent, BotProfile, Difficulty};

/// Calls every bet and checks when nothing is owed.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingAgent;

impl DecisionSource for CallingAgent {
    fn request_decision(&mut self, request: &DecisionRequest) -> Result<Decision, DecisionError> {
        Ok(if request.to_call == 0 {
            Decision::Check
        } else {
            Decision::Call
        })
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }
}

/// Folds whenever it owes chips, checks otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldingAgent;

impl DecisionSource for FoldingAgent {
    fn request_decision(&mut self, request: &DecisionRequest) -> Result<Decision, DecisionError> {
        Ok(if request.to_call == 0 {
            Decision::Check
        } else {
            Decision::Fold
        })
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }
}

/// Replays a fixed list of decisions, then checks when possible and folds otherwise.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAgent {
    script: Vec<Decision>,
    idx: usize,
}

impl ScriptedAgent {
    pub fn new(script: Vec<Decision>) -> Self {
        Self { script, idx: 0 }
    }

    /// Decisions not yet replayed.
    pub fn remaining(&self) -> &[Decision] {
        &self.script[self.idx.min(self.script.len())..]
    }
}

impl DecisionSource for ScriptedAgent {
    fn request_decision(&mut self, request: &DecisionRequest) -> Result<Decision, DecisionError> {
        if let Some(&d) = self.script.get(self.idx) {
            self.idx += 1;
            return Ok(d);
        }
        Ok(if request.to_call == 0 {
            Decision::Check
        } else {
            Decision::Fold
        })
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Scripted
    }
}

/// Host adapter: forwards each request over a channel and waits up to `timeout` for the
/// answer. A hung or dropped peer surfaces as a [`DecisionError`], which the round turns
/// into a fold.
#[derive(Debug)]
pub struct ChannelAgent {
    requests: Sender<DecisionRequest>,
    decisions: Receiver<Decision>,
    timeout: Duration,
}

impl ChannelAgent {
    pub fn new(
        requests: Sender<DecisionRequest>,
        decisions: Receiver<Decision>,
        timeout: Duration,
    ) -> Self {
        Self {
            requests,
            decisions,
            timeout,
        }
    }
}

impl DecisionSource for ChannelAgent {
    fn request_decision(&mut self, request: &DecisionRequest) -> Result<Decision, DecisionError> {
        self.requests
            .send(request.clone())
            .map_err(|_| DecisionError::Disconnected)?;
        match self.decisions.recv_timeout(self.timeout) {
            Ok(decision) => Ok(decision),
            Err(RecvTimeoutError::Timeout) => Err(DecisionError::TimedOut(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(DecisionError::Disconnected),
        }
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
}
