use crate::cards::Card;
use crate::evaluator::evaluate_seven;
use crate::hand::HoleCards;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use super::{AgentKind, Decision, DecisionError, DecisionRequest, DecisionSource};

/// Difficulty tiers for bot play style and mistake rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Configuration for a bot's play style and randomness.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    pub difficulty: Difficulty,
    pub tightness: f64,
    pub aggression: f64,
    pub bluff: f64,
    pub curiosity: f64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Create a profile with tuned defaults for a difficulty tier.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (tightness, aggression, bluff, curiosity) = match difficulty {
            Difficulty::Easy => (0.3, 0.18, 0.03, 0.4),
            Difficulty::Medium => (0.5, 0.35, 0.05, 0.2),
            Difficulty::Hard => (0.62, 0.48, 0.08, 0.12),
        };
        Self {
            difficulty,
            tightness,
            aggression,
            bluff,
            curiosity,
            rng_seed: None,
        }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Medium)
    }
}

#[derive(Debug)]
struct BotState {
    rng: StdRng,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng }
    }
}

#[derive(Clone, Copy)]
struct DecisionParams {
    adjusted: f64,
    fold_threshold: f64,
    raise_threshold: f64,
    aggression: f64,
    bluff: f64,
    curiosity: f64,
}

struct BotPolicy;

impl BotPolicy {
    fn decide(req: &DecisionRequest, profile: &BotProfile, state: &mut BotState) -> Decision {
        let strength = match req.hole.as_ref() {
            Some(hole) => estimate_strength(hole, &req.community),
            None => 0.0,
        };
        let pot_odds = if req.to_call == 0 {
            0.0
        } else {
            req.to_call as f64 / (req.pot_total + req.to_call) as f64
        };
        let (mistake_rate, diff_bias) = difficulty_modifiers(profile.difficulty);
        let tightness = (profile.tightness + diff_bias).clamp(0.05, 0.95);
        let aggression = (profile.aggression + diff_bias).clamp(0.05, 0.95);
        let bluff = (profile.bluff + diff_bias * 0.5).clamp(0.0, 0.5);
        let curiosity = profile.curiosity.clamp(0.0, 0.6);

        let noise = state.rng.random_range(-1.0..=1.0) * mistake_rate * 0.18;
        let adjusted = (strength + noise).clamp(0.0, 1.0);

        let fold_threshold = (0.35 + tightness * 0.3 - pot_odds * 0.25).clamp(0.1, 0.9);
        let raise_threshold = (0.68 - aggression * 0.25).clamp(0.15, 0.9);

        let params = DecisionParams {
            adjusted,
            fold_threshold,
            raise_threshold,
            aggression,
            bluff,
            curiosity,
        };

        if req.to_call > 0 {
            decide_facing_bet(req, state, params)
        } else {
            decide_when_checked(req, state, params)
        }
    }
}

fn decide_facing_bet(
    req: &DecisionRequest,
    state: &mut BotState,
    params: DecisionParams,
) -> Decision {
    let weak = params.adjusted < params.fold_threshold;
    if weak && state.rng.random::<f64>() > params.curiosity * 0.3 {
        return Decision::Fold;
    }
    let strong = params.adjusted > params.raise_threshold;
    if strong && state.rng.random::<f64>() < params.aggression {
        if let Some(target) = choose_raise_target(req, params.aggression, params.adjusted) {
            return Decision::Raise(target);
        }
    }
    Decision::Call
}

fn decide_when_checked(
    req: &DecisionRequest,
    state: &mut BotState,
    params: DecisionParams,
) -> Decision {
    let strong = params.adjusted > params.raise_threshold;
    let weak = params.adjusted < params.fold_threshold;
    let value = strong && state.rng.random::<f64>() < params.aggression;
    let bluff = !value && weak && state.rng.random::<f64>() < params.bluff;
    if value || bluff {
        if let Some(target) = choose_raise_target(req, params.aggression, params.adjusted) {
            return Decision::Raise(target);
        }
    }
    Decision::Check
}

fn difficulty_modifiers(difficulty: Difficulty) -> (f64, f64) {
    match difficulty {
        Difficulty::Easy => (0.28, -0.1),
        Difficulty::Medium => (0.14, 0.0),
        Difficulty::Hard => (0.08, 0.05),
    }
}

/// A raise target strictly above the current bet that the stack can cover, if any.
fn choose_raise_target(req: &DecisionRequest, aggression: f64, strength: f64) -> Option<u64> {
    let already_in = req.current_bet - req.to_call.min(req.current_bet);
    let max_total = already_in + req.chips;
    if max_total <= req.current_bet {
        return None;
    }
    if strength > 0.88 && req.chips <= req.pot_total.saturating_add(req.to_call) {
        return Some(max_total);
    }
    let base_factor = if strength > 0.85 {
        1.0
    } else if strength > 0.65 {
        0.7
    } else {
        0.5
    };
    let scale = 0.9 + aggression * 0.3;
    let base = req.pot_total.max(req.current_bet) as f64;
    let raise = (base * base_factor * scale).round() as u64;
    let min_raise = req.current_bet.max(1);
    Some((req.current_bet + min_raise.max(raise)).min(max_total))
}

fn estimate_strength(hole: &HoleCards, community: &[Card]) -> f64 {
    if let Ok(board) = <[Card; 5]>::try_from(community) {
        let seven = [
            hole.first(),
            hole.second(),
            board[0],
            board[1],
            board[2],
            board[3],
            board[4],
        ];
        let eval = evaluate_seven(&seven);
        let base = eval.rank() as f64 / 9.0;
        let high = eval.best_five[0].rank().value() as f64 / 14.0;
        return (base * 0.85 + high * 0.15).clamp(0.0, 1.0);
    }
    let mut strength = preflop_strength(hole);
    for card in hole.as_array() {
        let matches = community.iter().filter(|c| c.rank() == card.rank());
        strength += 0.18 * matches.count() as f64;
    }
    strength.clamp(0.0, 1.0)
}

fn preflop_strength(hole: &HoleCards) -> f64 {
    let a = hole.first().rank().value() as i32;
    let b = hole.second().rank().value() as i32;
    let high = a.max(b) as f64;
    let low = a.min(b) as f64;
    let pair = a == b;
    let suited = hole.first().suit() == hole.second().suit();
    let gap = (high - low) as i32;

    let mut score = (high / 14.0) * 0.5 + (low / 14.0) * 0.1;
    if pair {
        score += 0.3 + (high / 14.0) * 0.1;
    }
    if suited {
        score += 0.05;
    }
    if gap == 1 {
        score += 0.05;
    } else if gap == 2 {
        score += 0.02;
    } else if gap > 4 {
        score -= 0.05;
    }
    score.clamp(0.0, 1.0)
}

/// A seeded bot agent with adjustable profile and difficulty tiers.
#[derive(Debug)]
pub struct BotAgent {
    profile: BotProfile,
    state: BotState,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let state = BotState::new(profile.rng_seed);
        Self { profile, state }
    }
}

impl DecisionSource for BotAgent {
    fn request_decision(&mut self, request: &DecisionRequest) -> Result<Decision, DecisionError> {
        Ok(BotPolicy::decide(request, &self.profile, &mut self.state))
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }
}
