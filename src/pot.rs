//! Chip ledger for a single hand: the main pot, side pots and their payout.
//!
//! Every pot covers one band of per-player contribution, `floor..cap`. A pot's cap is
//! fixed the first time some contribution would push past the smallest stake among its
//! live eligible players; anything above the cap spills into the next pot, whose
//! eligible set drops every player who cannot reach beyond it.

use crate::player::{Player, SeatId};
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PotError {
    #[error("seat {seat} is not eligible to contribute to this pot")]
    IneligibleContributor { seat: SeatId },
    #[error("seat {seat} is not eligible to win this pot")]
    IneligibleWinner { seat: SeatId },
    #[error("no winners given for a pot holding chips")]
    NoWinners,
    #[error("unknown seat {0}")]
    UnknownSeat(SeatId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PayoutKind {
    /// Whole pot to a single winner.
    Win,
    /// Share of a pot split between tied winners.
    Split,
    /// Chips returned to a contributor of an uncontested pot.
    Refund,
}

/// Chips moved from a pot back onto a seat's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payout {
    pub seat: SeatId,
    pub amount: u64,
    pub kind: PayoutKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pot {
    amount: u64,
    eligible: Vec<SeatId>,
    floor: u64,
    cap: Option<u64>,
    contributions: BTreeMap<SeatId, u64>,
}

impl Pot {
    pub fn new(eligible: Vec<SeatId>, floor: u64) -> Self {
        Self {
            amount: 0,
            eligible,
            floor,
            cap: None,
            contributions: BTreeMap::new(),
        }
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn eligible(&self) -> &[SeatId] {
        &self.eligible
    }

    pub fn is_eligible(&self, seat: SeatId) -> bool {
        self.eligible.contains(&seat)
    }

    /// Per-player contribution ceiling once fixed. `None` while the pot is open ended.
    pub fn cap(&self) -> Option<u64> {
        self.cap
    }

    /// Chips `seat` has put into this pot.
    pub fn contribution(&self, seat: SeatId) -> u64 {
        self.contributions.get(&seat).copied().unwrap_or(0)
    }

    pub fn add_contribution(&mut self, seat: SeatId, amount: u64) -> Result<(), PotError> {
        if !self.is_eligible(seat) {
            return Err(PotError::IneligibleContributor { seat });
        }
        self.amount += amount;
        *self.contributions.entry(seat).or_insert(0) += amount;
        Ok(())
    }

    /// Split the pot between `winners` in whole chips. Leftover chips go one at a time
    /// clockwise from the seat after the `button`.
    pub fn distribute_winnings<P: Player>(
        &mut self,
        winners: &[SeatId],
        players: &mut [P],
        button: SeatId,
    ) -> Result<Vec<Payout>, PotError> {
        let mut winners: Vec<SeatId> = winners.to_vec();
        winners.sort_unstable();
        winners.dedup();
        if winners.is_empty() {
            if self.amount == 0 {
                return Ok(Vec::new());
            }
            return Err(PotError::NoWinners);
        }
        for &seat in &winners {
            if seat >= players.len() {
                return Err(PotError::UnknownSeat(seat));
            }
            if !self.is_eligible(seat) {
                return Err(PotError::IneligibleWinner { seat });
            }
        }

        let n = players.len();
        let start = (button + 1) % n;
        winners.sort_by_key(|&i| (i + n - start) % n);

        let kind = if winners.len() == 1 {
            PayoutKind::Win
        } else {
            PayoutKind::Split
        };
        let per = self.amount / winners.len() as u64;
        let mut rem = self.amount % winners.len() as u64;
        let mut payouts = Vec::with_capacity(winners.len());
        for &seat in &winners {
            let mut amount = per;
            if rem > 0 {
                amount += 1;
                rem -= 1;
            }
            players[seat].add_chips(amount);
            payouts.push(Payout { seat, amount, kind });
        }
        self.amount = 0;
        Ok(payouts)
    }

    /// Return every contributor's chips. Used when nobody eligible is left to win.
    pub fn refund<P: Player>(&mut self, players: &mut [P]) -> Result<Vec<Payout>, PotError> {
        let mut payouts = Vec::new();
        for (&seat, &amount) in &self.contributions {
            if amount == 0 {
                continue;
            }
            let player = players.get_mut(seat).ok_or(PotError::UnknownSeat(seat))?;
            player.add_chips(amount);
            payouts.push(Payout {
                seat,
                amount,
                kind: PayoutKind::Refund,
            });
        }
        self.amount = 0;
        Ok(payouts)
    }
}

/// Ordered list of pots for one hand. The first is the main pot.
#[derive(Debug, Clone)]
pub struct PotManager {
    pots: Vec<Pot>,
    committed: Vec<u64>,
}

impl PotManager {
    /// `eligible` are the seats dealt into the hand.
    pub fn new(table_size: usize, eligible: Vec<SeatId>) -> Self {
        Self {
            pots: vec![Pot::new(eligible, 0)],
            committed: vec![0; table_size],
        }
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    /// Chips currently held across all pots.
    pub fn total(&self) -> u64 {
        self.pots.iter().map(Pot::amount).sum()
    }

    /// Chips `seat` has committed this hand.
    pub fn committed(&self, seat: SeatId) -> u64 {
        self.committed.get(seat).copied().unwrap_or(0)
    }

    /// Record `amount` chips already deducted from `seat`.
    ///
    /// Each seat's stake (committed so far plus chips still held) is snapshotted once,
    /// before any chip is placed, and every pot ceiling decided during this call is read
    /// from that snapshot.
    pub fn add_contribution<P: Player>(
        &mut self,
        seat: SeatId,
        amount: u64,
        players: &[P],
    ) -> Result<(), PotError> {
        if seat >= self.committed.len() || seat >= players.len() {
            return Err(PotError::UnknownSeat(seat));
        }
        if amount == 0 {
            return Ok(());
        }

        let stakes: Vec<u64> = players
            .iter()
            .enumerate()
            .map(|(q, p)| {
                let pending = if q == seat { amount } else { 0 };
                self.committed.get(q).copied().unwrap_or(0) + p.chips() + pending
            })
            .collect();
        let live = |q: SeatId| !players[q].is_folded();

        let target = self.committed[seat] + amount;
        let mut level = self.committed[seat];
        let mut idx = 0;
        while level < target {
            let last = idx + 1 == self.pots.len();
            let pot = &mut self.pots[idx];
            if matches!(pot.cap, Some(cap) if cap <= level) {
                idx += 1;
                continue;
            }
            if !pot.is_eligible(seat) {
                return Err(PotError::IneligibleContributor { seat });
            }
            level = level.max(pot.floor);

            let cap = match pot.cap {
                Some(cap) => cap,
                None => {
                    let ceiling = pot
                        .eligible
                        .iter()
                        .copied()
                        .filter(|&q| live(q))
                        .map(|q| stakes[q])
                        .min()
                        .unwrap_or(target);
                    if ceiling < target {
                        let cap = ceiling.max(level);
                        pot.cap = Some(cap);
                        cap
                    } else {
                        u64::MAX
                    }
                }
            };

            let top = cap.min(target);
            pot.add_contribution(seat, top - level)?;
            level = top;

            if level < target && last {
                let eligible: Vec<SeatId> = pot
                    .eligible
                    .iter()
                    .copied()
                    .filter(|&q| live(q) && stakes[q] > cap)
                    .collect();
                debug!(floor = cap, ?eligible, "opening side pot");
                self.pots.push(Pot::new(eligible, cap));
            }
            idx += 1;
        }

        self.committed[seat] = target;
        debug!(
            seat,
            amount,
            committed = target,
            pots = self.pots.len(),
            "contribution recorded"
        );
        Ok(())
    }

    /// Pay every pot to the winners eligible for it. A side pot none of them may win is
    /// refunded to its contributors.
    ///
    /// Every winner must be a known seat eligible for at least one pot.
    pub fn distribute_winnings<P: Player>(
        &mut self,
        winners: &[SeatId],
        players: &mut [P],
        button: SeatId,
    ) -> Result<Vec<Payout>, PotError> {
        for &seat in winners {
            if seat >= players.len() {
                return Err(PotError::UnknownSeat(seat));
            }
            if !self.pots.iter().any(|pot| pot.is_eligible(seat)) {
                return Err(PotError::IneligibleWinner { seat });
            }
        }

        let mut payouts = Vec::new();
        for (i, pot) in self.pots.iter_mut().enumerate() {
            if pot.amount == 0 {
                continue;
            }
            let eligible: Vec<SeatId> = winners
                .iter()
                .copied()
                .filter(|&w| pot.is_eligible(w))
                .collect();
            if eligible.is_empty() {
                warn!(
                    pot = i,
                    amount = pot.amount,
                    "no eligible winner, refunding pot"
                );
                payouts.extend(pot.refund(players)?);
            } else {
                payouts.extend(pot.distribute_winnings(&eligible, players, button)?);
            }
        }
        Ok(payouts)
    }

    /// Pay every pot to the winners `resolve` picks among that pot's live eligible seats.
    pub fn distribute_with<P, F>(
        &mut self,
        players: &mut [P],
        button: SeatId,
        mut resolve: F,
    ) -> Result<Vec<Payout>, PotError>
    where
        P: Player,
        F: FnMut(&[SeatId]) -> Vec<SeatId>,
    {
        let mut payouts = Vec::new();
        for (i, pot) in self.pots.iter_mut().enumerate() {
            if pot.amount == 0 {
                continue;
            }
            let contenders: Vec<SeatId> = pot
                .eligible
                .iter()
                .copied()
                .filter(|&q| players.get(q).is_some_and(|p| !p.is_folded()))
                .collect();
            if contenders.is_empty() {
                warn!(
                    pot = i,
                    amount = pot.amount,
                    "no live contender, refunding pot"
                );
                payouts.extend(pot.refund(players)?);
                continue;
            }
            let winners = resolve(&contenders);
            payouts.extend(pot.distribute_winnings(&winners, players, button)?);
        }
        Ok(payouts)
    }
}
