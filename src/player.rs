//! Seats and the player contract the pot manager and betting round rely on.

use crate::hand::HoleCards;

/// Position of a player around the table. Seats are numbered clockwise from 0.
pub type SeatId = usize;

/// Contract between the table, the pot manager and the betting round.
///
/// Chip movements go through [`Player::deduct_chips`] and [`Player::add_chips`] only.
pub trait Player {
    fn chips(&self) -> u64;
    /// Remove up to `amount` chips and return how many were actually removed.
    /// A player left without chips is all-in.
    fn deduct_chips(&mut self, amount: u64) -> u64;
    fn add_chips(&mut self, amount: u64);
    fn is_folded(&self) -> bool;
    fn is_all_in(&self) -> bool;
    fn hand(&self) -> Option<HoleCards>;
    fn fold(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayerStatus {
    Active,
    Folded,
    AllIn,
    /// Not dealt into the current hand (busted).
    SittingOut,
}

/// The table's own [`Player`] implementation.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct TablePlayer {
    pub(crate) name: String,
    pub(crate) chips: u64,
    pub(crate) status: PlayerStatus,
    pub(crate) hole: Option<HoleCards>,
}

impl TablePlayer {
    pub fn new(name: impl Into<String>, chips: u64) -> Self {
        Self {
            name: name.into(),
            chips,
            status: PlayerStatus::Active,
            hole: None,
        }
    }

    /// Returns the player's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the player's status
    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn deal(&mut self, hole: HoleCards) {
        self.hole = Some(hole);
    }

    /// Clear per-hand state. Players without chips sit the hand out.
    pub fn reset_for_hand(&mut self) {
        self.hole = None;
        self.status = if self.chips == 0 {
            PlayerStatus::SittingOut
        } else {
            PlayerStatus::Active
        };
    }
}

impl Player for TablePlayer {
    fn chips(&self) -> u64 {
        self.chips
    }

    fn deduct_chips(&mut self, amount: u64) -> u64 {
        let taken = amount.min(self.chips);
        self.chips -= taken;
        if self.chips == 0 && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        taken
    }

    fn add_chips(&mut self, amount: u64) {
        self.chips += amount;
    }

    fn is_folded(&self) -> bool {
        matches!(self.status, PlayerStatus::Folded | PlayerStatus::SittingOut)
    }

    fn is_all_in(&self) -> bool {
        self.status == PlayerStatus::AllIn
    }

    fn hand(&self) -> Option<HoleCards> {
        self.hole
    }

    fn fold(&mut self) {
        if self.status != PlayerStatus::SittingOut {
            self.status = PlayerStatus::Folded;
        }
    }
}
