use crate::round::Blinds;

/// Seats beyond this could not all be dealt from one deck (2 × 22 + 5 = 49 ≤ 52).
pub const MAX_SEATS_LIMIT: usize = 22;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("big blind must be positive")]
    ZeroBigBlind,
    #[error("small blind {small} exceeds big blind {big}")]
    SmallBlindTooLarge { small: u64, big: u64 },
    #[error("starting stack must be positive")]
    ZeroStack,
    #[error("max seats must be between 2 and {MAX_SEATS_LIMIT}, got {0}")]
    SeatLimit(usize),
}

/// Table settings shared by every hand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TableConfig {
    pub starting_stack: u64,
    pub big_blind: u64,
    /// `None` posts half the big blind, rounded up.
    pub small_blind: Option<u64>,
    pub max_seats: usize,
    /// Seed for the shuffling RNG. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_stack: 1000,
            big_blind: 5,
            small_blind: None,
            max_seats: 10,
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn with_starting_stack(mut self, chips: u64) -> Self {
        self.starting_stack = chips;
        self
    }

    pub fn with_big_blind(mut self, big_blind: u64) -> Self {
        self.big_blind = big_blind;
        self
    }

    pub fn with_small_blind(mut self, small_blind: u64) -> Self {
        self.small_blind = Some(small_blind);
        self
    }

    pub fn with_max_seats(mut self, seats: usize) -> Self {
        self.max_seats = seats;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn small_blind(&self) -> u64 {
        self.small_blind.unwrap_or_else(|| self.big_blind.div_ceil(2))
    }

    pub fn blinds(&self) -> Blinds {
        Blinds {
            small: self.small_blind(),
            big: self.big_blind,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.big_blind == 0 {
            return Err(ConfigError::ZeroBigBlind);
        }
        let small = self.small_blind();
        if small > self.big_blind {
            return Err(ConfigError::SmallBlindTooLarge {
                small,
                big: self.big_blind,
            });
        }
        if self.starting_stack == 0 {
            return Err(ConfigError::ZeroStack);
        }
        if !(2..=MAX_SEATS_LIMIT).contains(&self.max_seats) {
            return Err(ConfigError::SeatLimit(self.max_seats));
        }
        Ok(())
    }
}
