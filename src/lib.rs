//! holdem-core: a No-Limit Texas Hold'em hand engine
//!
//! Goals:
//! - Deterministic 7-card evaluation with full kicker ordering
//! - Exact chip accounting across main and side pots, no fractional chips
//! - A betting-round state machine that only consumes decisions, never makes them
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use holdem_core::cards::{Card, Rank, Suit};
//! use holdem_core::evaluator::{evaluate_holdem, Category};
//! use holdem_core::hand::HoleCards;
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spade),
//!     Card::new(Rank::Ace, Suit::Heart),
//! ).unwrap();
//! let community = [
//!     Card::new(Rank::King, Suit::Club),
//!     Card::new(Rank::Queen, Suit::Diamond),
//!     Card::new(Rank::Jack, Suit::Heart),
//!     Card::new(Rank::Three, Suit::Spade),
//!     Card::new(Rank::Two, Suit::Club),
//! ];
//!
//! let eval = evaluate_holdem(&hole, &community).unwrap();
//! assert_eq!(eval.category, Category::Pair);
//! ```
//!
//! ## Quick start: play a hand
//! ```
//! use holdem_core::agents::CallingAgent;
//! use holdem_core::config::TableConfig;
//! use holdem_core::table::Table;
//!
//! let mut table = Table::new(TableConfig::default().with_seed(7)).unwrap();
//! table.seat_player("ana", Box::new(CallingAgent)).unwrap();
//! table.seat_player("bo", Box::new(CallingAgent)).unwrap();
//! let summary = table.play_hand().unwrap();
//! assert!(summary.outcome.showdown);
//! assert_eq!(table.total_chips(), 2000);
//! ```
//!
//! ## Simulator
//! Run seeded bot hands from the command line with:
//! ```sh
//! cargo run --bin holdem-sim -- --players 4 --hands 20 --seed 1
//! ```

pub mod agents;
pub mod cards;
pub mod config;
pub mod deck;
pub mod evaluator;
pub mod hand;
pub mod player;
pub mod pot;
pub mod round;
pub mod table;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
