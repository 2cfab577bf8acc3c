//! Positive expected-value bets against a market consensus.

pub mod ranker;
pub mod types;

pub use ranker::{consensus, find_value_bets};
pub use types::{Consensus, ValueBet};
