use crate::models::Side;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single bookmaker offer priced above the market consensus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueBet {
    pub game_id: String,
    /// `Away @ Home (YYYY-MM-DD HH:MM)`
    pub game: String,
    pub commence_time: DateTime<Utc>,
    pub team: String,
    pub side: Side,
    pub bookmaker: String,
    pub price: f64,
    /// `1 / price`, unrounded.
    pub implied_probability: f64,
    /// Mean implied probability across books, normalized against the opponent.
    pub consensus_probability: f64,
    /// Percentage points of consensus over implied, to 2 places.
    pub edge: f64,
    pub expected_value: f64,
}

impl ValueBet {
    pub fn is_home(&self) -> bool {
        self.side == Side::Home
    }
}

/// Consensus win probabilities for both teams of one game; sums to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Consensus {
    pub home: f64,
    pub away: f64,
}

impl Consensus {
    pub fn for_side(&self, side: Side) -> f64 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }
}
