use chrono::{DateTime, Utc};
use serde::Serialize;

/// One side of an arbitrage: the best price found for a team and what it implies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageLeg {
    pub team: String,
    pub best_price: f64,
    pub bookmaker: String,
    pub implied_probability: f64,
    /// Implied probability rescaled so both legs sum to 1.
    pub true_probability: f64,
    pub expected_value: f64,
}

/// A game whose best home and away prices imply less than the threshold in total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageOpportunity {
    pub game_id: String,
    /// `Away @ Home (YYYY-MM-DD HH:MM)`
    pub game: String,
    pub commence_time: DateTime<Utc>,
    pub home: ArbitrageLeg,
    pub away: ArbitrageLeg,
}

impl ArbitrageOpportunity {
    pub fn implied_total(&self) -> f64 {
        self.home.implied_probability + self.away.implied_probability
    }

    /// Share of the book left on the table, `1 - implied_total`.
    pub fn margin(&self) -> f64 {
        1.0 - self.implied_total()
    }
}
