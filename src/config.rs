//! Configuration loader and analysis settings.

use crate::errors::{AppError, Result};
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.the-odds-api.com/v4";
pub const DEFAULT_SPORT: &str = "baseball_mlb";

/// Settings for talking to The Odds API.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: Url,
    /// Bookmaker regions, e.g. "us" or "us,uk".
    pub regions: String,
    pub markets: String,
    pub odds_format: String,
    pub date_format: String,
}

impl AppConfig {
    /// Load configuration from environment variables (`.env` is read by the binary).
    pub fn load() -> Result<Self> {
        let api_key = std::env::var("ODDS_API_KEY")
            .map_err(|_| AppError::Config("Set ODDS_API_KEY to your Odds API key".into()))?;
        if api_key.trim().is_empty() {
            return Err(AppError::Config("ODDS_API_KEY is empty".into()));
        }
        let base_url = Url::parse(&env_or("ODDS_API_BASE_URL", DEFAULT_API_BASE_URL))?;

        Ok(Self {
            api_key: api_key.trim().to_string(),
            base_url,
            regions: env_or("ODDS_REGIONS", "us"),
            markets: env_or("ODDS_MARKETS", "h2h"),
            odds_format: env_or("ODDS_FORMAT", "decimal"),
            date_format: env_or("ODDS_DATE_FORMAT", "iso"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Thresholds for the arbitrage detector and value bet ranker.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// A game is an arbitrage when the best implied probabilities sum below this.
    pub arbitrage_threshold: f64,
    /// Value bets must have EV strictly greater than this.
    pub min_value_ev: f64,
    /// Notional stake per bet used for EV.
    pub stake: f64,
    /// Inclusive price window for value bets.
    pub min_price: f64,
    pub max_price: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            arbitrage_threshold: 0.98,
            min_value_ev: 0.0,
            stake: 100.0,
            min_price: 1.5,
            max_price: 10.0,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.arbitrage_threshold > 0.0 && self.arbitrage_threshold <= 2.0) {
            return Err(AppError::InvalidConfig(format!(
                "arbitrage threshold must be in (0, 2], got {}",
                self.arbitrage_threshold
            )));
        }
        if !(self.stake.is_finite() && self.stake > 0.0) {
            return Err(AppError::InvalidConfig(format!(
                "stake must be positive, got {}",
                self.stake
            )));
        }
        if !self.min_value_ev.is_finite() {
            return Err(AppError::InvalidConfig("minimum EV must be finite".into()));
        }
        if !(self.min_price <= self.max_price) {
            return Err(AppError::InvalidConfig(format!(
                "price window is empty: {} > {}",
                self.min_price, self.max_price
            )));
        }
        Ok(())
    }

    pub fn price_in_window(&self, price: f64) -> bool {
        price >= self.min_price && price <= self.max_price
    }
}
