pub mod evaluator;
pub mod types;

pub use evaluator::{evaluate_game, find_arbitrage_opportunities};
pub use types::{ArbitrageLeg, ArbitrageOpportunity};
