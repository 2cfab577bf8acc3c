use super::types::{ArbitrageLeg, ArbitrageOpportunity};
use crate::aggregator::best_odds;
use crate::calc::{expected_value, implied_probability, normalize_pair};
use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::models::{Game, Offer};

/// Scan every game for a cross-bookmaker arbitrage, in game order.
///
/// Assumes two-outcome markets; a draw outcome would make the sum meaningless.
pub fn find_arbitrage_opportunities(
    games: &[Game],
    config: &AnalysisConfig,
) -> Result<Vec<ArbitrageOpportunity>> {
    let mut opportunities = Vec::new();
    for game in games {
        if let Some(opp) = evaluate_game(game, config)? {
            opportunities.push(opp);
        }
    }
    Ok(opportunities)
}

/// Check a single game. `None` when a side is unquoted or the book is too tight.
pub fn evaluate_game(game: &Game, config: &AnalysisConfig) -> Result<Option<ArbitrageOpportunity>> {
    let (Some(home_best), Some(away_best)) = (
        best_odds(game, &game.home_team).offer().cloned(),
        best_odds(game, &game.away_team).offer().cloned(),
    ) else {
        return Ok(None);
    };

    let home_implied = implied_probability(home_best.price)?;
    let away_implied = implied_probability(away_best.price)?;

    if home_implied + away_implied >= config.arbitrage_threshold {
        return Ok(None);
    }

    let (home_true, away_true) = normalize_pair(home_implied, away_implied)?;

    Ok(Some(ArbitrageOpportunity {
        game_id: game.id.clone(),
        game: game.to_string(),
        commence_time: game.commence_time,
        home: leg(&game.home_team, home_best, home_implied, home_true, config)?,
        away: leg(&game.away_team, away_best, away_implied, away_true, config)?,
    }))
}

fn leg(
    team: &str,
    best: Offer,
    implied_probability: f64,
    true_probability: f64,
    config: &AnalysisConfig,
) -> Result<ArbitrageLeg> {
    Ok(ArbitrageLeg {
        team: team.to_string(),
        expected_value: expected_value(true_probability, best.price, config.stake)?,
        best_price: best.price,
        bookmaker: best.bookmaker,
        implied_probability,
        true_probability,
    })
}
