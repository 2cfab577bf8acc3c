use super::types::{Consensus, ValueBet};
use crate::aggregator::all_odds;
use crate::calc::{edge_pct, expected_value, mean_implied, normalize_pair};
use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::models::{Game, Offer, Side};

/// Find every offer with positive EV against the market consensus, best EV first.
///
/// Games where either team has no quotes are skipped. Equal EVs keep scan order
/// (games in order, home offers before away offers).
pub fn find_value_bets(games: &[Game], config: &AnalysisConfig) -> Result<Vec<ValueBet>> {
    let mut bets = Vec::new();
    for game in games {
        bets.extend(scan_game(game, config)?);
    }
    bets.sort_by(|a, b| b.expected_value.total_cmp(&a.expected_value));
    Ok(bets)
}

/// Mean-of-implied consensus for both sides, or `None` if a side is unquoted.
pub fn consensus(home_offers: &[Offer], away_offers: &[Offer]) -> Result<Option<Consensus>> {
    let home_prices: Vec<f64> = home_offers.iter().map(|o| o.price).collect();
    let away_prices: Vec<f64> = away_offers.iter().map(|o| o.price).collect();

    let (Some(home_avg), Some(away_avg)) = (mean_implied(&home_prices)?, mean_implied(&away_prices)?)
    else {
        return Ok(None);
    };
    let (home, away) = normalize_pair(home_avg, away_avg)?;
    Ok(Some(Consensus { home, away }))
}

fn scan_game(game: &Game, config: &AnalysisConfig) -> Result<Vec<ValueBet>> {
    let home_offers = all_odds(game, &game.home_team);
    let away_offers = all_odds(game, &game.away_team);

    let Some(consensus) = consensus(&home_offers, &away_offers)? else {
        return Ok(Vec::new());
    };

    let mut bets = Vec::new();
    for (side, offers) in [(Side::Home, home_offers), (Side::Away, away_offers)] {
        let fair = consensus.for_side(side);
        for offer in offers {
            if !config.price_in_window(offer.price) {
                continue;
            }
            let ev = expected_value(fair, offer.price, config.stake)?;
            if ev <= config.min_value_ev {
                continue;
            }
            let implied = 1.0 / offer.price;
            bets.push(ValueBet {
                game_id: game.id.clone(),
                game: game.to_string(),
                commence_time: game.commence_time,
                team: game.team(side).to_string(),
                side,
                bookmaker: offer.bookmaker,
                price: offer.price,
                implied_probability: implied,
                consensus_probability: fair,
                edge: edge_pct(fair, implied),
                expected_value: ev,
            });
        }
    }
    Ok(bets)
}
