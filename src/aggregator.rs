//! Per-team queries over a game's head-to-head quotes.
//!
//! Team names are matched exactly (case-sensitive). Results follow bookmaker
//! payload order; nothing here sorts.

use crate::calc::{expected_value, implied_probability};
use crate::errors::Result;
use crate::models::{BestOdds, Game, GameRow, Offer, OfferRow, Side, TeamOffer};

/// Highest h2h price for `team` and the bookmaker quoting it.
///
/// Ties keep the first bookmaker encountered.
pub fn best_odds(game: &Game, team: &str) -> BestOdds {
    let mut best: Option<Offer> = None;

    for (bookmaker, outcome) in game.h2h_quotes() {
        if outcome.name != team {
            continue;
        }
        let better = best.as_ref().is_none_or(|b| outcome.price > b.price);
        if better {
            best = Some(Offer {
                bookmaker: bookmaker.title.clone(),
                price: outcome.price,
            });
        }
    }

    match best {
        Some(offer) => BestOdds::Found {
            team: team.to_string(),
            offer,
        },
        None => BestOdds::NoOffer {
            team: team.to_string(),
        },
    }
}

/// Every h2h price quoted for `team`, in payload order.
pub fn all_odds(game: &Game, team: &str) -> Vec<Offer> {
    game.h2h_quotes()
        .filter(|(_, outcome)| outcome.name == team)
        .map(|(bookmaker, outcome)| Offer {
            bookmaker: bookmaker.title.clone(),
            price: outcome.price,
        })
        .collect()
}

pub fn game_row(game: &Game) -> GameRow {
    GameRow {
        commence_time: game.commence_time,
        away_team: game.away_team.clone(),
        home_team: game.home_team.clone(),
        best_away: best_odds(game, &game.away_team),
        best_home: best_odds(game, &game.home_team),
    }
}

/// Flatten every h2h quote of every game: home offers, then away offers, per game.
pub fn all_offers(games: &[Game]) -> Result<Vec<OfferRow>> {
    let mut rows = Vec::new();
    for game in games {
        let matchup = game.matchup();
        for side in [Side::Home, Side::Away] {
            let team = game.team(side);
            for offer in all_odds(game, team) {
                rows.push(OfferRow {
                    commence_time: game.commence_time,
                    matchup: matchup.clone(),
                    team: team.to_string(),
                    side,
                    implied_probability: implied_probability(offer.price)?,
                    bookmaker: offer.bookmaker,
                    price: offer.price,
                });
            }
        }
    }
    Ok(rows)
}

/// Each offer for `team` priced at its own break-even probability.
pub fn team_offers(game: &Game, team: &str, stake: f64) -> Result<Vec<TeamOffer>> {
    all_odds(game, team)
        .into_iter()
        .map(|offer| {
            let implied = implied_probability(offer.price)?;
            Ok(TeamOffer {
                expected_value: expected_value(implied, offer.price, stake)?,
                implied_probability: implied,
                bookmaker: offer.bookmaker,
                price: offer.price,
            })
        })
        .collect()
}
