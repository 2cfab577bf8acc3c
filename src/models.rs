//! Odds entity model shared throughout the application.
//!
//! A [`Game`] owns its bookmakers, markets and outcomes outright. The graph is
//! built once by [`crate::parser`] and only read afterwards.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Market key for head-to-head (moneyline) pricing.
pub const H2H: &str = "h2h";

/// One game with every bookmaker quote returned for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    pub id: String,
    pub sport_key: String,
    pub commence_time: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
    pub bookmakers: Vec<Bookmaker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bookmaker {
    pub key: String,
    pub title: String,
    pub last_update: DateTime<Utc>,
    pub markets: Vec<Market>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Market {
    /// Market type tag, e.g. `h2h`, `spreads`, `totals`.
    pub key: String,
    pub outcomes: Vec<Outcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub name: String,
    /// Decimal price, always > 1.0 once parsed.
    pub price: f64,
    /// Handicap or total line; only spread/total markets carry one.
    pub point: Option<f64>,
}

/// Which side of the matchup a team is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Home => "Home",
            Side::Away => "Away",
        }
    }
}

impl Market {
    pub fn is_h2h(&self) -> bool {
        self.key == H2H
    }
}

impl Game {
    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    /// Resolve an exact team name to its side of this matchup.
    pub fn side_of(&self, team: &str) -> Option<Side> {
        if team == self.home_team {
            Some(Side::Home)
        } else if team == self.away_team {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// Case-insensitive substring lookup used by the `--team` flag.
    /// The home team is checked first.
    pub fn find_team(&self, query: &str) -> Option<Side> {
        let needle = query.to_lowercase();
        if self.home_team.to_lowercase().contains(&needle) {
            Some(Side::Home)
        } else if self.away_team.to_lowercase().contains(&needle) {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// `Away @ Home`
    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }

    pub fn start_label(&self) -> String {
        self.commence_time.format("%Y-%m-%d %H:%M").to_string()
    }

    /// Every head-to-head outcome with the bookmaker quoting it, in payload order.
    pub fn h2h_quotes(&self) -> impl Iterator<Item = (&Bookmaker, &Outcome)> {
        self.bookmakers.iter().flat_map(|bookmaker| {
            bookmaker
                .markets
                .iter()
                .filter(|market| market.is_h2h())
                .flat_map(move |market| market.outcomes.iter().map(move |o| (bookmaker, o)))
        })
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.matchup(), self.start_label())
    }
}

/// A single bookmaker's price for a team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Offer {
    pub bookmaker: String,
    pub price: f64,
}

/// Best available price for a team, or an explicit absence of any quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BestOdds {
    Found { team: String, offer: Offer },
    NoOffer { team: String },
}

impl BestOdds {
    pub fn team(&self) -> &str {
        match self {
            BestOdds::Found { team, .. } | BestOdds::NoOffer { team } => team,
        }
    }

    pub fn offer(&self) -> Option<&Offer> {
        match self {
            BestOdds::Found { offer, .. } => Some(offer),
            BestOdds::NoOffer { .. } => None,
        }
    }

    /// Turn the lookup into a typed error when nobody quoted the team.
    pub fn into_offer(self) -> crate::errors::Result<Offer> {
        match self {
            BestOdds::Found { offer, .. } => Ok(offer),
            BestOdds::NoOffer { team } => Err(crate::errors::AppError::NoOffer { team }),
        }
    }
}

/// Summary row for the default games view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRow {
    pub commence_time: DateTime<Utc>,
    pub away_team: String,
    pub home_team: String,
    pub best_away: BestOdds,
    pub best_home: BestOdds,
}

/// One flattened bookmaker quote across all games.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferRow {
    pub commence_time: DateTime<Utc>,
    pub matchup: String,
    pub team: String,
    pub side: Side,
    pub bookmaker: String,
    pub price: f64,
    pub implied_probability: f64,
}

/// A team's quote annotated with its break-even probability and EV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamOffer {
    pub bookmaker: String,
    pub price: f64,
    pub implied_probability: f64,
    pub expected_value: f64,
}
