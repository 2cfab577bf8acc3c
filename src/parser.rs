//! Builds the entity model from raw Odds API JSON.
//!
//! Records are deserialized into raw serde structs, then a validation pass
//! checks presence of required fields, prices and timestamps. Every failure
//! names the exact field path, e.g. `bookmakers[1].markets[0].outcomes[2].price`.
//! Failures are scoped to one game so a batch can skip bad records and keep the rest.

use crate::errors::{AppError, Result};
use crate::models::{Bookmaker, Game, Market, Outcome};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// A raw record that could not be turned into a [`Game`].
#[derive(Debug)]
pub struct RejectedRecord {
    /// Position of the record in the input payload.
    pub index: usize,
    pub error: AppError,
}

/// Outcome of parsing a batch of raw games.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub games: Vec<Game>,
    pub rejected: Vec<RejectedRecord>,
}

// Required fields are `Option` so absence is reported with its own path;
// serde still rejects values of the wrong type.

#[derive(Debug, Deserialize)]
struct RawGame {
    id: Option<String>,
    sport_key: Option<String>,
    commence_time: Option<String>,
    home_team: Option<String>,
    away_team: Option<String>,
    #[serde(default)]
    bookmakers: Vec<RawBookmaker>,
}

#[derive(Debug, Deserialize)]
struct RawBookmaker {
    key: Option<String>,
    title: Option<String>,
    last_update: Option<String>,
    #[serde(default)]
    markets: Vec<RawMarket>,
}

#[derive(Debug, Deserialize)]
struct RawMarket {
    key: Option<String>,
    #[serde(default)]
    outcomes: Vec<RawOutcome>,
}

#[derive(Debug, Deserialize)]
struct RawOutcome {
    name: Option<String>,
    price: Option<f64>,
    point: Option<f64>,
}

/// Parse the top-level array returned by the odds endpoint.
pub fn parse_payload(payload: &Value) -> Result<ParseReport> {
    let records = payload
        .as_array()
        .ok_or_else(|| AppError::malformed("$", "expected an array of games"))?;
    Ok(parse_games(records))
}

/// Parse each record independently; malformed ones are collected, not fatal.
pub fn parse_games(records: &[Value]) -> ParseReport {
    let mut report = ParseReport::default();
    for (index, raw) in records.iter().enumerate() {
        match parse_game(raw) {
            Ok(game) => report.games.push(game),
            Err(error) => report.rejected.push(RejectedRecord { index, error }),
        }
    }
    report
}

pub fn parse_game(raw: &Value) -> Result<Game> {
    let record: RawGame = serde_path_to_error::deserialize(raw).map_err(|e| {
        let path = e.path().to_string();
        let path = if path == "." { "$".to_string() } else { path };
        AppError::malformed(path, e.into_inner().to_string())
    })?;
    record.into_game()
}

/// Parse an ISO-8601 timestamp, normalizing a trailing `Z` to `+00:00`.
pub fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    let normalized = match raw.strip_suffix('Z') {
        Some(stem) => format!("{stem}+00:00"),
        None => raw.to_string(),
    };
    DateTime::parse_from_rfc3339(&normalized).map(|dt| dt.with_timezone(&Utc))
}

fn field_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn required<T>(value: Option<T>, prefix: &str, key: &str) -> Result<T> {
    value.ok_or_else(|| AppError::malformed(field_path(prefix, key), "missing"))
}

fn timestamp(value: Option<String>, prefix: &str, key: &str) -> Result<DateTime<Utc>> {
    let raw = required(value, prefix, key)?;
    parse_timestamp(&raw).map_err(|e| {
        AppError::malformed(
            field_path(prefix, key),
            format!("invalid timestamp `{raw}`: {e}"),
        )
    })
}

impl RawGame {
    fn into_game(self) -> Result<Game> {
        let home_team = required(self.home_team, "", "home_team")?;
        let away_team = required(self.away_team, "", "away_team")?;
        if home_team == away_team {
            return Err(AppError::malformed(
                "away_team",
                format!("home and away team are both `{home_team}`"),
            ));
        }

        let bookmakers = self
            .bookmakers
            .into_iter()
            .enumerate()
            .map(|(i, bm)| bm.into_bookmaker(&format!("bookmakers[{i}]")))
            .collect::<Result<Vec<_>>>()?;

        Ok(Game {
            id: required(self.id, "", "id")?,
            sport_key: required(self.sport_key, "", "sport_key")?,
            commence_time: timestamp(self.commence_time, "", "commence_time")?,
            home_team,
            away_team,
            bookmakers,
        })
    }
}

impl RawBookmaker {
    fn into_bookmaker(self, path: &str) -> Result<Bookmaker> {
        let markets = self
            .markets
            .into_iter()
            .enumerate()
            .map(|(i, m)| m.into_market(&format!("{path}.markets[{i}]")))
            .collect::<Result<Vec<_>>>()?;
        Ok(Bookmaker {
            key: required(self.key, path, "key")?,
            title: required(self.title, path, "title")?,
            last_update: timestamp(self.last_update, path, "last_update")?,
            markets,
        })
    }
}

impl RawMarket {
    fn into_market(self, path: &str) -> Result<Market> {
        let outcomes = self
            .outcomes
            .into_iter()
            .enumerate()
            .map(|(i, o)| o.into_outcome(&format!("{path}.outcomes[{i}]")))
            .collect::<Result<Vec<_>>>()?;
        Ok(Market {
            key: required(self.key, path, "key")?,
            outcomes,
        })
    }
}

impl RawOutcome {
    fn into_outcome(self, path: &str) -> Result<Outcome> {
        let price = required(self.price, path, "price")?;
        if !(price.is_finite() && price > 1.0) {
            return Err(AppError::malformed(
                field_path(path, "price"),
                format!("decimal price must be greater than 1.0, got {price}"),
            ));
        }
        Ok(Outcome {
            name: required(self.name, path, "name")?,
            price,
            point: self.point,
        })
    }
}
