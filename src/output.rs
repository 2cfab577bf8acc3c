//! Table and JSON rendering of analysis results.
//!
//! Everything here consumes finished records; no analysis happens in this module.

use crate::arbitrage::{ArbitrageLeg, ArbitrageOpportunity};
use crate::aggregator::team_offers;
use crate::models::{BestOdds, Game, GameRow, OfferRow, TeamOffer};
use crate::value::ValueBet;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Table
        }
    }
}

pub fn to_json<T: Serialize + ?Sized>(items: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(items)?)
}

fn grid<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::ascii()).to_string()
}

fn best_cell(best: &BestOdds) -> String {
    match best.offer() {
        Some(offer) => format!("{} ({})", offer.price, offer.bookmaker),
        None => "no offer".to_string(),
    }
}

fn pct(p: f64, places: usize) -> String {
    format!("{:.*}%", places, p * 100.0)
}

#[derive(Tabled)]
struct GameLine {
    #[tabled(rename = "Game Time")]
    time: String,
    #[tabled(rename = "Away Team")]
    away: String,
    #[tabled(rename = "Home Team")]
    home: String,
    #[tabled(rename = "Away Odds")]
    away_odds: String,
    #[tabled(rename = "Home Odds")]
    home_odds: String,
}

pub fn render_games(rows: &[GameRow]) -> String {
    let lines = rows
        .iter()
        .map(|r| GameLine {
            time: r.commence_time.format(TIME_FORMAT).to_string(),
            away: r.away_team.clone(),
            home: r.home_team.clone(),
            away_odds: best_cell(&r.best_away),
            home_odds: best_cell(&r.best_home),
        })
        .collect();
    format!("MLB Games and Best Odds:\n{}", grid::<GameLine>(lines))
}

#[derive(Tabled)]
struct ArbitrageLine {
    #[tabled(rename = "Game")]
    game: String,
    #[tabled(rename = "Away Team (Odds @ Bookmaker)")]
    away: String,
    #[tabled(rename = "Home Team (Odds @ Bookmaker)")]
    home: String,
    #[tabled(rename = "Away EV")]
    away_ev: String,
    #[tabled(rename = "Home EV")]
    home_ev: String,
    #[tabled(rename = "Margin")]
    margin: String,
}

fn leg_cell(leg: &ArbitrageLeg) -> String {
    format!("{} ({} @ {})", leg.team, leg.best_price, leg.bookmaker)
}

pub fn render_arbitrage(opportunities: &[ArbitrageOpportunity]) -> String {
    if opportunities.is_empty() {
        return "No arbitrage opportunities found".to_string();
    }
    let lines = opportunities
        .iter()
        .map(|o| ArbitrageLine {
            game: o.game.clone(),
            away: leg_cell(&o.away),
            home: leg_cell(&o.home),
            away_ev: format!("${:.2}", o.away.expected_value),
            home_ev: format!("${:.2}", o.home.expected_value),
            margin: pct(o.margin(), 2),
        })
        .collect();
    format!("Arbitrage Opportunities:\n{}", grid::<ArbitrageLine>(lines))
}

#[derive(Tabled)]
struct TeamOfferLine {
    #[tabled(rename = "Bookmaker")]
    bookmaker: String,
    #[tabled(rename = "Odds")]
    price: f64,
    #[tabled(rename = "Implied Probability")]
    implied: String,
    #[tabled(rename = "EV")]
    ev: String,
}

/// Every quote for one team in one game, highest price first.
pub fn render_team_offers(game: &Game, team: &str, offers: &[TeamOffer]) -> String {
    if offers.is_empty() {
        return format!("Game: {game}\nNo odds found for {team}");
    }
    let mut sorted: Vec<&TeamOffer> = offers.iter().collect();
    sorted.sort_by(|a, b| b.price.total_cmp(&a.price));
    let lines = sorted
        .into_iter()
        .map(|o| TeamOfferLine {
            bookmaker: o.bookmaker.clone(),
            price: o.price,
            implied: pct(o.implied_probability, 2),
            ev: format!("${:.2}", o.expected_value),
        })
        .collect();
    format!(
        "Game: {game}\nAll Odds for {team}:\n{}",
        grid::<TeamOfferLine>(lines)
    )
}

#[derive(Debug, Serialize)]
struct TeamSection<'a> {
    game: String,
    team: &'a str,
    offers: Vec<TeamOffer>,
}

/// The `--team` view: every game where `query` matches home or away.
///
/// JSON mode always emits an array, `[]` when nothing matches.
pub fn team_report(
    games: &[Game],
    query: &str,
    stake: f64,
    mode: OutputMode,
) -> anyhow::Result<String> {
    let mut sections = Vec::new();
    for game in games {
        let Some(side) = game.find_team(query) else {
            continue;
        };
        let team = game.team(side);
        let section = TeamSection {
            game: game.to_string(),
            team,
            offers: team_offers(game, team, stake)?,
        };
        sections.push((game, section));
    }

    match mode {
        OutputMode::Json => {
            let rows: Vec<&TeamSection> = sections.iter().map(|(_, s)| s).collect();
            to_json(&rows)
        }
        OutputMode::Table if sections.is_empty() => {
            Ok(format!("No games found for team: {query}"))
        }
        OutputMode::Table => Ok(sections
            .iter()
            .map(|(game, s)| render_team_offers(game, s.team, &s.offers))
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}

#[derive(Tabled)]
struct ValueLine {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Game")]
    game: String,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "H/A")]
    side: &'static str,
    #[tabled(rename = "Bookmaker")]
    bookmaker: String,
    #[tabled(rename = "Odds")]
    price: f64,
    #[tabled(rename = "Edge")]
    edge: String,
    #[tabled(rename = "Expected Value")]
    ev: String,
}

/// Value bets in their ranked order, truncated to `limit` (0 = all).
pub fn render_value_bets(bets: &[ValueBet], limit: usize, stake: f64) -> String {
    if bets.is_empty() {
        return "No positive expected value bets found".to_string();
    }
    let (shown, heading) = if limit > 0 && bets.len() > limit {
        (
            &bets[..limit],
            format!("Top {limit} Value Bets (out of {} found):", bets.len()),
        )
    } else {
        (bets, format!("All {} Value Bets:", bets.len()))
    };
    let lines = shown
        .iter()
        .enumerate()
        .map(|(i, b)| ValueLine {
            rank: i + 1,
            game: b.game.clone(),
            team: b.team.clone(),
            side: b.side.label(),
            bookmaker: b.bookmaker.clone(),
            price: b.price,
            edge: format!(
                "{}% ({} → {})",
                b.edge,
                pct(b.implied_probability, 1),
                pct(b.consensus_probability, 1)
            ),
            ev: format!("${:.2} (per ${stake})", b.expected_value),
        })
        .collect();
    format!("{heading}\n{}", grid::<ValueLine>(lines))
}

#[derive(Tabled)]
struct OfferLine {
    #[tabled(rename = "Game Time")]
    time: String,
    #[tabled(rename = "Game")]
    matchup: String,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "H/A")]
    side: &'static str,
    #[tabled(rename = "Bookmaker")]
    bookmaker: String,
    #[tabled(rename = "Odds")]
    price: f64,
    #[tabled(rename = "Implied Prob")]
    implied: String,
}

/// Sort flattened offers by game time, matchup, then team.
pub fn sort_offer_rows(rows: &mut [OfferRow]) {
    rows.sort_by(|a, b| {
        (a.commence_time, &a.matchup, &a.team).cmp(&(b.commence_time, &b.matchup, &b.team))
    });
}

pub fn render_all_offers(rows: &[OfferRow]) -> String {
    let lines = rows
        .iter()
        .map(|r| OfferLine {
            time: r.commence_time.format(TIME_FORMAT).to_string(),
            matchup: r.matchup.clone(),
            team: r.team.clone(),
            side: r.side.label(),
            bookmaker: r.bookmaker.clone(),
            price: r.price,
            implied: pct(r.implied_probability, 1),
        })
        .collect();
    format!("All Bookmaker Odds:\n{}", grid::<OfferLine>(lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::tests::{AWAY, HOME, game_with};
    use crate::aggregator::{all_offers, game_row, team_offers};
    use crate::config::AnalysisConfig;
    use crate::value::find_value_bets;

    #[test]
    fn games_table_marks_missing_side() {
        let game = game_with(&[("FanDuel", Some(1.9), None)]);
        let out = render_games(&[game_row(&game)]);
        assert!(out.contains("1.9 (FanDuel)"));
        assert!(out.contains("no offer"));
        assert!(out.contains("Home Odds"));
    }

    #[test]
    fn empty_results_print_a_message() {
        assert_eq!(render_arbitrage(&[]), "No arbitrage opportunities found");
        assert_eq!(
            render_value_bets(&[], 10, 100.0),
            "No positive expected value bets found"
        );
    }

    #[test]
    fn value_limit_truncates_display_only() {
        let game = game_with(&[
            ("FanDuel", Some(2.00), Some(2.50)),
            ("DraftKings", Some(2.20), Some(2.60)),
        ]);
        let bets = find_value_bets(&[game], &AnalysisConfig::default()).unwrap();
        assert_eq!(bets.len(), 4);

        let top = render_value_bets(&bets, 2, 100.0);
        assert!(top.starts_with("Top 2 Value Bets (out of 4 found):"));
        let all = render_value_bets(&bets, 0, 100.0);
        assert!(all.starts_with("All 4 Value Bets:"));
    }

    #[test]
    fn team_offers_list_highest_price_first() {
        let game = game_with(&[("FanDuel", Some(1.8), None), ("BetMGM", Some(1.95), None)]);
        let offers = team_offers(&game, HOME, 100.0).unwrap();
        let out = render_team_offers(&game, HOME, &offers);
        let betmgm = out.find("BetMGM").unwrap();
        let fanduel = out.find("FanDuel").unwrap();
        assert!(betmgm < fanduel);

        let none = render_team_offers(&game, AWAY, &[]);
        assert!(none.ends_with(&format!("No odds found for {AWAY}")));
    }

    #[test]
    fn team_report_matches_substring_case_insensitively() {
        let game = game_with(&[("FanDuel", Some(1.8), Some(2.1))]);
        let out = team_report(&[game.clone()], "padres", 100.0, OutputMode::Table).unwrap();
        assert!(out.starts_with(&format!("Game: {game}\nAll Odds for {AWAY}:")));

        let json = team_report(&[game], "dodgers", 100.0, OutputMode::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["team"], HOME);
        assert_eq!(parsed[0]["offers"][0]["bookmaker"], "FanDuel");
    }

    #[test]
    fn team_report_without_match() {
        let game = game_with(&[("FanDuel", Some(1.8), Some(2.1))]);
        let json = team_report(&[game.clone()], "Mets", 100.0, OutputMode::Json).unwrap();
        assert_eq!(json, "[]");
        assert_eq!(
            team_report(&[game], "Mets", 100.0, OutputMode::Table).unwrap(),
            "No games found for team: Mets"
        );
    }

    #[test]
    fn offer_rows_sort_by_time_matchup_team() {
        let game = game_with(&[("FanDuel", Some(2.0), Some(1.9))]);
        let mut rows = all_offers(&[game]).unwrap();
        sort_offer_rows(&mut rows);
        // "Los Angeles Dodgers" < "San Diego Padres"
        assert_eq!(rows[0].team, HOME);
        assert_eq!(rows[1].team, AWAY);
        assert!(render_all_offers(&rows).contains("50.0%"));
    }

    #[test]
    fn json_mode_serializes_records() {
        let game = game_with(&[("FanDuel", Some(2.0), None)]);
        let json = to_json(&[game_row(&game)]).unwrap();
        assert!(json.contains("\"status\": \"no_offer\""));
        assert!(json.contains("\"status\": \"found\""));
    }
}
