//! Command-line arguments for the `mlb-odds` binary.

use crate::config::{AnalysisConfig, DEFAULT_SPORT};
use crate::models::Game;
use crate::utils::games_on_date;
use chrono::{NaiveDate, Utc};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "mlb-odds",
    about = "MLB odds finder: best prices, arbitrage and positive-EV bets"
)]
pub struct Cli {
    /// Show all games, not just today's
    #[arg(long)]
    pub show_all: bool,

    /// Show games for a specific date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Show every bookmaker's odds for a team (case-insensitive substring)
    #[arg(long)]
    pub team: Option<String>,

    /// Find arbitrage opportunities
    #[arg(long)]
    pub arbitrage: bool,

    /// Find positive expected value bets
    #[arg(long)]
    pub value: bool,

    /// Limit value bets shown (0 for all)
    #[arg(long, default_value_t = 10)]
    pub value_limit: usize,

    /// Minimum odds to consider for value bets
    #[arg(long, default_value_t = 1.5)]
    pub min_odds: f64,

    /// Maximum odds to consider for value bets
    #[arg(long, default_value_t = 10.0)]
    pub max_odds: f64,

    /// Show all odds from all bookmakers for all games
    #[arg(long)]
    pub all_odds: bool,

    #[arg(long, env = "ODDS_SPORT", default_value = DEFAULT_SPORT)]
    pub sport: String,

    /// Notional stake used for EV figures
    #[arg(long, default_value_t = 100.0)]
    pub stake: f64,

    /// Implied-probability sum below which a game counts as an arbitrage
    #[arg(long, default_value_t = 0.98)]
    pub arb_threshold: f64,

    /// Print JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

/// What the run should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    AllOdds,
    Team(String),
    Arbitrage,
    Value,
    Games,
}

/// Which games survive before analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    All,
    Today,
    On(NaiveDate),
}

impl DateFilter {
    /// Keep the games starting on the selected UTC calendar date. `today` is
    /// the caller's local date.
    pub fn apply(self, games: Vec<Game>, today: NaiveDate) -> Vec<Game> {
        match self {
            DateFilter::All => games,
            DateFilter::Today => games_on_date(games, today, &Utc),
            DateFilter::On(date) => games_on_date(games, date, &Utc),
        }
    }
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.all_odds {
            Mode::AllOdds
        } else if let Some(team) = &self.team {
            Mode::Team(team.clone())
        } else if self.arbitrage {
            Mode::Arbitrage
        } else if self.value {
            Mode::Value
        } else {
            Mode::Games
        }
    }

    /// An explicit date wins over `--show-all`.
    pub fn date_filter(&self) -> DateFilter {
        match (self.date, self.show_all) {
            (Some(date), _) => DateFilter::On(date),
            (None, true) => DateFilter::All,
            (None, false) => DateFilter::Today,
        }
    }

    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            arbitrage_threshold: self.arb_threshold,
            stake: self.stake,
            min_price: self.min_odds,
            max_price: self.max_odds,
            ..AnalysisConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mlb-odds").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_show_todays_games() {
        let cli = parse(&[]);
        assert_eq!(cli.mode(), Mode::Games);
        assert_eq!(cli.date_filter(), DateFilter::Today);
        assert_eq!(cli.value_limit, 10);
        assert_eq!(cli.analysis_config(), AnalysisConfig::default());
    }

    #[test]
    fn all_odds_takes_precedence() {
        let cli = parse(&["--value", "--arbitrage", "--team", "Mets", "--all-odds"]);
        assert_eq!(cli.mode(), Mode::AllOdds);
        let cli = parse(&["--value", "--arbitrage", "--team", "Mets"]);
        assert_eq!(cli.mode(), Mode::Team("Mets".into()));
        let cli = parse(&["--value", "--arbitrage"]);
        assert_eq!(cli.mode(), Mode::Arbitrage);
    }

    #[test]
    fn explicit_date_beats_show_all() {
        let cli = parse(&["--show-all", "--date", "2024-07-04"]);
        assert_eq!(
            cli.date_filter(),
            DateFilter::On(NaiveDate::from_ymd_opt(2024, 7, 4).unwrap())
        );
        assert_eq!(parse(&["--show-all"]).date_filter(), DateFilter::All);
    }

    #[test]
    fn date_filter_compares_utc_calendar_date() {
        use crate::aggregator::tests::game_with;

        // Starts 2024-06-02 02:10 UTC.
        let game = game_with(&[("FanDuel", Some(1.9), Some(1.9))]);
        let june_1 = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let june_2 = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();

        let on = |args: &[&str]| parse(args).date_filter().apply(vec![game.clone()], june_1);
        assert_eq!(on(&["--date", "2024-06-02"]).len(), 1);
        assert!(on(&["--date", "2024-06-01"]).is_empty());
        assert_eq!(on(&["--show-all"]).len(), 1);

        assert!(DateFilter::Today.apply(vec![game.clone()], june_1).is_empty());
        assert_eq!(DateFilter::Today.apply(vec![game], june_2).len(), 1);
    }

    #[test]
    fn invalid_date_is_rejected() {
        assert!(Cli::try_parse_from(["mlb-odds", "--date", "07/04/2024"]).is_err());
    }

    #[test]
    fn value_window_flows_into_config() {
        let cli = parse(&["--value", "--min-odds", "2", "--max-odds", "4.5", "--stake", "25"]);
        let cfg = cli.analysis_config();
        assert_eq!(cfg.min_price, 2.0);
        assert_eq!(cfg.max_price, 4.5);
        assert_eq!(cfg.stake, 25.0);
    }
}
