use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use mlb_odds::{
    aggregator,
    api::OddsApiClient,
    arbitrage,
    cli::{Cli, DateFilter, Mode},
    config::AppConfig,
    output::{self, OutputMode},
    parser, utils, value,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = utils::init_logging();

    let cli = Cli::parse();
    let analysis = cli.analysis_config();
    analysis.validate()?;
    let mode = OutputMode::from_json_flag(cli.json);

    let config = AppConfig::load()?;
    let client = OddsApiClient::new(config)?;

    tracing::info!(sport = %cli.sport, "[INIT] fetching odds");
    let snapshot = client
        .get_odds(&cli.sport)
        .await
        .context("failed to fetch odds data")?;

    let report = parser::parse_payload(&snapshot.payload)?;
    for rejected in &report.rejected {
        tracing::warn!(index = rejected.index, error = %rejected.error, "[PARSE] skipping game");
    }
    tracing::info!(
        games = report.games.len(),
        skipped = report.rejected.len(),
        "[PARSE] odds loaded"
    );

    let filter = cli.date_filter();
    let games = filter.apply(report.games, Local::now().date_naive());
    if filter != DateFilter::All {
        tracing::info!(games = games.len(), ?filter, "[FILTER] games on selected date");
    }

    let rendered = match cli.mode() {
        Mode::AllOdds => {
            let mut rows = aggregator::all_offers(&games)?;
            output::sort_offer_rows(&mut rows);
            match mode {
                OutputMode::Json => output::to_json(&rows)?,
                OutputMode::Table => output::render_all_offers(&rows),
            }
        }
        Mode::Team(query) => output::team_report(&games, &query, analysis.stake, mode)?,
        Mode::Arbitrage => {
            let opportunities = arbitrage::find_arbitrage_opportunities(&games, &analysis)?;
            match mode {
                OutputMode::Json => output::to_json(&opportunities)?,
                OutputMode::Table => output::render_arbitrage(&opportunities),
            }
        }
        Mode::Value => {
            let bets = value::find_value_bets(&games, &analysis)?;
            match mode {
                OutputMode::Json => {
                    let shown = if cli.value_limit > 0 {
                        &bets[..bets.len().min(cli.value_limit)]
                    } else {
                        &bets[..]
                    };
                    output::to_json(shown)?
                }
                OutputMode::Table => {
                    output::render_value_bets(&bets, cli.value_limit, analysis.stake)
                }
            }
        }
        Mode::Games => {
            let rows: Vec<_> = games.iter().map(aggregator::game_row).collect();
            match mode {
                OutputMode::Json => output::to_json(&rows)?,
                OutputMode::Table => output::render_games(&rows),
            }
        }
    };

    println!("{rendered}");
    Ok(())
}
