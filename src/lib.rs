//! Core library for the mlb-odds project.
//!
//! Raw Odds API payloads are parsed once into an immutable [`models::Game`]
//! snapshot; the aggregator, arbitrage detector and value bet ranker read from
//! it and return plain records. Fetching and rendering live at the edges
//! (`api`, `output`) and are driven by the binary.

pub mod aggregator;
pub mod api;
pub mod arbitrage;
pub mod calc;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod output;
pub mod parser;
pub mod utils;
pub mod value;
