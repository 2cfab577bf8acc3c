//! HTTP client for The Odds API.
//!
//! Responsibilities:
//! • Fetch the raw odds payload for a sport.
//! • Report request quota from response headers.
//! • Surface non-2xx responses as typed errors.

pub mod odds_api;

pub use odds_api::{ApiUsage, OddsApiClient, OddsSnapshot, Sport};
