use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// A raw game record is missing a required field or has one of the wrong shape.
    #[error("Malformed record at `{path}`: {reason}")]
    MalformedRecord { path: String, reason: String },

    /// No bookmaker quoted the team in this game.
    #[error("No offer found for {team}")]
    NoOffer { team: String },

    #[error("Invalid probability: {0} (expected 0..=1)")]
    InvalidProbability(f64),

    #[error("Invalid decimal price: {0} (expected > 1.0)")]
    InvalidPrice(f64),

    #[error("Invalid analysis config: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Odds API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl AppError {
    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
