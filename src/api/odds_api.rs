use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

const BODY_SNIPPET_CHARS: usize = 220;

/// Sport listing entry from `GET /sports`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Sport {
    pub key: String,
    #[serde(default)]
    pub group: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub has_outrights: bool,
}

/// Request quota reported by the API on every odds call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiUsage {
    pub remaining: Option<String>,
    pub used: Option<String>,
}

/// Raw odds payload plus the quota it cost.
#[derive(Debug, Clone)]
pub struct OddsSnapshot {
    /// Top-level JSON array of games, untouched.
    pub payload: Value,
    pub usage: ApiUsage,
}

/// Minimal async client for The Odds API v4.
#[derive(Clone)]
pub struct OddsApiClient {
    http: Client,
    config: AppConfig,
}

impl OddsApiClient {
    pub fn new(config: AppConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("mlb-odds/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("base url `{}` cannot be a base", self.config.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// List sports currently offered by the API.
    pub async fn get_sports(&self) -> Result<Vec<Sport>> {
        let url = self.endpoint(&["sports"])?;
        let resp = self
            .http
            .get(url)
            .query(&[("apiKey", self.config.api_key.as_str())])
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json().await?)
    }

    /// Fetch the raw odds payload for a sport key, e.g. `baseball_mlb`.
    pub async fn get_odds(&self, sport: &str) -> Result<OddsSnapshot> {
        let url = self.endpoint(&["sports", sport, "odds"])?;
        debug!(%url, sport, "[API] requesting odds");
        let resp = self
            .http
            .get(url)
            .query(&[
                ("apiKey", self.config.api_key.as_str()),
                ("regions", self.config.regions.as_str()),
                ("markets", self.config.markets.as_str()),
                ("oddsFormat", self.config.odds_format.as_str()),
                ("dateFormat", self.config.date_format.as_str()),
            ])
            .send()
            .await?;
        let resp = ensure_success(resp).await?;

        let usage = ApiUsage {
            remaining: header(&resp, "x-requests-remaining"),
            used: header(&resp, "x-requests-used"),
        };
        info!(
            remaining = usage.remaining.as_deref().unwrap_or("unknown"),
            used = usage.used.as_deref().unwrap_or("unknown"),
            "[API] usage"
        );

        let payload: Value = resp.json().await?;
        Ok(OddsSnapshot { payload, usage })
    }
}

fn header(resp: &Response, name: &str) -> Option<String> {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn ensure_success(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let snippet: String = body
        .trim()
        .replace(['\n', '\r'], " ")
        .chars()
        .take(BODY_SNIPPET_CHARS)
        .collect();
    Err(AppError::Api {
        status: status.as_u16(),
        body: snippet,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OddsApiClient {
        let config = AppConfig {
            api_key: "test-key".into(),
            base_url: Url::parse(&format!("{}/v4", server.uri())).unwrap(),
            regions: "us".into(),
            markets: "h2h".into(),
            odds_format: "decimal".into(),
            date_format: "iso".into(),
        };
        OddsApiClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn get_odds_sends_query_and_reads_usage() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/sports/baseball_mlb/odds"))
            .and(query_param("apiKey", "test-key"))
            .and(query_param("regions", "us"))
            .and(query_param("markets", "h2h"))
            .and(query_param("oddsFormat", "decimal"))
            .and(query_param("dateFormat", "iso"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-requests-remaining", "487")
                    .insert_header("x-requests-used", "13")
                    .set_body_json(json!([{ "id": "abc" }])),
            )
            .mount(&server)
            .await;

        let snapshot = client_for(&server).get_odds("baseball_mlb").await.unwrap();
        assert_eq!(snapshot.payload, json!([{ "id": "abc" }]));
        assert_eq!(snapshot.usage.remaining.as_deref(), Some("487"));
        assert_eq!(snapshot.usage.used.as_deref(), Some("13"));
    }

    #[tokio::test]
    async fn get_odds_maps_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/sports/baseball_mlb/odds"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string("{\"message\":\"API key is not valid\"}\n"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).get_odds("baseball_mlb").await.unwrap_err();
        match err {
            AppError::Api { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("API key is not valid"));
                assert!(!body.contains('\n'));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_sports_parses_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/sports"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "key": "baseball_mlb",
                "group": "Baseball",
                "title": "MLB",
                "description": "Major League Baseball",
                "active": true,
                "has_outrights": false
            }])))
            .mount(&server)
            .await;

        let sports = client_for(&server).get_sports().await.unwrap();
        assert_eq!(sports.len(), 1);
        assert_eq!(sports[0].key, "baseball_mlb");
        assert!(sports[0].active);
    }
}
