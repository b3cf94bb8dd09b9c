use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{json, Value};

use chess_core::{ArchivePeriod, GameSummary, Username};

use crate::config::Config;
use crate::error::{AnalysisFailure, ClientError, FetchFailure};

#[derive(Deserialize)]
struct ArchivesBody {
    archives: Vec<String>,
}

#[derive(Deserialize)]
struct GamesBody {
    games: Vec<GameSummary>,
}

/// Body of an `/api/analyze` response, parsed once: JSON if possible,
/// otherwise the raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResponse {
    Json(Value),
    Text(String),
}

impl AnalysisResponse {
    fn from_bytes(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => AnalysisResponse::Json(value),
            Err(_) => AnalysisResponse::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

/// Client for the explorer backend. One attempt per call, no retries.
pub struct ApiClient {
    client: Client,
    base_url: Url,
    platform: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| ClientError::BaseUrl {
            url: config.api_base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::BaseUrl {
                url: config.api_base_url.clone(),
                reason: "not a hierarchical URL".to_string(),
            });
        }

        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            platform: config.platform.clone(),
        })
    }

    /// Base URL with `segments` appended, each percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can always take path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Fetch the archive identifiers for a user, in server order.
    pub async fn list_archives(&self, username: &Username) -> Result<Vec<String>, FetchFailure> {
        let url = self.endpoint(&["api", self.platform.as_str(), username.as_str(), "archives"]);
        tracing::debug!(%url, "Fetching archives");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchFailure::Network)?;

        if !resp.status().is_success() {
            return Err(FetchFailure::Status(resp.status()));
        }

        let body: ArchivesBody = resp.json().await.map_err(FetchFailure::Decode)?;
        Ok(body.archives)
    }

    /// Fetch the games a user finished in one archive period.
    pub async fn list_games(
        &self,
        username: &Username,
        period: &ArchivePeriod,
    ) -> Result<Vec<GameSummary>, FetchFailure> {
        let url = self.endpoint(&["api", self.platform.as_str(), username.as_str(), "games"]);
        tracing::debug!(%url, archive = %period, "Fetching games");

        let resp = self
            .client
            .get(url)
            .query(&[("archive", period.query_param())])
            .send()
            .await
            .map_err(FetchFailure::Network)?;

        if !resp.status().is_success() {
            return Err(FetchFailure::Status(resp.status()));
        }

        let body: GamesBody = resp.json().await.map_err(FetchFailure::Decode)?;
        Ok(body.games)
    }

    /// POST the game notation for analysis. The body is returned unvalidated;
    /// only transport and status are checked here.
    pub async fn submit_analysis(&self, pgn: &str) -> Result<AnalysisResponse, AnalysisFailure> {
        let url = self.endpoint(&["api", "analyze"]);

        let resp = self
            .client
            .post(url)
            .json(&json!({ "pgn": pgn }))
            .send()
            .await
            .map_err(AnalysisFailure::Network)?;

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(AnalysisFailure::Network)?;
        let body = AnalysisResponse::from_bytes(&bytes);

        if status.is_success() {
            tracing::debug!("Analysis response: {:?}", body);
            Ok(body)
        } else {
            tracing::error!("Error response: {} {:?}", status, body);
            Err(AnalysisFailure::Status { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body_parsed() {
        let body = AnalysisResponse::from_bytes(br#"{"moves": [], "fens": ["x"]}"#);
        assert_eq!(body, AnalysisResponse::Json(json!({"moves": [], "fens": ["x"]})));
    }

    #[test]
    fn test_text_body_kept_verbatim() {
        let body = AnalysisResponse::from_bytes(b"Analysis coming soon");
        assert_eq!(body, AnalysisResponse::Text("Analysis coming soon".into()));
    }

    #[test]
    fn test_empty_body_is_text() {
        assert_eq!(AnalysisResponse::from_bytes(b""), AnalysisResponse::Text(String::new()));
    }

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&Config::with_base_url(base_url)).unwrap()
    }

    #[test]
    fn test_username_is_one_encoded_path_segment() {
        let api = client("http://localhost:8000");
        let url = api.endpoint(&["api", "chesscom", "a#b", "archives"]);
        assert_eq!(url.as_str(), "http://localhost:8000/api/chesscom/a%23b/archives");

        let url = api.endpoint(&["api", "chesscom", "a/b?c", "games"]);
        assert_eq!(url.as_str(), "http://localhost:8000/api/chesscom/a%2Fb%3Fc/games");
    }

    #[test]
    fn test_base_url_path_prefix_kept() {
        let api = client("http://localhost:8000/proxy/");
        assert_eq!(
            api.endpoint(&["api", "analyze"]).as_str(),
            "http://localhost:8000/proxy/api/analyze"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        for base in ["not a url", "mailto:someone@example.com"] {
            let err = ApiClient::new(&Config::with_base_url(base)).err();
            assert!(matches!(err, Some(ClientError::BaseUrl { .. })), "{base}");
        }
    }
}
