use reqwest::StatusCode;

use chess_core::ModelError;

use crate::clients::api::AnalysisResponse;

/// The HTTP client could not be built from the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid API base URL '{url}': {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// A failed GET against the archive or game listing endpoints.
#[derive(Debug, thiserror::Error)]
pub enum FetchFailure {
    #[error("Request error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    Status(StatusCode),

    #[error("Invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl FetchFailure {
    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchFailure::Status(status) => Some(*status),
            FetchFailure::Network(e) | FetchFailure::Decode(e) => e.status(),
        }
    }
}

/// Any way an analysis attempt can end without installing a result.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisFailure {
    #[error("An analysis is already running")]
    InFlight,

    #[error("Analysis request error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Analysis HTTP error! status: {status}")]
    Status {
        status: StatusCode,
        body: AnalysisResponse,
    },

    #[error("Analysis response was not JSON")]
    Unparsed(String),

    #[error("Analysis payload missing moves/fens: {0}")]
    Payload(#[source] serde_json::Error),

    #[error(transparent)]
    Shape(ModelError),
}

impl AnalysisFailure {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AnalysisFailure::Status { status, .. } => Some(*status),
            AnalysisFailure::Network(e) => e.status(),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// Bad user input; no request was made.
    #[error("{0}")]
    Validation(String),

    /// Out-of-range index or nothing selected yet.
    #[error("{0}")]
    Selection(String),

    #[error(transparent)]
    Fetch(#[from] FetchFailure),

    #[error(transparent)]
    Analysis(#[from] AnalysisFailure),
}

impl From<ModelError> for ExplorerError {
    fn from(e: ModelError) -> Self {
        ExplorerError::Validation(e.to_string())
    }
}
