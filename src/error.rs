use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between building the catalog request and
/// holding a decoded catalog.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build catalog request: {0}")]
    Request(String),

    #[error("catalog request failed")]
    Transport(#[source] reqwest::Error),

    #[error("catalog endpoint returned {0}")]
    Status(StatusCode),

    #[error("failed to read catalog response body")]
    Body(#[source] reqwest::Error),

    #[error("failed to decode catalog JSON")]
    Decode(#[from] serde_json::Error),
}
