use crate::catalog::Catalog;
use crate::error::FetchError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

const CATALOG_URL: &str = "https://www.njlottery.com/api/v1/instant-games/games/";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_13_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/62.0.3202.94 Safari/537.36";

/// Where and how to ask for the instant game listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Listing page size; one page large enough to hold every game
    pub page_size: u32,
    pub accept: String,
    pub user_agent: String,
    /// None leaves reqwest's default in place
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: CATALOG_URL.to_string(),
            page_size: 1000,
            accept: "application/json".to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn catalog_url(&self) -> String {
        format!("{}?size={}", self.base_url, self.page_size)
    }

    /// Fixed request headers.
    pub fn headers(&self) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        insert_header(&mut headers, ACCEPT, &self.accept)?;
        insert_header(&mut headers, USER_AGENT, &self.user_agent)?;
        Ok(headers)
    }
}

fn insert_header(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<(), FetchError> {
    let value = HeaderValue::from_str(value)
        .map_err(|e| FetchError::Request(format!("invalid {} header: {}", name, e)))?;
    headers.insert(name, value);
    Ok(())
}

/// Status and body of a finished GET.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Seam between the catalog fetch and the network.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<RawResponse, FetchError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Request(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<RawResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    FetchError::Request(e.to_string())
                } else {
                    FetchError::Transport(e)
                }
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(FetchError::Body)?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// Fetch and decode the full instant game listing.
pub async fn fetch_catalog<T: Transport>(transport: &T, config: &ApiConfig) -> Result<Catalog, FetchError> {
    let url = config.catalog_url();
    let headers = config.headers()?;

    info!("Fetching instant game catalog from {}", url);
    let response = transport.get(&url, headers).await?;

    if !response.status.is_success() {
        return Err(FetchError::Status(response.status));
    }
    debug!("Received {} bytes", response.body.len());

    let catalog = decode_catalog(&response.body)?;
    info!("Fetched {} games", catalog.games.len());
    Ok(catalog)
}

/// Decode a listing payload. Malformed or incomplete JSON is an error.
pub fn decode_catalog(body: &[u8]) -> Result<Catalog, FetchError> {
    Ok(serde_json::from_slice(body)?)
}
