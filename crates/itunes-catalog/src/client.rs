use crate::parser::{parse_search_response, ParseError, SearchResponse};
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::debug;

pub const ITUNES_SEARCH_ENDPOINT: &str = "https://itunes.apple.com/search";
pub const SEARCH_RESULT_LIMIT: u32 = 200;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ItunesClientError {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error(transparent)]
    ParseError(#[from] ParseError),
    #[error("Unexpected response status: {0}")]
    UnexpectedStatus(StatusCode),
    #[error("Invalid catalog endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Builds the search request URL for `term` against `endpoint`.
///
/// The term is form-urlencoded, so spaces become `+` as the search API expects.
pub fn search_url(endpoint: &Url, term: &str) -> Url {
    let mut url = endpoint.clone();

    url.query_pairs_mut()
        .clear()
        .append_pair("term", term)
        .append_pair("limit", &SEARCH_RESULT_LIMIT.to_string());

    url
}

pub struct ItunesClient {
    client: Client,
    endpoint: Url,
}

impl ItunesClient {
    pub fn create(endpoint: &str, timeout: Duration) -> Result<Self, ItunesClientError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|error| ItunesClientError::InvalidEndpoint(error.to_string()))?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Performs a GET on `url` and returns the raw response body.
    pub async fn fetch(&self, url: &Url) -> Result<Vec<u8>, ItunesClientError> {
        debug!(%url, "Fetching catalog search results");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ItunesClientError::UnexpectedStatus(status));
        }

        Ok(response.bytes().await?.to_vec())
    }

    pub async fn search(&self, term: &str) -> Result<SearchResponse, ItunesClientError> {
        let url = search_url(&self.endpoint, term);
        let raw_json = self.fetch(&url).await?;

        Ok(parse_search_response(&raw_json)?)
    }
}
