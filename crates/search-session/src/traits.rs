use async_trait::async_trait;
use itunes_catalog::Url;
use std::fmt::Formatter;

#[derive(Debug, thiserror::Error)]
pub struct FetchError(pub Box<dyn std::error::Error + Send + Sync>);

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transport used by a search session to download a search response.
#[async_trait]
pub trait CatalogFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}
