use crate::{CatalogFetcher, FetchError};
use async_trait::async_trait;
use itunes_catalog::{ItunesClient, Url};

#[async_trait]
impl CatalogFetcher for ItunesClient {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        ItunesClient::fetch(self, url)
            .await
            .map_err(|error| FetchError(Box::new(error)))
    }
}
