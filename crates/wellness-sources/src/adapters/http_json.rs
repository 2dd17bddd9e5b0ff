//! HTTP adapter for endpoints that already speak the record format.
//!
//! The endpoint must answer `GET` with a JSON array of `CountryRawRecord`
//! (camelCase fields).

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use wellness_contracts::{
    error::{WellnessError, WellnessResult},
    provider::Provider,
    record::CountryRawRecord,
};
use wellness_core::traits::SourceAdapter;

use super::get_checked;

pub struct HttpJsonAdapter {
    provider: Provider,
    url: String,
    http: Client,
}

impl HttpJsonAdapter {
    /// `http` carries the request timeout; share one client across adapters.
    pub fn new(provider: Provider, url: impl Into<String>, http: Client) -> Self {
        Self {
            provider,
            url: url.into(),
            http,
        }
    }
}

#[async_trait]
impl SourceAdapter for HttpJsonAdapter {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn fetch(&self) -> WellnessResult<Vec<CountryRawRecord>> {
        let response = get_checked(&self.http, self.provider, &self.url).await?;
        let records: Vec<CountryRawRecord> =
            response.json().await.map_err(|e| WellnessError::Parse {
                provider: self.provider,
                reason: format!("invalid JSON from {}: {}", self.url, e),
            })?;
        debug!(provider = %self.provider, url = %self.url, records = records.len(), "fetched JSON records");
        Ok(records)
    }
}
