//! An adapter that serves a fixed, in-memory record table.

use async_trait::async_trait;
use tracing::debug;

use wellness_contracts::{error::WellnessResult, provider::Provider, record::CountryRawRecord};
use wellness_core::traits::SourceAdapter;

use crate::mock_data;

pub struct StaticTableAdapter {
    provider: Provider,
    records: Vec<CountryRawRecord>,
}

impl StaticTableAdapter {
    pub fn new(provider: Provider, records: Vec<CountryRawRecord>) -> Self {
        Self { provider, records }
    }

    /// The built-in table for `provider`.
    pub fn builtin(provider: Provider) -> Self {
        Self::new(provider, mock_data::records_for(provider))
    }

    pub fn records(&self) -> &[CountryRawRecord] {
        &self.records
    }
}

#[async_trait]
impl SourceAdapter for StaticTableAdapter {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn fetch(&self) -> WellnessResult<Vec<CountryRawRecord>> {
        debug!(provider = %self.provider, records = self.records.len(), "serving static table");
        Ok(self.records.clone())
    }
}
