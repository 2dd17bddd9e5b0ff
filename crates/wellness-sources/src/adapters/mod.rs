//! `SourceAdapter` implementations.

pub mod csv_table;
pub mod http_json;
pub mod static_table;

pub use csv_table::{parse_wide_csv, HttpCsvAdapter};
pub use http_json::HttpJsonAdapter;
pub use static_table::StaticTableAdapter;

use std::time::Duration;

use reqwest::{Client, Response};

use wellness_contracts::{
    error::{WellnessError, WellnessResult},
    provider::Provider,
};

const USER_AGENT: &str = concat!("wellness-sources/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by every network adapter.
pub fn http_client(timeout: Duration) -> WellnessResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| WellnessError::ConfigError {
            reason: format!("failed to create HTTP client: {}", e),
        })
}

/// `GET url`, failing on transport errors and non-2xx statuses.
pub(crate) async fn get_checked(http: &Client, provider: Provider, url: &str) -> WellnessResult<Response> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| WellnessError::AdapterFailed {
            provider,
            reason: format!("request to {} failed: {}", url, e),
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(WellnessError::AdapterFailed {
            provider,
            reason: format!(
                "{} returned {}: {}",
                url,
                status,
                body.chars().take(200).collect::<String>()
            ),
        });
    }
    Ok(response)
}
