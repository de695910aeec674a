pub mod error;
pub mod types;

pub use error::{CatalogError, Result};
pub use types::{RawCatalog, WireEvent, WirePlace, WireTicket};

use std::time::Duration;

use myticket_common::Catalog;

pub struct CatalogClient {
    client: reqwest::Client,
    url: String,
}

impl CatalogClient {
    pub fn new(url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            url: url.to_string(),
        }
    }

    /// Fetch the event/place catalog. One request, no retry; any transport
    /// or decode failure is an explicit error rather than partial data.
    pub async fn fetch_catalog(&self) -> Result<Catalog> {
        let resp = self.client.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let raw: RawCatalog = serde_json::from_str(&body)?;
        let catalog = types::validate(raw);

        tracing::info!(
            events = catalog.events.len(),
            places = catalog.places.len(),
            "Fetched catalog"
        );

        Ok(catalog)
    }
}
