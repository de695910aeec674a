pub mod error;
pub mod types;

pub use error::{ChapaError, Result};
pub use types::{Customization, InitializeData, InitializeRequest, InitializeResponse};

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.chapa.co/v1";

pub struct ChapaClient {
    client: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl ChapaClient {
    pub fn new(base_url: &str, secret_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
        }
    }

    /// Initialize a transaction and return the hosted checkout URL.
    /// Exactly one outbound call; retrying is the caller's decision and
    /// requires a fresh `tx_ref`.
    pub async fn initialize(&self, request: &InitializeRequest) -> Result<String> {
        let url = format!("{}/transaction/initialize", self.base_url);

        tracing::info!(
            tx_ref = request.tx_ref.as_str(),
            amount = request.amount.as_str(),
            currency = request.currency.as_str(),
            "Initializing payment"
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ChapaError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let parsed: InitializeResponse = serde_json::from_str(&body)?;

        let reported_success = parsed.status.as_deref() == Some("success");
        let checkout_url = parsed.data.and_then(|d| d.checkout_url);

        match checkout_url {
            Some(url) if reported_success => {
                tracing::info!(tx_ref = request.tx_ref.as_str(), "Payment initialized");
                Ok(url)
            }
            _ => Err(ChapaError::Rejected {
                status: status.as_u16(),
                message: parsed
                    .message
                    .unwrap_or_else(|| "checkout URL missing from gateway response".to_string()),
            }),
        }
    }
}
