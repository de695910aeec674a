use serde::{Deserialize, Serialize};

/// The gateway rejects titles longer than 16 characters.
pub const MAX_TITLE_CHARS: usize = 16;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customization {
    pub title: String,
    pub description: String,
}

impl Customization {
    /// Builds a customization block, truncating the title to the
    /// gateway's 16-character limit.
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.chars().take(MAX_TITLE_CHARS).collect(),
            description: description.to_string(),
        }
    }
}

/// Body for `POST /transaction/initialize`. `amount` is a two-decimal
/// string; `tx_ref` must be unique per attempt.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InitializeRequest {
    pub amount: String,
    pub currency: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub tx_ref: String,
    pub callback_url: String,
    pub return_url: String,
    pub customization: Customization,
}

#[derive(Debug, Deserialize)]
pub struct InitializeResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<InitializeData>,
}

#[derive(Debug, Deserialize)]
pub struct InitializeData {
    #[serde(default)]
    pub checkout_url: Option<String>,
}
