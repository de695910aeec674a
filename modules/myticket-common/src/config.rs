use std::env;

use tracing::info;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Catalog
    pub catalog_url: String,

    // Chapa payment gateway
    pub chapa_base_url: String,
    pub chapa_secret_key: String,
    pub chapa_callback_url: String,
    pub chapa_return_url: String,

    // Identity provider
    pub identity_base_url: String,
    pub identity_api_key: String,

    // Local persistence (session, preferences)
    pub data_dir: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            catalog_url: env::var("CATALOG_URL")
                .unwrap_or_else(|_| "https://zelesegna.com/myticket/app/".to_string()),
            chapa_base_url: env::var("CHAPA_BASE_URL")
                .unwrap_or_else(|_| "https://api.chapa.co/v1".to_string()),
            chapa_secret_key: required_env("CHAPA_SECRET_KEY"),
            chapa_callback_url: required_env("CHAPA_CALLBACK_URL"),
            chapa_return_url: required_env("CHAPA_RETURN_URL"),
            identity_base_url: env::var("IDENTITY_BASE_URL")
                .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com/v1".to_string()),
            identity_api_key: required_env("IDENTITY_API_KEY"),
            data_dir: env::var("MYTICKET_DATA_DIR").unwrap_or_else(|_| ".myticket".to_string()),
        }
    }

    /// Load a minimal config for read-only browsing (no payment or
    /// identity keys needed).
    pub fn browse_from_env() -> Self {
        Self {
            catalog_url: env::var("CATALOG_URL")
                .unwrap_or_else(|_| "https://zelesegna.com/myticket/app/".to_string()),
            chapa_base_url: env::var("CHAPA_BASE_URL")
                .unwrap_or_else(|_| "https://api.chapa.co/v1".to_string()),
            chapa_secret_key: String::new(),
            chapa_callback_url: String::new(),
            chapa_return_url: String::new(),
            identity_base_url: env::var("IDENTITY_BASE_URL")
                .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com/v1".to_string()),
            identity_api_key: String::new(),
            data_dir: env::var("MYTICKET_DATA_DIR").unwrap_or_else(|_| ".myticket".to_string()),
        }
    }

    /// Log the loaded configuration with secrets masked.
    pub fn log_redacted(&self) {
        info!(
            catalog_url = self.catalog_url.as_str(),
            chapa_base_url = self.chapa_base_url.as_str(),
            chapa_secret_key = mask(&self.chapa_secret_key),
            identity_base_url = self.identity_base_url.as_str(),
            identity_api_key = mask(&self.identity_api_key),
            data_dir = self.data_dir.as_str(),
            "Configuration loaded"
        );
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        "(unset)"
    } else {
        "***"
    }
}
