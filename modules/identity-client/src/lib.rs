pub mod error;
pub mod types;

pub use error::{AuthError, Result};
pub use types::{CredentialsBody, ErrorResponse, OobCodeBody, TokenResponse};

use std::time::Duration;

use myticket_common::Session;

pub const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

pub struct IdentityClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        tracing::info!(email, "Signing in");
        self.token_call("accounts:signInWithPassword", email, password)
            .await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session> {
        tracing::info!(email, "Registering account");
        self.token_call("accounts:signUp", email, password).await
    }

    /// Ask the provider to email a password-reset link.
    pub async fn send_password_reset(&self, email: &str) -> Result<()> {
        let url = self.endpoint("accounts:sendOobCode");
        let body = OobCodeBody {
            request_type: "PASSWORD_RESET".to_string(),
            email: email.to_string(),
        };

        let resp = self.client.post(&url).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(provider_error(&text));
        }
        tracing::info!(email, "Password reset email requested");
        Ok(())
    }

    async fn token_call(&self, method: &str, email: &str, password: &str) -> Result<Session> {
        let url = self.endpoint(method);
        let body = CredentialsBody {
            email: email.to_string(),
            password: password.to_string(),
            return_secure_token: true,
        };

        let resp = self.client.post(&url).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(provider_error(&text));
        }

        let token: TokenResponse = serde_json::from_str(&text)?;
        Ok(Session {
            local_id: token.local_id,
            email: token.email,
            id_token: token.id_token,
            refresh_token: token.refresh_token,
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/{}?key={}", self.base_url, method, self.api_key)
    }
}

/// Pull the provider's message out of an error body; fall back to the raw
/// body when it has some other shape.
fn provider_error(body: &str) -> AuthError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => AuthError::Provider(parsed.error.message),
        Err(_) => AuthError::Provider(body.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_extracts_message() {
        let err = provider_error(r#"{"error": {"code": 400, "message": "EMAIL_NOT_FOUND"}}"#);
        assert!(matches!(err, AuthError::Provider(m) if m == "EMAIL_NOT_FOUND"));
    }

    #[test]
    fn provider_error_falls_back_to_raw_body() {
        let err = provider_error("upstream exploded");
        assert!(matches!(err, AuthError::Provider(m) if m == "upstream exploded"));
    }
}
