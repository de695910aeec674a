use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct CredentialsBody {
    pub email: String,
    pub password: String,
    #[serde(rename = "returnSecureToken")]
    pub return_secure_token: bool,
}

#[derive(Debug, Serialize)]
pub struct OobCodeBody {
    #[serde(rename = "requestType")]
    pub request_type: String,
    pub email: String,
}

/// Shared response shape of `accounts:signInWithPassword` and
/// `accounts:signUp`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(rename = "localId")]
    pub local_id: String,
    pub email: String,
    #[serde(rename = "idToken")]
    pub id_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: u16,
    pub message: String,
}
