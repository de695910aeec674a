use thiserror::Error;

use myticket_common::MyTicketError;

pub type Result<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider answered with an error. The message is surfaced
    /// verbatim to the user (e.g. `EMAIL_NOT_FOUND`, `INVALID_PASSWORD`).
    #[error("{0}")]
    Provider(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::Parse(err.to_string())
    }
}

impl From<AuthError> for MyTicketError {
    fn from(err: AuthError) -> Self {
        MyTicketError::AuthFailed(err.to_string())
    }
}
