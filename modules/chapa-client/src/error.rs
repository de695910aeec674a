use thiserror::Error;

use myticket_common::MyTicketError;

pub type Result<T> = std::result::Result<T, ChapaError>;

#[derive(Debug, Error)]
pub enum ChapaError {
    /// The gateway answered and reported a non-success outcome, or omitted
    /// the checkout URL from an otherwise well-formed response.
    #[error("Gateway rejected transaction (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The call never completed usefully: timeout, transport failure, or
    /// an undecodable response body.
    #[error("Gateway unreachable: {0}")]
    Unreachable(String),
}

impl From<reqwest::Error> for ChapaError {
    fn from(err: reqwest::Error) -> Self {
        ChapaError::Unreachable(err.to_string())
    }
}

impl From<serde_json::Error> for ChapaError {
    fn from(err: serde_json::Error) -> Self {
        ChapaError::Unreachable(format!("malformed gateway response: {err}"))
    }
}

impl From<ChapaError> for MyTicketError {
    fn from(err: ChapaError) -> Self {
        match err {
            ChapaError::Rejected { status, message } => {
                MyTicketError::GatewayRejected { status, message }
            }
            ChapaError::Unreachable(message) => MyTicketError::GatewayUnreachable(message),
        }
    }
}
