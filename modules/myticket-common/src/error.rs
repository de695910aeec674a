use thiserror::Error;

use crate::types::{EventId, TierLabel};

/// Top-level failure taxonomy. Everything here is recoverable at the
/// screen boundary: rendered as a message or fallback state, never fatal.
#[derive(Error, Debug)]
pub enum MyTicketError {
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Unknown ticket tier {tier} for event {event_id}")]
    UnknownTier { event_id: EventId, tier: TierLabel },

    #[error("Payment rejected by gateway (status {status}): {message}")]
    GatewayRejected { status: u16, message: String },

    #[error("Payment gateway unreachable: {0}")]
    GatewayUnreachable(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Checkout already {state}; reset before retrying")]
    InvalidCheckoutState { state: String },

    #[error("Order total overflow")]
    TotalOverflow,

    #[error("Store error: {0}")]
    Store(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
