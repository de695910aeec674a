//! One checkout attempt against the payment gateway.
//!
//! State machine: `Idle → Submitting → {Redirecting | Failed}`.
//! `Redirecting` hands control to the gateway via the returned URL;
//! `Failed` can be `reset` back to `Idle`, and the next attempt draws a
//! fresh `tx_ref` so the gateway never sees a duplicate reference.

use chrono::Utc;
use uuid::Uuid;

use chapa_client::{Customization, InitializeRequest};
use myticket_common::{BuyerContact, Config, MyTicketError};

use crate::summary::OrderSummary;
use crate::traits::PaymentGateway;

pub const CURRENCY: &str = "ETB";
const DEFAULT_TITLE: &str = "Pay Merchant";
const DEFAULT_DESCRIPTION: &str = "I love online payments";

/// Gateway-facing settings shared by every checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    pub callback_url: String,
    pub return_url: String,
    pub title: String,
    pub description: String,
}

impl CheckoutConfig {
    pub fn new(callback_url: &str, return_url: &str) -> Self {
        Self {
            callback_url: callback_url.to_string(),
            return_url: return_url.to_string(),
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.chapa_callback_url, &config.chapa_return_url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    Submitting,
    Redirecting(String),
    Failed(String),
}

impl CheckoutState {
    pub fn label(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::Submitting => "submitting",
            CheckoutState::Redirecting(_) => "redirecting",
            CheckoutState::Failed(_) => "failed",
        }
    }
}

/// Unique reference for one payment attempt: timestamp plus a uuid
/// fragment so two attempts within the same millisecond still differ.
pub fn new_tx_ref() -> String {
    let millis = Utc::now().timestamp_millis();
    let uuid = Uuid::new_v4().simple().to_string();
    format!("txn-{millis}-{}", &uuid[..8])
}

pub struct CheckoutSession {
    state: CheckoutState,
    config: CheckoutConfig,
}

impl CheckoutSession {
    pub fn new(config: CheckoutConfig) -> Self {
        Self {
            state: CheckoutState::Idle,
            config,
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Return a terminal session to `Idle` for another attempt.
    pub fn reset(&mut self) {
        self.state = CheckoutState::Idle;
    }

    /// Build the gateway request for this attempt.
    pub fn build_request(
        &self,
        summary: &OrderSummary,
        buyer: &BuyerContact,
        tx_ref: String,
    ) -> InitializeRequest {
        InitializeRequest {
            amount: summary.total.to_amount_string(),
            currency: CURRENCY.to_string(),
            email: buyer.email.clone(),
            first_name: buyer.first_name.clone(),
            last_name: buyer.last_name.clone(),
            phone_number: buyer.phone_number.clone(),
            tx_ref,
            callback_url: self.config.callback_url.clone(),
            return_url: self.config.return_url.clone(),
            customization: Customization::new(&self.config.title, &self.config.description),
        }
    }

    /// Drive one payment attempt: exactly one gateway call, no automatic
    /// retry. Succeeds into `Redirecting` with the checkout URL; fails
    /// into `Failed` with the gateway outcome. The selection that
    /// produced `summary` is never touched.
    pub async fn initiate(
        &mut self,
        gateway: &dyn PaymentGateway,
        summary: &OrderSummary,
        buyer: &BuyerContact,
    ) -> Result<String, MyTicketError> {
        if self.state != CheckoutState::Idle {
            return Err(MyTicketError::InvalidCheckoutState {
                state: self.state.label().to_string(),
            });
        }

        self.state = CheckoutState::Submitting;
        let request = self.build_request(summary, buyer, new_tx_ref());

        match gateway.initialize(&request).await {
            Ok(url) => {
                tracing::info!(
                    event_id = summary.event_id.as_str(),
                    tx_ref = request.tx_ref.as_str(),
                    "Checkout redirecting to gateway"
                );
                self.state = CheckoutState::Redirecting(url.clone());
                Ok(url)
            }
            Err(err) => {
                tracing::warn!(
                    event_id = summary.event_id.as_str(),
                    tx_ref = request.tx_ref.as_str(),
                    %err,
                    "Checkout failed"
                );
                self.state = CheckoutState::Failed(err.to_string());
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{MissingPricePolicy, Selection, SelectionPolicy};
    use crate::testing::{sample_buyer, sample_event, MockGateway};
    use chapa_client::ChapaError;
    use myticket_common::TierLabel;

    fn summary() -> OrderSummary {
        let event = sample_event();
        let mut selection = Selection::new(&event, &SelectionPolicy::default());
        selection.increment(TierLabel::Regular).unwrap();
        selection.increment(TierLabel::Vip).unwrap();
        OrderSummary::build(&selection, &event, MissingPricePolicy::TreatAsZero).unwrap()
    }

    fn config() -> CheckoutConfig {
        CheckoutConfig::new("https://example.com/callback", "https://example.com/return")
    }

    #[tokio::test]
    async fn successful_initiate_redirects() {
        let gateway = MockGateway::new().respond_with(Ok("https://pay/x".to_string()));
        let mut session = CheckoutSession::new(config());

        let url = session
            .initiate(&gateway, &summary(), &sample_buyer())
            .await
            .unwrap();
        assert_eq!(url, "https://pay/x");
        assert_eq!(
            session.state(),
            &CheckoutState::Redirecting("https://pay/x".to_string())
        );

        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].amount, "450.00");
        assert_eq!(requests[0].currency, "ETB");
        assert!(requests[0].tx_ref.starts_with("txn-"));
    }

    #[tokio::test]
    async fn rejected_initiate_fails_and_leaves_selection_untouched() {
        let gateway = MockGateway::new().respond_with(Err(ChapaError::Rejected {
            status: 400,
            message: "invalid currency".to_string(),
        }));
        let mut session = CheckoutSession::new(config());

        let event = sample_event();
        let mut selection = Selection::new(&event, &SelectionPolicy::default());
        selection.increment(TierLabel::Regular).unwrap();
        let before = selection.clone();
        let order =
            OrderSummary::build(&selection, &event, MissingPricePolicy::TreatAsZero).unwrap();

        let err = session
            .initiate(&gateway, &order, &sample_buyer())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MyTicketError::GatewayRejected { status: 400, .. }
        ));
        assert!(matches!(session.state(), CheckoutState::Failed(_)));
        assert_eq!(selection, before);
    }

    #[tokio::test]
    async fn unreachable_gateway_maps_to_unreachable() {
        let gateway = MockGateway::new()
            .respond_with(Err(ChapaError::Unreachable("timeout".to_string())));
        let mut session = CheckoutSession::new(config());

        let err = session
            .initiate(&gateway, &summary(), &sample_buyer())
            .await
            .unwrap_err();
        assert!(matches!(err, MyTicketError::GatewayUnreachable(_)));
    }

    #[tokio::test]
    async fn second_attempt_requires_reset_and_draws_a_fresh_tx_ref() {
        let gateway = MockGateway::new()
            .respond_with(Err(ChapaError::Rejected {
                status: 500,
                message: "try later".to_string(),
            }))
            .respond_with(Ok("https://pay/y".to_string()));
        let mut session = CheckoutSession::new(config());

        let order = summary();
        let buyer = sample_buyer();
        session.initiate(&gateway, &order, &buyer).await.unwrap_err();

        // Still Failed: a second initiate without reset is refused.
        let err = session.initiate(&gateway, &order, &buyer).await.unwrap_err();
        assert!(matches!(err, MyTicketError::InvalidCheckoutState { .. }));

        session.reset();
        session.initiate(&gateway, &order, &buyer).await.unwrap();

        let requests = gateway.requests();
        assert_eq!(requests.len(), 2);
        assert_ne!(requests[0].tx_ref, requests[1].tx_ref);
    }

    #[test]
    fn tx_refs_are_unique_and_prefixed() {
        let a = new_tx_ref();
        let b = new_tx_ref();
        assert!(a.starts_with("txn-"));
        assert_ne!(a, b);
    }
}
