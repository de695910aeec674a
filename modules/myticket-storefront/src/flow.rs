//! Screen sequencing and the storefront facade.
//!
//! Routes carry the minimal state the next screen needs; no business
//! rules live here. The facade strings the gate, catalog, selection, and
//! checkout together for the CLI and the flow tests.

use std::sync::Arc;

use myticket_common::{BuyerContact, EventId, MyTicketError, TierLabel};

use crate::checkout::{CheckoutConfig, CheckoutSession};
use crate::selection::{MissingPricePolicy, Selection, SelectionPolicy};
use crate::session::SessionGate;
use crate::summary::OrderSummary;
use crate::traits::{CatalogFetcher, PaymentGateway};

/// The screen sequence. `Checkout` carries exactly the state the source
/// passes between screens: the event id and the buyer's selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Login,
    FilterOptions,
    Events,
    EventDetails(EventId),
    BuyTickets(EventId),
    Checkout {
        event_id: EventId,
        selection: Selection,
    },
    /// Hand-off to the external browser/webview at the gateway URL.
    ExternalRedirect(String),
}

/// Where the app lands on startup: straight to the filter screen when a
/// session is persisted, otherwise to login.
pub fn entry_route(gate: &SessionGate) -> Route {
    if gate.is_authenticated() {
        Route::FilterOptions
    } else {
        Route::Login
    }
}

/// A finished selection routes to checkout with `{event_id, selection}`.
pub fn proceed_to_checkout(selection: Selection) -> Route {
    Route::Checkout {
        event_id: selection.event_id().clone(),
        selection,
    }
}

/// A successful payment initiation hands off to the gateway URL.
pub fn after_payment(checkout_url: String) -> Route {
    Route::ExternalRedirect(checkout_url)
}

pub struct Storefront {
    catalog: Arc<dyn CatalogFetcher>,
    gateway: Arc<dyn PaymentGateway>,
    pub gate: SessionGate,
    checkout_config: CheckoutConfig,
    selection_policy: SelectionPolicy,
    missing_price: MissingPricePolicy,
}

impl Storefront {
    pub fn new(
        catalog: Arc<dyn CatalogFetcher>,
        gateway: Arc<dyn PaymentGateway>,
        gate: SessionGate,
        checkout_config: CheckoutConfig,
    ) -> Self {
        Self {
            catalog,
            gateway,
            gate,
            checkout_config,
            selection_policy: SelectionPolicy::default(),
            missing_price: MissingPricePolicy::default(),
        }
    }

    pub fn with_selection_policy(mut self, policy: SelectionPolicy) -> Self {
        self.selection_policy = policy;
        self
    }

    pub fn with_missing_price_policy(mut self, policy: MissingPricePolicy) -> Self {
        self.missing_price = policy;
        self
    }

    pub async fn fetch_catalog(&self) -> Result<myticket_common::Catalog, MyTicketError> {
        Ok(self.catalog.fetch_catalog().await?)
    }

    /// The whole purchase sequence for one event: gate → catalog →
    /// selection → order summary → checkout. Returns the gateway redirect
    /// URL on success.
    pub async fn purchase(
        &self,
        event_id: &EventId,
        requested: &[(TierLabel, u32)],
        buyer: &BuyerContact,
    ) -> Result<Route, MyTicketError> {
        self.gate.require_authenticated()?;

        let catalog = self.catalog.fetch_catalog().await?;
        let event = catalog
            .event(event_id)
            .ok_or_else(|| MyTicketError::EventNotFound(event_id.clone()))?;

        let mut selection = Selection::new(event, &self.selection_policy);
        for &(label, want) in requested {
            set_quantity(&mut selection, label, want)?;
        }

        let summary = OrderSummary::build(&selection, event, self.missing_price)?;
        tracing::info!(
            event_id = event_id.as_str(),
            total = %summary.total,
            "Proceeding to checkout"
        );

        let mut checkout = CheckoutSession::new(self.checkout_config.clone());
        let url = checkout.initiate(self.gateway.as_ref(), &summary, buyer).await?;

        Ok(after_payment(url))
    }
}

/// Walk a counter to the requested quantity through the same
/// increment/decrement ops the screen buttons use, so tier validation is
/// applied uniformly.
fn set_quantity(
    selection: &mut Selection,
    label: TierLabel,
    want: u32,
) -> Result<(), MyTicketError> {
    while selection.quantity(label) < want {
        selection.increment(label)?;
    }
    while selection.quantity(label) > want {
        selection.decrement(label)?;
    }
    Ok(())
}
