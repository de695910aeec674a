//! End-to-end flow over the mock seams: gate → catalog → selection →
//! summary → checkout → redirect.

use std::sync::Arc;

use chapa_client::ChapaError;
use myticket_common::{EventId, MyTicketError, TierLabel};
use myticket_storefront::testing::{sample_buyer, sample_catalog, MemoryStore, MockCatalog, MockGateway, MockIdentity};
use myticket_storefront::{CheckoutConfig, Route, SessionGate, Storefront};

fn checkout_config() -> CheckoutConfig {
    CheckoutConfig::new("https://example.com/callback", "https://example.com/return")
}

async fn logged_in_gate() -> SessionGate {
    let provider = Arc::new(MockIdentity::new().with_user("buyer@example.com", "hunter2"));
    let store = Arc::new(MemoryStore::new());
    let mut gate = SessionGate::new(provider, store).unwrap();
    gate.login("buyer@example.com", "hunter2").await.unwrap();
    gate
}

#[tokio::test]
async fn full_purchase_redirects_to_gateway() {
    let gateway = Arc::new(MockGateway::new().respond_with(Ok("https://pay/x".to_string())));
    let storefront = Storefront::new(
        Arc::new(MockCatalog::with_catalog(sample_catalog())),
        gateway.clone(),
        logged_in_gate().await,
        checkout_config(),
    );

    let route = storefront
        .purchase(
            &EventId::from("1"),
            &[(TierLabel::Regular, 2), (TierLabel::Vip, 1)],
            &sample_buyer(),
        )
        .await
        .unwrap();

    assert_eq!(route, Route::ExternalRedirect("https://pay/x".to_string()));

    // The gateway saw the summed order: 2 × 100 + 1 × 250 = 450.00 ETB.
    let requests = gateway.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].amount, "450.00");
    assert_eq!(requests[0].currency, "ETB");
    assert_eq!(requests[0].email, "buyer@example.com");
    assert!(requests[0].tx_ref.starts_with("txn-"));
}

#[tokio::test]
async fn purchase_requires_authentication() {
    let provider = Arc::new(MockIdentity::new());
    let store = Arc::new(MemoryStore::new());
    let gate = SessionGate::new(provider, store).unwrap();

    let gateway = Arc::new(MockGateway::new());
    let storefront = Storefront::new(
        Arc::new(MockCatalog::with_catalog(sample_catalog())),
        gateway.clone(),
        gate,
        checkout_config(),
    );

    let err = storefront
        .purchase(&EventId::from("1"), &[], &sample_buyer())
        .await
        .unwrap_err();
    assert!(matches!(err, MyTicketError::NotAuthenticated));
    assert!(gateway.requests().is_empty());
}

#[tokio::test]
async fn purchase_of_missing_event_is_event_not_found() {
    let storefront = Storefront::new(
        Arc::new(MockCatalog::with_catalog(sample_catalog())),
        Arc::new(MockGateway::new()),
        logged_in_gate().await,
        checkout_config(),
    );

    let err = storefront
        .purchase(&EventId::from("missing"), &[], &sample_buyer())
        .await
        .unwrap_err();
    assert!(matches!(err, MyTicketError::EventNotFound(id) if id == EventId::from("missing")));
}

#[tokio::test]
async fn purchase_with_unknown_tier_is_rejected_before_the_gateway() {
    let gateway = Arc::new(MockGateway::new());
    let storefront = Storefront::new(
        Arc::new(MockCatalog::with_catalog(sample_catalog())),
        gateway.clone(),
        logged_in_gate().await,
        checkout_config(),
    );

    let err = storefront
        .purchase(&EventId::from("1"), &[(TierLabel::Vvip, 1)], &sample_buyer())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MyTicketError::UnknownTier {
            tier: TierLabel::Vvip,
            ..
        }
    ));
    assert!(gateway.requests().is_empty());
}

#[tokio::test]
async fn offline_catalog_is_unavailable() {
    let storefront = Storefront::new(
        Arc::new(MockCatalog::offline()),
        Arc::new(MockGateway::new()),
        logged_in_gate().await,
        checkout_config(),
    );

    let err = storefront
        .purchase(&EventId::from("1"), &[], &sample_buyer())
        .await
        .unwrap_err();
    assert!(matches!(err, MyTicketError::CatalogUnavailable(_)));
}

#[tokio::test]
async fn gateway_rejection_surfaces_without_retry() {
    let gateway = Arc::new(MockGateway::new().respond_with(Err(ChapaError::Rejected {
        status: 400,
        message: "declined".to_string(),
    })));
    let storefront = Storefront::new(
        Arc::new(MockCatalog::with_catalog(sample_catalog())),
        gateway.clone(),
        logged_in_gate().await,
        checkout_config(),
    );

    let err = storefront
        .purchase(&EventId::from("1"), &[(TierLabel::Regular, 1)], &sample_buyer())
        .await
        .unwrap_err();
    assert!(matches!(err, MyTicketError::GatewayRejected { status: 400, .. }));
    assert_eq!(gateway.requests().len(), 1);
}
