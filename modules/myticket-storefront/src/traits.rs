// Trait abstractions over the three external services.
//
// CatalogFetcher — the read-only event/place feed.
// PaymentGateway — one-shot transaction initialization.
// IdentityProvider — sign-in, sign-up, password reset.
//
// These enable deterministic testing with the mocks in `testing`:
// no network, no live gateway. `cargo test` in seconds.

use async_trait::async_trait;

use catalog_client::CatalogClient;
use chapa_client::{ChapaClient, InitializeRequest};
use identity_client::IdentityClient;
use myticket_common::{Catalog, Session};

#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    /// Fetch the full event/place catalog. One request, no retry.
    async fn fetch_catalog(&self) -> catalog_client::Result<Catalog>;
}

#[async_trait]
impl CatalogFetcher for CatalogClient {
    async fn fetch_catalog(&self) -> catalog_client::Result<Catalog> {
        CatalogClient::fetch_catalog(self).await
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Initialize a transaction; returns the hosted checkout URL.
    async fn initialize(&self, request: &InitializeRequest) -> chapa_client::Result<String>;
}

#[async_trait]
impl PaymentGateway for ChapaClient {
    async fn initialize(&self, request: &InitializeRequest) -> chapa_client::Result<String> {
        ChapaClient::initialize(self, request).await
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> identity_client::Result<Session>;

    async fn sign_up(&self, email: &str, password: &str) -> identity_client::Result<Session>;

    async fn send_password_reset(&self, email: &str) -> identity_client::Result<()>;
}

#[async_trait]
impl IdentityProvider for IdentityClient {
    async fn sign_in(&self, email: &str, password: &str) -> identity_client::Result<Session> {
        IdentityClient::sign_in(self, email, password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> identity_client::Result<Session> {
        IdentityClient::sign_up(self, email, password).await
    }

    async fn send_password_reset(&self, email: &str) -> identity_client::Result<()> {
        IdentityClient::send_password_reset(self, email).await
    }
}
