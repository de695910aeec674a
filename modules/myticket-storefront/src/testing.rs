// Test mocks for the storefront flow.
//
// Four mocks matching the four seams:
// - MockCatalog (CatalogFetcher) — canned catalog or offline
// - MockGateway (PaymentGateway) — scripted responses, records requests
// - MockIdentity (IdentityProvider) — in-memory credential table
// - MemoryStore (BlobStore) — HashMap-backed persistence
//
// Plus fixture constructors for the event/catalog shapes the tests share.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use catalog_client::CatalogError;
use chapa_client::InitializeRequest;
use identity_client::AuthError;
use myticket_common::{
    BuyerContact, Catalog, Event, EventId, Money, MyTicketError, Place, Placement, Session,
    TicketTier, TierLabel,
};

use crate::store::BlobStore;
use crate::traits::{CatalogFetcher, IdentityProvider, PaymentGateway};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// The scenario event: Regular at 100 ETB, VIP at 250 ETB.
pub fn sample_event() -> Event {
    event_with_tiers(
        "1",
        vec![
            TicketTier {
                label: TierLabel::Regular,
                price: Money::from_cents(10_000),
            },
            TicketTier {
                label: TierLabel::Vip,
                price: Money::from_cents(25_000),
            },
        ],
    )
}

pub fn event_with_tiers(id: &str, tiers: Vec<TicketTier>) -> Event {
    Event {
        id: EventId::from(id),
        display_name: "Addis Jazz Night".to_string(),
        description: "Live jazz at Ghion".to_string(),
        poster: "https://cdn/jazz.jpg".to_string(),
        location: "Ghion Hotel, Addis Ababa".to_string(),
        date_time: Utc.with_ymd_and_hms(2025, 11, 2, 19, 30, 0).unwrap(),
        placement: Placement::Top,
        tiers,
    }
}

pub fn sample_catalog() -> Catalog {
    Catalog {
        events: vec![sample_event()],
        places: vec![Place {
            id: "9".to_string(),
            name: "Unity Park".to_string(),
            photo: "https://cdn/unity.jpg".to_string(),
            description: "Park and zoo at the palace".to_string(),
        }],
    }
}

pub fn sample_buyer() -> BuyerContact {
    BuyerContact {
        first_name: "Abebe".to_string(),
        last_name: "Bikila".to_string(),
        email: "buyer@example.com".to_string(),
        phone_number: "+251911000000".to_string(),
    }
}

pub fn sample_session(email: &str) -> Session {
    Session {
        local_id: format!("uid-{email}"),
        email: email.to_string(),
        id_token: "id-token".to_string(),
        refresh_token: "refresh-token".to_string(),
    }
}

// ---------------------------------------------------------------------------
// MockCatalog
// ---------------------------------------------------------------------------

/// Canned catalog fetcher; `offline` fails every fetch.
pub struct MockCatalog {
    catalog: Option<Catalog>,
}

impl MockCatalog {
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Some(catalog),
        }
    }

    pub fn offline() -> Self {
        Self { catalog: None }
    }
}

#[async_trait]
impl CatalogFetcher for MockCatalog {
    async fn fetch_catalog(&self) -> catalog_client::Result<Catalog> {
        self.catalog
            .clone()
            .ok_or_else(|| CatalogError::Network("mock catalog offline".to_string()))
    }
}

// ---------------------------------------------------------------------------
// MockGateway
// ---------------------------------------------------------------------------

/// Scripted payment gateway. Responses pop in order; once the script is
/// exhausted every call succeeds with a default URL. All requests are
/// recorded for assertion.
pub struct MockGateway {
    responses: Mutex<VecDeque<chapa_client::Result<String>>>,
    requests: Mutex<Vec<InitializeRequest>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn respond_with(self, response: chapa_client::Result<String>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<InitializeRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn initialize(&self, request: &InitializeRequest) -> chapa_client::Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("https://pay/mock".to_string()))
    }
}

// ---------------------------------------------------------------------------
// MockIdentity
// ---------------------------------------------------------------------------

/// In-memory credential table speaking the provider's error vocabulary.
pub struct MockIdentity {
    users: Mutex<HashMap<String, String>>,
}

impl MockIdentity {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_user(self, email: &str, password: &str) -> Self {
        self.users
            .lock()
            .unwrap()
            .insert(email.to_string(), password.to_string());
        self
    }
}

impl Default for MockIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> identity_client::Result<Session> {
        match self.users.lock().unwrap().get(email) {
            None => Err(AuthError::Provider("EMAIL_NOT_FOUND".to_string())),
            Some(stored) if stored != password => {
                Err(AuthError::Provider("INVALID_PASSWORD".to_string()))
            }
            Some(_) => Ok(sample_session(email)),
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> identity_client::Result<Session> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(email) {
            return Err(AuthError::Provider("EMAIL_EXISTS".to_string()));
        }
        users.insert(email.to_string(), password.to_string());
        Ok(sample_session(email))
    }

    async fn send_password_reset(&self, email: &str) -> identity_client::Result<()> {
        if self.users.lock().unwrap().contains_key(email) {
            Ok(())
        } else {
            Err(AuthError::Provider("EMAIL_NOT_FOUND".to_string()))
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            map: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, MyTicketError> {
        Ok(self.map.lock().unwrap().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), MyTicketError> {
        self.map
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), MyTicketError> {
        self.map.lock().unwrap().remove(key);
        Ok(())
    }
}
