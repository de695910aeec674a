pub mod catalog;
pub mod checkout;
pub mod flow;
pub mod prefs;
pub mod selection;
pub mod session;
pub mod store;
pub mod summary;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use catalog::{guarded, load_catalog, CatalogState, EventLookup};
pub use checkout::{CheckoutConfig, CheckoutSession, CheckoutState};
pub use flow::{after_payment, entry_route, proceed_to_checkout, Route, Storefront};
pub use prefs::{Preferences, EVENT_CATEGORIES};
pub use selection::{MissingPricePolicy, Selection, SelectionPolicy};
pub use session::{Registration, SessionGate};
pub use store::{BlobStore, FileStore, PREFERENCES_KEY, SESSION_KEY};
pub use summary::{LineItem, OrderSummary};
pub use traits::{CatalogFetcher, IdentityProvider, PaymentGateway};
