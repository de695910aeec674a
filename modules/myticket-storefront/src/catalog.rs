//! Screen-facing catalog state. Loading, ready, and unavailable are three
//! distinct states; "no such event" is a fourth, only reachable once the
//! catalog is ready.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use myticket_common::{Catalog, Event, EventId, MyTicketError};

use crate::traits::CatalogFetcher;

#[derive(Debug, Clone)]
pub enum CatalogState {
    Loading,
    Ready(Catalog),
    Unavailable(String),
}

/// Outcome of an event lookup against the current catalog state.
#[derive(Debug)]
pub enum EventLookup<'a> {
    Loading,
    Found(&'a Event),
    NotFound,
    Unavailable(&'a str),
}

impl CatalogState {
    pub fn lookup_event(&self, id: &EventId) -> EventLookup<'_> {
        match self {
            CatalogState::Loading => EventLookup::Loading,
            CatalogState::Unavailable(message) => EventLookup::Unavailable(message),
            CatalogState::Ready(catalog) => match catalog.event(id) {
                Some(event) => EventLookup::Found(event),
                None => EventLookup::NotFound,
            },
        }
    }

    /// The event, or the error the screen should render. Only valid to
    /// treat `Loading` as an error at a point where loading has finished.
    pub fn require_event(&self, id: &EventId) -> Result<&Event, MyTicketError> {
        match self.lookup_event(id) {
            EventLookup::Found(event) => Ok(event),
            EventLookup::NotFound => Err(MyTicketError::EventNotFound(id.clone())),
            EventLookup::Loading => Err(MyTicketError::CatalogUnavailable(
                "catalog still loading".to_string(),
            )),
            EventLookup::Unavailable(message) => {
                Err(MyTicketError::CatalogUnavailable(message.to_string()))
            }
        }
    }
}

/// Race a screen-scoped future against its cancellation token. `None`
/// means the screen is gone and the result must be discarded, so a stale
/// response never mutates state that outlived its screen.
pub async fn guarded<F, T>(cancel: &CancellationToken, fut: F) -> Option<T>
where
    F: Future<Output = T>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        value = fut => Some(value),
    }
}

/// Fetch the catalog for a screen. `None` when the screen was left before
/// the fetch resolved; otherwise `Ready` or `Unavailable`.
pub async fn load_catalog(
    fetcher: &dyn CatalogFetcher,
    cancel: &CancellationToken,
) -> Option<CatalogState> {
    match guarded(cancel, fetcher.fetch_catalog()).await? {
        Ok(catalog) => Some(CatalogState::Ready(catalog)),
        Err(err) => {
            warn!(%err, "Catalog fetch failed");
            Some(CatalogState::Unavailable(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_catalog, MockCatalog};

    #[tokio::test]
    async fn load_catalog_ready_and_lookup() {
        let fetcher = MockCatalog::with_catalog(sample_catalog());
        let cancel = CancellationToken::new();

        let state = load_catalog(&fetcher, &cancel).await.unwrap();
        let found = state.require_event(&EventId::from("1")).unwrap();
        assert_eq!(found.id, EventId::from("1"));

        let err = state.require_event(&EventId::from("missing")).unwrap_err();
        assert!(matches!(err, MyTicketError::EventNotFound(_)));
    }

    #[tokio::test]
    async fn not_found_is_distinct_from_loading() {
        let missing = EventId::from("missing");

        let loading = CatalogState::Loading;
        assert!(matches!(loading.lookup_event(&missing), EventLookup::Loading));

        let ready = CatalogState::Ready(sample_catalog());
        assert!(matches!(ready.lookup_event(&missing), EventLookup::NotFound));

        let down = CatalogState::Unavailable("boom".to_string());
        assert!(matches!(
            down.lookup_event(&missing),
            EventLookup::Unavailable("boom")
        ));
    }

    #[tokio::test]
    async fn fetch_failure_is_unavailable_not_partial() {
        let fetcher = MockCatalog::offline();
        let cancel = CancellationToken::new();

        let state = load_catalog(&fetcher, &cancel).await.unwrap();
        assert!(matches!(state, CatalogState::Unavailable(_)));
    }

    #[tokio::test]
    async fn cancelled_screen_discards_the_result() {
        let fetcher = MockCatalog::with_catalog(sample_catalog());
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert!(load_catalog(&fetcher, &cancel).await.is_none());
    }
}
