//! The user's favourite event categories, persisted under the
//! `selectedTypes` key.

use serde::{Deserialize, Serialize};
use tracing::warn;

use myticket_common::MyTicketError;

use crate::store::{BlobStore, PREFERENCES_KEY};

/// The fixed category list offered on the filter screen.
pub const EVENT_CATEGORIES: [&str; 12] = [
    "Music & Entertainment",
    "Travel",
    "Film & Media",
    "Food & Drinks",
    "Art & Design",
    "Fashion",
    "Health & Wellness",
    "Sport",
    "Gaming",
    "Science & Tech",
    "School & Education",
    "Business",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences {
    selected: Vec<String>,
}

impl Preferences {
    /// Load persisted preferences; missing or unreadable blobs fall back
    /// to the empty default.
    pub fn load(store: &dyn BlobStore) -> Result<Self, MyTicketError> {
        match store.get(PREFERENCES_KEY)? {
            Some(blob) => match serde_json::from_str(&blob) {
                Ok(prefs) => Ok(prefs),
                Err(err) => {
                    warn!(%err, "Discarding unreadable preferences");
                    Ok(Self::default())
                }
            },
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, store: &dyn BlobStore) -> Result<(), MyTicketError> {
        let blob =
            serde_json::to_string(self).map_err(|e| MyTicketError::Store(e.to_string()))?;
        store.put(PREFERENCES_KEY, &blob)
    }

    /// Toggle a category in or out of the selected set. Returns the new
    /// selected state, or `None` for a category outside the fixed list.
    pub fn toggle(&mut self, category: &str) -> Option<bool> {
        if !EVENT_CATEGORIES.contains(&category) {
            return None;
        }
        if let Some(index) = self.selected.iter().position(|c| c == category) {
            self.selected.remove(index);
            Some(false)
        } else {
            self.selected.push(category.to_string());
            Some(true)
        }
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, category: &str) -> bool {
        self.selected.iter().any(|c| c == category)
    }
}
