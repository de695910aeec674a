//! Key-scoped opaque persistence for the session and the user's category
//! preferences. One JSON file per key under the configured data dir.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use myticket_common::MyTicketError;

/// Key the serialized session lives under.
pub const SESSION_KEY: &str = "user";
/// Key the serialized category preferences live under.
pub const PREFERENCES_KEY: &str = "selectedTypes";

pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, MyTicketError>;

    fn put(&self, key: &str, value: &str) -> Result<(), MyTicketError>;

    fn remove(&self, key: &str) -> Result<(), MyTicketError>;
}

/// File-backed store: `<dir>/<key>.json`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, MyTicketError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(MyTicketError::Store(err.to_string())),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), MyTicketError> {
        fs::create_dir_all(&self.dir).map_err(|e| MyTicketError::Store(e.to_string()))?;
        fs::write(self.path(key), value).map_err(|e| MyTicketError::Store(e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), MyTicketError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(MyTicketError::Store(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("user").unwrap(), None);

        store.put("user", r#"{"email":"a@b.c"}"#).unwrap();
        assert_eq!(store.get("user").unwrap().as_deref(), Some(r#"{"email":"a@b.c"}"#));

        store.remove("user").unwrap();
        assert_eq!(store.get("user").unwrap(), None);

        // Removing a missing key is a no-op.
        store.remove("user").unwrap();
    }

    #[test]
    fn keys_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.put(SESSION_KEY, "s").unwrap();
        store.put(PREFERENCES_KEY, "p").unwrap();

        assert_eq!(store.get(SESSION_KEY).unwrap().as_deref(), Some("s"));
        assert_eq!(store.get(PREFERENCES_KEY).unwrap().as_deref(), Some("p"));
    }
}
