use std::sync::Mutex;

use taskdeck_application::SessionStore;
use taskdeck_core::StorageError;
use taskdeck_domain::SessionRecord;

/// Process-local session store.
///
/// Keeps the serialized form rather than the record itself so loads go
/// through the same parsing path as durable stores.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    raw: Mutex<Option<String>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a raw serialized value.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, StorageError> {
        self.raw
            .lock()
            .map_err(|error| StorageError::Io(format!("failed to lock session store: {error}")))
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<SessionRecord>, StorageError> {
        self.lock()?
            .as_deref()
            .map(|raw| {
                serde_json::from_str(raw).map_err(|error| StorageError::Corrupt(error.to_string()))
            })
            .transpose()
    }

    fn save(&self, record: &SessionRecord) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(record)
            .map_err(|error| StorageError::Io(format!("failed to encode session: {error}")))?;
        *self.lock()? = Some(encoded);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.lock()? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use taskdeck_application::SessionStore;
    use taskdeck_core::StorageError;

    use super::InMemorySessionStore;

    #[test]
    fn seeded_garbage_is_corrupt() {
        let store = InMemorySessionStore::with_raw("{]");
        assert!(matches!(store.load(), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn empty_store_loads_none_and_clears() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.load(), Ok(None));
        assert_eq!(store.clear(), Ok(()));
    }
}
