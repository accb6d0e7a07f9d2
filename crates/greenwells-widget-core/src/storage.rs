use std::cell::OnceCell;
use std::collections::BTreeMap;

use tracing::warn;

use crate::error::StorageError;

pub const ADMIN_AUTH_STORAGE_KEY: &str = "adminAuthenticated";
pub const AGENT_AUTH_STORAGE_KEY: &str = "agentAuthenticated";
pub const FEEDBACK_STORAGE_KEY: &str = "feedbackData";
pub const THEME_STORAGE_KEY: &str = "theme";
pub const LANGUAGE_STORAGE_KEY: &str = "language";
pub const AI_PERSONALITY_STORAGE_KEY: &str = "aiPersonality";

/// String-valued per-browser key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Wraps a browser-backed store and degrades to memory-only operation after
/// the first failed read or write. Reads and writes never fail through this
/// wrapper.
pub struct FallbackStore<S> {
    primary: S,
    shadow: MemoryStore,
    degraded: OnceCell<StorageError>,
}

impl<S: KeyValueStore> FallbackStore<S> {
    pub fn new(primary: S) -> Self {
        Self {
            primary,
            shadow: MemoryStore::new(),
            degraded: OnceCell::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.get().is_some()
    }

    pub fn degraded_reason(&self) -> Option<&StorageError> {
        self.degraded.get()
    }

    pub fn primary(&self) -> &S {
        &self.primary
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if self.is_degraded() {
            return self.shadow.entries.get(key).cloned();
        }
        match self.primary.get(key) {
            Ok(value) => value,
            Err(error) => {
                warn!(key, %error, "local storage unreadable; continuing with in-memory state only");
                let _ = self.degraded.set(error);
                self.shadow.entries.get(key).cloned()
            }
        }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.shadow.entries.insert(key.to_string(), value.to_string());
        if self.is_degraded() {
            return;
        }
        if let Err(error) = self.primary.set(key, value) {
            self.degrade(error);
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.shadow.entries.remove(key);
        if self.is_degraded() {
            return;
        }
        if let Err(error) = self.primary.remove(key) {
            self.degrade(error);
        }
    }

    fn degrade(&mut self, error: StorageError) {
        warn!(%error, "local storage unavailable; continuing with in-memory state only");
        // Carry over whatever the primary still answers so later reads see it.
        for key in [
            ADMIN_AUTH_STORAGE_KEY,
            AGENT_AUTH_STORAGE_KEY,
            FEEDBACK_STORAGE_KEY,
            THEME_STORAGE_KEY,
            LANGUAGE_STORAGE_KEY,
            AI_PERSONALITY_STORAGE_KEY,
        ] {
            if self.shadow.entries.contains_key(key) {
                continue;
            }
            if let Ok(Some(value)) = self.primary.get(key) {
                self.shadow.entries.insert(key.to_string(), value);
            }
        }
        let _ = self.degraded.set(error);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Store that serves reads but rejects every write, like a full quota.
    #[derive(Debug, Default)]
    pub struct ReadOnlyStore {
        pub inner: MemoryStore,
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                reason: "QuotaExceededError".to_string(),
            })
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                reason: "QuotaExceededError".to_string(),
            })
        }
    }

    /// Store whose every call fails, like disabled storage.
    #[derive(Debug, Default)]
    pub struct DisabledStore;

    impl KeyValueStore for DisabledStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("SecurityError".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("SecurityError".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("SecurityError".to_string()))
        }
    }
}
