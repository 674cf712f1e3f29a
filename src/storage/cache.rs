//! Typed profile cache over a byte store

use super::traits::{Store, StorageResult};
use crate::profile::Profile;

/// Stores whole `Profile` values as JSON records, one per key.
///
/// Records are always overwritten, never merged.
pub struct ProfileCache<S> {
    store: S,
}

impl<S: Store> ProfileCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load and decode the profile under `key`.
    ///
    /// `Ok(None)` means the key is absent. A record that no longer decodes
    /// is a `StorageError::Serialization`.
    pub fn load(&self, key: &str) -> StorageResult<Option<Profile>> {
        match self.store.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Encode and store `profile` under `key`
    pub fn save(&self, key: &str, profile: &Profile) -> StorageResult<()> {
        let bytes = serde_json::to_vec(profile)?;
        self.store.put(key, &bytes)
    }

    pub fn remove(&self, key: &str) -> StorageResult<bool> {
        self.store.remove(key)
    }

    /// The underlying byte store
    pub fn store(&self) -> &S {
        &self.store
    }
}
