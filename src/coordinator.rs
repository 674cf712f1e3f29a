//! RetrievalCoordinator: cache-first profile retrieval with a single-flight refresh
//!
//! Each `get()` reads the cached profile, returns it while it is younger
//! than the staleness threshold, and otherwise refreshes from the source.
//! A failed refresh falls back to the cached copy however old it is; only
//! when nothing is cached does the source error reach the caller.
//!
//! Refreshes are serialized per coordinator. Callers that arrive while one
//! is running wait for it, then re-read the cache and usually find the
//! freshly stored profile. The refresh runs in its own task holding the
//! lock, so it finishes and caches its result even if the caller that
//! started it goes away.

use crate::profile::Profile;
use crate::source::{ProfileSource, SourceError};
use crate::storage::{ProfileCache, Store};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, error, info, warn};

/// Default maximum age of a cached profile
pub const DEFAULT_STALENESS_THRESHOLD: Duration = Duration::from_secs(4 * 60 * 60);

/// Default cache key for the single managed profile
pub const DEFAULT_IDENTITY_KEY: &str = "myprofile";

/// Errors surfaced by `RetrievalCoordinator::get`
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// Nothing was cached and the refresh failed
    #[error("No cached profile and refresh failed: {0}")]
    Source(#[from] SourceError),

    /// The refresh task panicked or was aborted
    #[error("Refresh task failed: {0}")]
    Refresh(#[from] tokio::task::JoinError),

    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),
}

/// Knobs for a coordinator
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Cache key naming the managed profile
    pub identity_key: String,
    /// Age at which a cached profile triggers a refresh
    pub staleness_threshold: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            identity_key: DEFAULT_IDENTITY_KEY.to_string(),
            staleness_threshold: DEFAULT_STALENESS_THRESHOLD,
        }
    }
}

impl CoordinatorConfig {
    pub fn with_identity_key(mut self, key: impl Into<String>) -> Self {
        self.identity_key = key.into();
        self
    }

    pub fn with_staleness_threshold(mut self, threshold: Duration) -> Self {
        self.staleness_threshold = threshold;
        self
    }
}

/// What the cache holds right now, judged against the threshold
enum Lookup {
    Fresh(Profile),
    Stale { profile: Profile, age: Duration },
    Missing,
}

type SharedCache = Arc<ProfileCache<Arc<dyn Store>>>;

/// Single entry point for "give me a usable profile now".
///
/// Share one instance (behind an `Arc`) among all callers for a given
/// identity key; the refresh lock lives in the instance.
pub struct RetrievalCoordinator {
    cache: SharedCache,
    source: Arc<dyn ProfileSource>,
    config: CoordinatorConfig,
    refresh_lock: Arc<Mutex<()>>,
}

impl RetrievalCoordinator {
    pub fn new(store: Arc<dyn Store>, source: Arc<dyn ProfileSource>, config: CoordinatorConfig) -> Self {
        Self {
            cache: Arc::new(ProfileCache::new(store)),
            source,
            config,
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Return a complete profile, possibly stale, or fail if none is available.
    pub async fn get(&self) -> Result<Profile, CoordinatorError> {
        if let Lookup::Fresh(profile) = self.lookup() {
            debug!(key = %self.config.identity_key, "using cached profile copy");
            return Ok(profile);
        }

        let guard = self.refresh_lock.clone().lock_owned().await;

        // Whoever held the lock may have just refreshed
        let cached = match self.lookup() {
            Lookup::Fresh(profile) => {
                debug!(key = %self.config.identity_key, "profile refreshed while waiting, using it");
                return Ok(profile);
            }
            Lookup::Stale { profile, age } => {
                info!(
                    key = %self.config.identity_key,
                    age_secs = age.as_secs(),
                    "stored profile is stale, attempting to retrieve fresh data"
                );
                Some(profile)
            }
            Lookup::Missing => {
                info!(key = %self.config.identity_key, "no stored profile, attempting to retrieve fresh data");
                None
            }
        };

        let task = tokio::spawn(refresh(
            self.cache.clone(),
            self.source.clone(),
            self.config.identity_key.clone(),
            cached.as_ref().map(|p| p.generated_at),
            guard,
        ));

        let outcome = match task.await {
            Ok(result) => result.map_err(CoordinatorError::from),
            Err(join_error) => Err(CoordinatorError::from(join_error)),
        };

        match (outcome, cached) {
            (Ok(fresh), _) => Ok(fresh),
            (Err(e), Some(stale)) => {
                warn!(
                    key = %self.config.identity_key,
                    error = %e,
                    "profile refresh failed, returning stored profile"
                );
                Ok(stale)
            }
            (Err(e), None) => {
                error!(key = %self.config.identity_key, error = %e, "profile refresh failed and nothing is stored");
                Err(e)
            }
        }
    }

    /// The stored profile, without staleness checks or refresh
    pub fn cached(&self) -> Result<Option<Profile>, CoordinatorError> {
        Ok(self.cache.load(&self.config.identity_key)?)
    }

    /// Drop the stored profile so the next `get()` refreshes.
    ///
    /// Waits for any in-flight refresh first.
    pub async fn invalidate(&self) -> Result<bool, CoordinatorError> {
        let _guard = self.refresh_lock.lock().await;
        let removed = self.cache.remove(&self.config.identity_key)?;
        info!(key = %self.config.identity_key, removed, "invalidated stored profile");
        Ok(removed)
    }

    /// Read the cache. Read failures count as "nothing cached".
    fn lookup(&self) -> Lookup {
        let key = &self.config.identity_key;
        let profile = match self.cache.load(key) {
            Ok(Some(profile)) => profile,
            Ok(None) => return Lookup::Missing,
            Err(e) => {
                warn!(key = %key, error = %e, "error during profile fetch from store");
                return Lookup::Missing;
            }
        };
        let age = profile.age_at(Utc::now());
        if age >= self.config.staleness_threshold {
            Lookup::Stale { profile, age }
        } else {
            Lookup::Fresh(profile)
        }
    }
}

/// Fetch, store, and return a fresh profile while holding the refresh lock.
///
/// A failed store write is reported but does not fail the refresh.
async fn refresh(
    cache: SharedCache,
    source: Arc<dyn ProfileSource>,
    key: String,
    previous: Option<DateTime<Utc>>,
    _guard: OwnedMutexGuard<()>,
) -> Result<Profile, SourceError> {
    debug!(source = source.name(), "refreshing profile");
    let fresh = source.fetch().await?;

    // generated_at never moves backwards for a key
    let fresh = match previous {
        Some(previous) if fresh.generated_at < previous => {
            warn!(
                key = %key,
                fresh = %fresh.generated_at,
                stored = %previous,
                "fresh profile predates stored copy, clamping generated_at"
            );
            fresh.with_generated_at(previous)
        }
        _ => fresh,
    };

    match cache.save(&key, &fresh) {
        Ok(()) => info!(key = %key, "stored refreshed profile"),
        Err(e) => error!(key = %key, error = %e, "failed to store refreshed profile"),
    }
    Ok(fresh)
}
