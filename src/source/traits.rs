//! ProfileSource trait: the contract live sources implement

use crate::extract::ExtractionError;
use crate::profile::Profile;
use async_trait::async_trait;
use thiserror::Error;

/// Any failure to obtain a fresh profile
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to acquire document: {0}")]
    Acquire(String),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

/// Produces a fresh profile on demand.
///
/// Implementations have no side effects the coordinator relies on; the
/// coordinator guarantees at most one call is in flight at a time.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Acquire and extract a brand-new profile
    async fn fetch(&self) -> Result<Profile, SourceError>;
}
