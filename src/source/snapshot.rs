//! Sources that extract from a rendered HTML document
//!
//! Driving a browser is somebody else's job: a `DocumentAcquirer` hands
//! over the serialized DOM of an already-rendered page, and
//! `ExtractingSource` turns it into a profile.

use super::traits::{ProfileSource, SourceError};
use crate::extract::extract_profile_from_html;
use crate::profile::Profile;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Supplies the HTML of a rendered profile page
#[async_trait]
pub trait DocumentAcquirer: Send + Sync {
    /// Where the document comes from, for logs
    fn describe(&self) -> String;

    async fn acquire(&self) -> Result<String, SourceError>;
}

/// Reads a rendered snapshot that an external browser process keeps
/// up to date on disk.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentAcquirer for SnapshotFile {
    fn describe(&self) -> String {
        format!("snapshot {}", self.path.display())
    }

    async fn acquire(&self) -> Result<String, SourceError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Acquire(format!("{}: {}", self.path.display(), e)))
    }
}

/// Acquire a document, then run the extractor over it
pub struct ExtractingSource<A> {
    acquirer: A,
    name: String,
}

impl<A: DocumentAcquirer> ExtractingSource<A> {
    pub fn new(acquirer: A) -> Self {
        let name = acquirer.describe();
        Self { acquirer, name }
    }
}

#[async_trait]
impl<A: DocumentAcquirer> ProfileSource for ExtractingSource<A> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Profile, SourceError> {
        let html = self.acquirer.acquire().await?;
        tracing::debug!(source = %self.name, bytes = html.len(), "acquired document");
        // The parsed tree is not Send; keep it out of any await
        let profile = extract_profile_from_html(&html)?;
        Ok(profile)
    }
}
