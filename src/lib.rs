//! profile-grabber: cached, failure-tolerant profile retrieval
//!
//! Turns a rendered profile page into a typed [`Profile`] and serves it
//! from a cache that is refreshed when stale, falling back to the last
//! good copy when the live page cannot be read.
//!
//! # Core Concepts
//!
//! - **Extraction**: [`extract::extract_profile`] maps any [`DocumentNode`]
//!   tree to a `Profile`, or fails naming the missing selector
//! - **Storage**: a byte [`Store`] holds the last known-good profile
//! - **Coordination**: [`RetrievalCoordinator`] decides between cache and
//!   live source, and serializes refreshes
//!
//! # Example
//!
//! ```
//! use profile_grabber::{CoordinatorConfig, MemoryStore, RetrievalCoordinator};
//! use profile_grabber::{ExtractingSource, SnapshotFile};
//! use std::sync::Arc;
//!
//! let coordinator = RetrievalCoordinator::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(ExtractingSource::new(SnapshotFile::new("profile.html"))),
//!     CoordinatorConfig::default(),
//! );
//! assert_eq!(coordinator.config().identity_key, "myprofile");
//! ```

pub mod config;
pub mod coordinator;
pub mod document;
pub mod extract;
pub mod profile;
pub mod source;
pub mod storage;

pub use config::{Config, ConfigError};
pub use coordinator::{CoordinatorConfig, CoordinatorError, RetrievalCoordinator};
pub use document::{DocumentError, DocumentNode, HtmlDocument, HtmlNode};
pub use extract::{extract_profile, extract_profile_from_html, ExtractionError};
pub use profile::{Certification, Education, Experience, Position, Profile, Project};
pub use source::{DocumentAcquirer, ExtractingSource, ProfileSource, SnapshotFile, SourceError};
pub use storage::{MemoryStore, OpenStore, ProfileCache, SqliteStore, StorageError, StorageResult, Store};
