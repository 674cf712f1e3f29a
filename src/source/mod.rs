//! Profile sources: anything that can produce a fresh `Profile`
//!
//! From the coordinator's point of view a source is one slow call that
//! either yields a profile or fails. Why it failed (navigation, login,
//! timeout, markup drift) does not change what the coordinator does.

mod snapshot;
mod traits;

pub use snapshot::{DocumentAcquirer, ExtractingSource, SnapshotFile};
pub use traits::{ProfileSource, SourceError};
