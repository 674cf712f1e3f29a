//! Storage backends for cached profiles
//!
//! Backends implement the byte-level `Store` trait. `SqliteStore` is the
//! durable implementation; `MemoryStore` lives only as long as the process.
//! `ProfileCache` layers profile encoding on top of either.

mod cache;
mod memory;
mod sqlite;
mod traits;

pub use cache::ProfileCache;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{OpenStore, Store, StorageError, StorageResult};
