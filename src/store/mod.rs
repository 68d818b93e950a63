//! Persistence boundary for Lattice
//!
//! Articles are fetched and mutated through the `ArticleStore` trait; the
//! resolver and workspace never know how a record was transported. The
//! in-process implementation is `MemoryStore`, with JSON snapshots for the
//! CLI and tests.

mod memory;
mod traits;

pub use memory::{MemoryStore, Snapshot};
pub use traits::{ArticleStore, NewArticle, StoreError, StoreResult};
