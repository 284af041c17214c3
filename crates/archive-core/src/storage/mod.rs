//! Storage layer
//!
//! The store writes through the `DocumentStorage` trait so it can run
//! against the real filesystem or an in-memory backend in tests.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::records::RecordKind;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Load/save capability over one whole document at a time.
///
/// A document is the full ordered sequence for one record kind; there is no
/// partial update. A missing document reads as an empty sequence.
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    async fn load_sequence(&self, kind: RecordKind) -> Result<Vec<Value>>;

    async fn save_sequence(&self, kind: RecordKind, entries: &[Value]) -> Result<()>;
}
