//! Archive Core - persistence layer for the campaign archive
//!
//! Holds the record types, the `RecordStore` component, and the storage
//! backends it writes through. Each record kind lives in one JSON document
//! holding an ordered sequence of flat records.

pub mod error;
pub mod records;
pub mod storage;
pub mod store;

pub use error::{ArchiveError, Result};
pub use records::{Character, KeyedRecord, Lore, RecordKind, TimelineEvent};
pub use storage::{DocumentStorage, FileStorage, MemoryStorage};
pub use store::RecordStore;
