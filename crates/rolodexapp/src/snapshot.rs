//! The persistence format: a versioned snapshot of the whole book.
//!
//! One artifact holds everything — every record with its id and full nested
//! field data, in the book's insertion order, plus the allocator state. A
//! save followed by a load reproduces identifiers, field values, collection
//! ordering, and allocator state exactly.
//!
//! The `version` field gates future format evolution; loading an unknown
//! version fails instead of guessing.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::book::{AddressBook, IdAllocator, RecordId};
use crate::error::{Result, RolodexError};
use crate::model::Record;

pub const SNAPSHOT_VERSION: u32 = 1;

/// One record paired with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub id: RecordId,
    pub record: Record,
}

/// The whole-book artifact: records in insertion order plus allocator state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub records: Vec<SnapshotRecord>,
    pub next_candidate: RecordId,
    pub free_ids: BTreeSet<RecordId>,
}

impl Snapshot {
    /// Captures the current state of the book. The record vector follows the
    /// book's iteration order, so order survives the round trip.
    pub fn capture(book: &AddressBook) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            records: book
                .iter()
                .map(|(id, record)| SnapshotRecord {
                    id,
                    record: record.clone(),
                })
                .collect(),
            next_candidate: book.allocator().next_candidate(),
            free_ids: book.allocator().free_ids().clone(),
        }
    }

    /// Reconstructs an equivalent book. Fails on an unknown format version.
    pub fn restore(self) -> Result<AddressBook> {
        if self.version != SNAPSHOT_VERSION {
            return Err(RolodexError::UnsupportedVersion(self.version));
        }
        let allocator = IdAllocator::from_parts(self.next_candidate, self.free_ids);
        let entries = self
            .records
            .into_iter()
            .map(|entry| (entry.id, entry.record))
            .collect();
        Ok(AddressBook::from_parts(entries, allocator))
    }
}
