//! # Address Book: id allocation, CRUD, search, paging
//!
//! [`AddressBook`] maps integer identifiers to [`Record`]s while preserving
//! the insertion order of the live set. Identifiers are assigned and retired
//! only here, by the book's own [`IdAllocator`] — per-book state, never a
//! process-wide counter.
//!
//! ## Allocation
//!
//! The allocator keeps a monotonic `next_candidate` plus a pool of `free_ids`
//! returned by deletions. Adding a record reuses the **smallest** free id
//! before advancing the counter, so `add, add, delete 1, add` hands out
//! `1, 2, 1` — not `3`. The pool is always disjoint from the live set.

use std::collections::{BTreeSet, HashMap};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RolodexError};
use crate::model::Record;

/// Store-assigned record identifier.
pub type RecordId = u32;

/// Number of records per page yielded by [`AddressBook::pages`].
pub const PAGE_SIZE: usize = 5;

// --- Allocator ---

/// Identifier allocator state: a forward counter plus a reusable free-id
/// pool. Owned by one [`AddressBook`]; initialized fresh or from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next_candidate: RecordId,
    free_ids: BTreeSet<RecordId>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            next_candidate: 1,
            free_ids: BTreeSet::new(),
        }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(next_candidate: RecordId, free_ids: BTreeSet<RecordId>) -> Self {
        Self {
            next_candidate,
            free_ids,
        }
    }

    pub fn next_candidate(&self) -> RecordId {
        self.next_candidate
    }

    pub fn free_ids(&self) -> &BTreeSet<RecordId> {
        &self.free_ids
    }

    fn allocate(&mut self, live: &HashMap<RecordId, Record>) -> RecordId {
        // Step the candidate past anything already taken. Under normal flow
        // this never fires: the counter only grows past consumed values.
        while live.contains_key(&self.next_candidate) || self.free_ids.contains(&self.next_candidate)
        {
            self.next_candidate += 1;
        }

        // Smallest free id wins over the counter.
        if let Some(&id) = self.free_ids.iter().next() {
            self.free_ids.remove(&id);
            id
        } else {
            let id = self.next_candidate;
            self.next_candidate += 1;
            id
        }
    }

    fn release(&mut self, id: RecordId) {
        self.free_ids.insert(id);
    }
}

// --- AddressBook ---

/// The record store: id → record mapping, iteration in insertion order of
/// the live set, and the id allocator.
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    records: HashMap<RecordId, Record>,
    /// Insertion order of live ids; always in sync with `records`.
    order: Vec<RecordId>,
    allocator: IdAllocator,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a book from persisted parts, keeping `entries` order as the
    /// iteration order. Live ids are dropped from the free pool so the
    /// disjointness invariant holds even for a hand-edited snapshot.
    pub(crate) fn from_parts(
        entries: Vec<(RecordId, Record)>,
        mut allocator: IdAllocator,
    ) -> Self {
        let mut records = HashMap::with_capacity(entries.len());
        let mut order = Vec::with_capacity(entries.len());
        for (id, record) in entries {
            if records.insert(id, record).is_none() {
                order.push(id);
            }
            allocator.free_ids.remove(&id);
        }
        Self {
            records,
            order,
            allocator,
        }
    }

    pub fn allocator(&self) -> &IdAllocator {
        &self.allocator
    }

    /// Stamps an identifier on the record and takes ownership of it.
    /// The id is the smallest pooled one, or the next counter value.
    pub fn add_record(&mut self, record: Record) -> RecordId {
        let id = self.allocator.allocate(&self.records);
        debug!("assigned id {} to record {:?}", id, record.name());
        self.records.insert(id, record);
        self.order.push(id);
        id
    }

    /// Removes the record and returns its id to the free pool. An unknown id
    /// is a recoverable "not found"; the book is left untouched.
    pub fn delete_record(&mut self, id: RecordId) -> Result<Record> {
        match self.records.remove(&id) {
            Some(record) => {
                self.order.retain(|&live| live != id);
                self.allocator.release(id);
                debug!("released id {}", id);
                Ok(record)
            }
            None => Err(RolodexError::RecordNotFound(id)),
        }
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(&id)
    }

    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut Record> {
        self.records.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Live records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &Record)> + '_ {
        self.order
            .iter()
            .filter_map(move |id| self.records.get(id).map(|record| (*id, record)))
    }

    /// Case-insensitive containment match over the name field.
    pub fn find_records_by_name(&self, name: &str) -> Vec<(RecordId, &Record)> {
        let needle = name.to_lowercase();
        self.iter()
            .filter(|(_, record)| record.name().as_str().to_lowercase().contains(&needle))
            .collect()
    }

    /// Matches the term case-insensitively against names, and case-sensitively
    /// as a substring of any phone or email value.
    pub fn find_record(&self, term: &str) -> Vec<&Record> {
        let needle = term.to_lowercase();
        self.iter()
            .filter(|(_, record)| {
                record.name().as_str().to_lowercase().contains(&needle)
                    || record
                        .phones()
                        .iter()
                        .any(|phone| phone.as_str().contains(term))
                    || record
                        .emails()
                        .iter()
                        .any(|email| email.as_str().contains(term))
            })
            .map(|(_, record)| record)
            .collect()
    }

    /// A lazy sequence of batches of up to [`PAGE_SIZE`] records, in
    /// insertion order. Calling `pages()` again restarts from the beginning.
    /// Single consumer at a time; not safe to interleave with edits.
    pub fn pages(&self) -> Pages<'_> {
        Pages {
            book: self,
            cursor: 0,
        }
    }
}

/// Iterator over fixed-size batches of the book's records.
pub struct Pages<'a> {
    book: &'a AddressBook,
    cursor: usize,
}

impl<'a> Iterator for Pages<'a> {
    type Item = Vec<(RecordId, &'a Record)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.book.order.len() {
            return None;
        }
        let end = (self.cursor + PAGE_SIZE).min(self.book.order.len());
        let page = self.book.order[self.cursor..end]
            .iter()
            .filter_map(|id| self.book.records.get(id).map(|record| (*id, record)))
            .collect();
        self.cursor = end;
        Some(page)
    }
}
