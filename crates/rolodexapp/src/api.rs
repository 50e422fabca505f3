//! # API Facade
//!
//! The single entry point for UI clients. The facade owns the in-memory
//! [`AddressBook`] and a [`SnapshotBackend`]; everything else is dispatch.
//!
//! The facade does no I/O of its own beyond the backend, prints nothing, and
//! prompts for nothing. Interactive flows (picking one of several deletion
//! candidates, the edit dialogue) belong to the UI: the facade only supplies
//! the data those flows need, like [`RolodexApi::deletion_candidates`] and
//! [`RolodexApi::suggest_name`].
//!
//! Changes live in memory until an explicit [`RolodexApi::save`]; there is
//! no autosave.
//!
//! Generic over `SnapshotBackend`:
//! - Production: `RolodexApi<FsBackend>`
//! - Testing: `RolodexApi<MemBackend>`

use log::info;

use crate::book::{AddressBook, Pages, RecordId};
use crate::error::Result;
use crate::model::{Birthday, Name, Record};
use crate::search;
use crate::snapshot::Snapshot;
use crate::store::SnapshotBackend;

pub struct RolodexApi<B: SnapshotBackend> {
    book: AddressBook,
    backend: B,
}

impl<B: SnapshotBackend> RolodexApi<B> {
    /// Opens the directory: loads the persisted snapshot if one exists,
    /// otherwise starts with a fresh empty book.
    pub fn open(backend: B) -> Result<Self> {
        let book = match backend.load()? {
            Some(snapshot) => {
                let book = snapshot.restore()?;
                info!("loaded {} records from previous session", book.len());
                book
            }
            None => {
                info!("no previous data, starting a new address book");
                AddressBook::new()
            }
        };
        Ok(Self { book, backend })
    }

    /// Validates the raw inputs and builds an unstored record.
    /// The id is assigned later, by [`RolodexApi::add_record`].
    pub fn create_record(name: &str, birthday: Option<&str>) -> Result<Record> {
        let name = Name::new(name)?;
        let birthday = birthday.map(Birthday::new).transpose()?;
        Ok(Record::new(name, birthday))
    }

    pub fn add_record(&mut self, record: Record) -> RecordId {
        self.book.add_record(record)
    }

    pub fn delete_by_id(&mut self, id: RecordId) -> Result<Record> {
        self.book.delete_record(id)
    }

    /// The resolve-by-name half of deletion: candidates for the UI to choose
    /// from. The chosen id goes back through [`RolodexApi::delete_by_id`].
    pub fn deletion_candidates(&self, name: &str) -> Vec<(RecordId, &Record)> {
        self.book.find_records_by_name(name)
    }

    pub fn find(&self, term: &str) -> Vec<&Record> {
        self.book.find_record(term)
    }

    pub fn find_by_name(&self, name: &str) -> Vec<(RecordId, &Record)> {
        self.book.find_records_by_name(name)
    }

    /// "Did you mean": the record whose name is closest to `name` by edit
    /// distance, ranked over the whole book. Fails when the book is empty.
    pub fn suggest_name(&self, name: &str) -> Result<&Record> {
        let candidates: Vec<_> = self.book.iter().collect();
        search::suggest_closest(name, &candidates)
    }

    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.book.get(id)
    }

    pub fn record_mut(&mut self, id: RecordId) -> Option<&mut Record> {
        self.book.get_mut(id)
    }

    pub fn iter_all(&self) -> impl Iterator<Item = (RecordId, &Record)> + '_ {
        self.book.iter()
    }

    pub fn pages(&self) -> Pages<'_> {
        self.book.pages()
    }

    pub fn len(&self) -> usize {
        self.book.len()
    }

    pub fn is_empty(&self) -> bool {
        self.book.is_empty()
    }

    /// Snapshot the whole book and hand it to the backend. Explicit only.
    pub fn save(&self) -> Result<()> {
        let snapshot = Snapshot::capture(&self.book);
        self.backend.save(&snapshot)?;
        info!("saved {} records", snapshot.records.len());
        Ok(())
    }
}
