//! # Storage Layer
//!
//! [`SnapshotBackend`] abstracts where the persistence artifact lives.
//! The book and codec never touch I/O; a backend only moves one
//! [`Snapshot`] blob in and out.
//!
//! - [`fs::FsBackend`]: production implementation, one JSON file on disk.
//! - [`mem::MemBackend`]: for testing logic without filesystem I/O.
//!
//! A missing artifact is not an error — `load` returns `Ok(None)` and the
//! caller starts with a fresh empty book. A corrupt or unreadable artifact
//! is an error and propagates; the store never silently discards data it
//! cannot parse.

use crate::error::Result;
use crate::snapshot::Snapshot;

pub mod fs;
pub mod mem;

/// Abstract interface for whole-book persistence.
pub trait SnapshotBackend {
    /// Load the persisted snapshot.
    /// Returns `Ok(None)` if no artifact exists yet (first run).
    /// Returns `Err` on I/O failures or a corrupt artifact.
    fn load(&self) -> Result<Option<Snapshot>>;

    /// Persist the snapshot, replacing any previous artifact.
    /// Must not leave a partially-written artifact behind on success paths
    /// (filesystem impls write to a temp file and rename).
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}
