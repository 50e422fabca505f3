//! In-memory backend for testing.

use std::cell::RefCell;

use super::SnapshotBackend;
use crate::error::{Result, RolodexError};
use crate::snapshot::Snapshot;

/// Holds the artifact in memory.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded;
/// this keeps `save` at `&self` like the filesystem backend.
#[derive(Default)]
pub struct MemBackend {
    snapshot: RefCell<Option<Snapshot>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Seed the backend with an existing artifact.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: RefCell::new(Some(snapshot)),
            simulate_write_error: RefCell::new(false),
        }
    }
}

impl SnapshotBackend for MemBackend {
    fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.snapshot.borrow().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RolodexError::Store("Simulated write error".to_string()));
        }
        *self.snapshot.borrow_mut() = Some(snapshot.clone());
        Ok(())
    }
}
