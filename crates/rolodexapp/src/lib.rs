//! # Rolodexapp
//!
//! The core library behind `rolodex`, a personal contact directory for the
//! command line. It owns everything except the terminal: the domain model
//! (records and their validated fields), the address book with its id
//! allocator, substring and fuzzy-name search, and whole-book persistence.
//!
//! ## Layering
//!
//! - [`model`] — validated field types ([`model::Phone`], [`model::Email`],
//!   [`model::Birthday`], ...) and the [`model::Record`] aggregate.
//! - [`book`] — the [`book::AddressBook`]: id → record mapping plus the
//!   id allocator (monotonic counter + reusable free-id pool).
//! - [`search`] — Levenshtein edit distance and the "did you mean"
//!   suggestion over candidate names.
//! - [`snapshot`] — the versioned persistence format; captures the whole
//!   book and restores it bit-for-bit.
//! - [`store`] — the [`store::SnapshotBackend`] trait with filesystem and
//!   in-memory implementations.
//! - [`api`] — the facade consumed by UI clients. No stdout, no prompts.
//!
//! The library is single-threaded and synchronous: nothing here locks,
//! suspends, or assumes concurrent callers. Changes live in memory until an
//! explicit save.

pub mod api;
pub mod book;
pub mod config;
pub mod error;
pub mod model;
pub mod search;
pub mod snapshot;
pub mod store;

pub use error::{Result, RolodexError};
