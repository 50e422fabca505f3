use thiserror::Error;

use crate::book::RecordId;
use crate::model::FieldKind;

#[derive(Error, Debug)]
pub enum RolodexError {
    /// A raw string failed a field validator. Carries the field kind and the
    /// offending input so the UI can report both.
    #[error("Invalid {kind}: {input:?}")]
    Validation { kind: FieldKind, input: String },

    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("Index {index} is out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A suggestion was requested over an empty candidate list; the minimum
    /// is undefined, so this fails instead of returning a default.
    #[error("No candidates to rank")]
    NoCandidates,

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, RolodexError>;
