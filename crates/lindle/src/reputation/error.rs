use std::fmt;

use super::domain::Outcome;
use super::store::StoreError;

/// Record family a lookup failed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Entity,
    Contract,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Entity => f.write_str("Entity"),
            RecordKind::Contract => f.write_str("Contract"),
        }
    }
}

/// Error raised by the reputation engine.
///
/// Read faults never appear here; the store reports them as empty collections.
#[derive(Debug, thiserror::Error)]
pub enum ReputationError {
    #[error("{kind} not found")]
    NotFound { kind: RecordKind, id: String },
    #[error("Invalid outcome '{given}'. Must be one of: {}", Outcome::ALLOWED_LABELS.join(", "))]
    InvalidArgument { given: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReputationError {
    pub(crate) fn entity_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: RecordKind::Entity,
            id: id.into(),
        }
    }

    pub(crate) fn contract_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: RecordKind::Contract,
            id: id.into(),
        }
    }
}
