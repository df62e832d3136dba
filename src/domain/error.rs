//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent structural violations in the relation input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("multiple roots found: {first} and {second}")]
    MultipleRoots { first: String, second: String },

    #[error("no root found: every relation has a parent id")]
    NoRoot,

    /// Non-fatal: returned next to the partial tree in [`crate::domain::Deserialized`].
    #[error("max iterations ({iterations}) reached, unresolved nodes: {}", .unresolved.join(", "))]
    UnresolvedNodes {
        iterations: usize,
        unresolved: Vec<String>,
    },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
