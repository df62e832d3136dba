//! Domain layer: tree model and relation deserialization
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod error;
pub mod node;
pub mod relation;

pub use builder::{deserialize, Deserialized, TreeBuilder, MAX_ITERATIONS};
pub use error::{DomainError, DomainResult};
pub use node::{Node, Payload};
pub use relation::Relation;
