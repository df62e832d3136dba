//! Infrastructure layer: file I/O around the core

pub mod error;
pub mod error_ext;
pub mod relations;

pub use error::{InfraError, InfraResult};
pub use error_ext::IoResultExt;
pub use relations::{load_relations, parse_relations, relations_to_toml};
