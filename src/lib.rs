//! Rebuild rooted trees from flat `(id, parent_id)` relations and render them
//! as Graphviz DOT.
//!
//! ```no_run
//! use reltree::domain::{deserialize, Relation};
//! use reltree::render::write_dot;
//!
//! let relations = vec![
//!     Relation::new("2", "1"),
//!     Relation::root("1"),
//! ];
//! let tree = deserialize(&relations)?.into_result()?;
//! write_dot(&tree, &mut std::io::stdout())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod render;
pub mod util;

pub use domain::{deserialize, Deserialized, DomainError, Node, Payload, Relation, TreeBuilder};
pub use render::{write_dot, write_dot_with, DotStyle, RenderError};
