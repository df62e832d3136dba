//! Output formats for trees: Graphviz DOT and terminal outlines

pub mod dot;
pub mod error;
pub mod outline;

pub use dot::{write_dot, write_dot_with, DotStyle, DEFAULT_COLOR, DEFAULT_SHAPE};
pub use error::{RenderError, RenderResult};
pub use outline::TreeOutline;
