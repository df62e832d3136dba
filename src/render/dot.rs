//! Graphviz DOT output
//!
//! Layout of the generated text:
//!
//! ```text
//! digraph {
//!   "<id>" [shape=<shape>,style=filled,color=<color>]
//!   "<parent>" -> "<child>";
//! }
//! ```
//!
//! All node declarations come first (pre-order), followed by all edges (pre-order).
//! Ids and attribute values are written verbatim; quotes are not escaped.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::Node;
use crate::render::error::RenderResult;

pub const DEFAULT_SHAPE: &str = "ellipse";
pub const DEFAULT_COLOR: &str = "lightblue";

pub const SHAPE_ATTRIBUTE: &str = "shape";
pub const COLOR_ATTRIBUTE: &str = "color";

/// Fallback shape and color for nodes without their own attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotStyle {
    pub shape: String,
    pub color: String,
}

impl Default for DotStyle {
    fn default() -> Self {
        Self {
            shape: DEFAULT_SHAPE.into(),
            color: DEFAULT_COLOR.into(),
        }
    }
}

impl DotStyle {
    fn shape_of<'a>(&'a self, node: &'a Node) -> &'a str {
        attribute_or(node, SHAPE_ATTRIBUTE, &self.shape)
    }

    fn color_of<'a>(&'a self, node: &'a Node) -> &'a str {
        attribute_or(node, COLOR_ATTRIBUTE, &self.color)
    }
}

/// Writes the whole tree below `root` as a DOT digraph using the default style.
pub fn write_dot<W: Write + ?Sized>(root: &Node, w: &mut W) -> RenderResult<()> {
    write_dot_with(root, &DotStyle::default(), w)
}

/// Writes the whole tree below `root` as a DOT digraph.
///
/// The sink is neither flushed nor closed. The first failing write aborts the
/// rendering, leaving partial output behind.
#[instrument(level = "debug", skip(root, w), fields(root_id = %root.id))]
pub fn write_dot_with<W: Write + ?Sized>(
    root: &Node,
    style: &DotStyle,
    w: &mut W,
) -> RenderResult<()> {
    writeln!(w, "digraph {{")?;
    write_node_shapes(root, style, w)?;
    write_node_relationships(root, w)?;
    writeln!(w, "}}")?;
    Ok(())
}

fn write_node_shapes<W: Write + ?Sized>(
    node: &Node,
    style: &DotStyle,
    w: &mut W,
) -> RenderResult<()> {
    writeln!(
        w,
        "  \"{}\" [shape={},style=filled,color={}]",
        node.id,
        style.shape_of(node),
        style.color_of(node)
    )?;
    for child in &node.children {
        write_node_shapes(child, style, w)?;
    }
    Ok(())
}

fn write_node_relationships<W: Write + ?Sized>(node: &Node, w: &mut W) -> RenderResult<()> {
    for child in &node.children {
        writeln!(w, "  \"{}\" -> \"{}\";", node.id, child.id)?;
        write_node_relationships(child, w)?;
    }
    Ok(())
}

// empty attribute values fall back to the default
fn attribute_or<'a>(node: &'a Node, key: &str, default: &'a str) -> &'a str {
    node.attributes
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}
