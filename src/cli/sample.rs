//! Hand-assembled demo tree
//!
//! ```text
//! root (head)      box, red
//! ├── foo (p)
//! └── bar (h2)
//!     └── bar2 (h1) doublecircle, blue
//! ```

use crate::domain::Node;

pub fn sample_tree() -> Node {
    let p = Node::new("foo")
        .with_name("p")
        .with_payload("This is a simple HTML document.");

    let h1 = Node::new("bar2")
        .with_name("h1")
        .with_payload(1.33)
        .with_attribute("shape", "doublecircle")
        .with_attribute("color", "blue");

    let h2 = Node::new("bar")
        .with_name("h2")
        .with_payload(1.33)
        .with_children(vec![h1]);

    Node::new("root")
        .with_name("head")
        .with_attribute("shape", "box")
        .with_attribute("color", "red")
        .with_children(vec![p, h2])
}
