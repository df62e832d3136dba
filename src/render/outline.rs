use termtree::Tree;
use tracing::instrument;

use crate::domain::Node;

pub trait TreeOutline {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeOutline for Node {
    #[instrument(level = "trace", skip(self), fields(id = %self.id))]
    fn to_tree_string(&self) -> Tree<String> {
        let label = if self.name.is_empty() {
            self.id.clone()
        } else {
            format!("{} ({})", self.id, self.name)
        };

        let leaves: Vec<_> = self.children.iter().map(|c| c.to_tree_string()).collect();

        Tree::new(label).with_leaves(leaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_labels_and_shape() {
        let tree = Node::new("root")
            .with_name("head")
            .with_children(vec![Node::new("a"), Node::new("b")]);
        let outline = tree.to_tree_string();

        assert_eq!(outline.root, "root (head)");
        assert_eq!(outline.leaves.len(), 2);
        assert_eq!(outline.leaves[1].root, "b");

        let text = outline.to_string();
        assert!(text.starts_with("root (head)\n"));
        assert!(text.contains("a\n"));
    }
}
