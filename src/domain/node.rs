use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use crate::domain::relation::Relation;

/// Data attached to a node. Passed through untouched, callers match on the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Number(f64),
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<f64> for Payload {
    fn from(value: f64) -> Self {
        Payload::Number(value)
    }
}

/// Tree node owning its children.
///
/// Nodes hold no back-references; a tree is dropped together with its root.
/// Ids are expected to be unique within one tree, which is not enforced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub children: Vec<Node>,
    pub payload: Option<Payload>,
    /// Free-form attributes, e.g. `shape` and `color` for DOT rendering
    pub attributes: BTreeMap<String, String>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_payload(mut self, payload: impl Into<Payload>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn push_child(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Breadth-first search for the first node carrying `id`.
    ///
    /// Siblings are visited in the order of `children`, so with duplicate ids the
    /// shallowest, left-most match wins.
    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        let mut queue = VecDeque::new();
        queue.push_back(self);

        while let Some(node) = queue.pop_front() {
            if node.id == id {
                return Some(node);
            }
            queue.extend(node.children.iter());
        }
        None
    }

    /// Mutable twin of [`Node::find_by_id`], same visiting order.
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Node> {
        let mut queue = VecDeque::new();
        queue.push_back(self);

        while let Some(node) = queue.pop_front() {
            if node.id == id {
                return Some(node);
            }
            queue.extend(node.children.iter_mut());
        }
        None
    }

    /// Depth-first (pre-order) search for the first node carrying `id`.
    ///
    /// Unlike a plain comparison of the immediate node, results of the recursive
    /// descent are returned, so nested matches are found.
    pub fn find_by_id_dfs(&self, id: &str) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_by_id_dfs(id))
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Node::depth)
            .max()
            .unwrap_or(0)
    }

    pub fn leaf_ids(&self) -> Vec<&str> {
        if self.children.is_empty() {
            vec![self.id.as_str()]
        } else {
            self.children.iter().flat_map(Node::leaf_ids).collect()
        }
    }

    /// All `(parent_id, child_id)` pairs in pre-order, the order the DOT edge pass uses.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut edges = Vec::new();
        self.collect_edges(&mut edges);
        edges
    }

    /// Flattens the tree into relations, root first, then edges in pre-order.
    ///
    /// Names, payloads and attributes are not part of a relation and are lost.
    pub fn to_relations(&self) -> Vec<Relation> {
        std::iter::once(Relation::root(self.id.clone()))
            .chain(
                self.edges()
                    .into_iter()
                    .map(|(parent, child)| Relation::new(child, parent)),
            )
            .collect()
    }

    fn collect_edges<'a>(&'a self, edges: &mut Vec<(&'a str, &'a str)>) {
        for child in &self.children {
            edges.push((self.id.as_str(), child.id.as_str()));
            child.collect_edges(edges);
        }
    }
}

/// Compact nested form for diagnostics: children first, then the node's name.
///
/// A node `head` with leaf children `p` and `h2` renders as `((p) (h2) head)`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for child in &self.children {
            write!(f, "{} ", child)?;
        }
        write!(f, "{})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //        root
    //       /    \
    //      a      b
    //      |      |
    //      x      x'  (same id "x")
    fn sample() -> Node {
        Node::new("root").with_name("root").with_children(vec![
            Node::new("a")
                .with_name("a")
                .with_children(vec![Node::new("x").with_name("deep")]),
            Node::new("b")
                .with_name("b")
                .with_children(vec![Node::new("x").with_name("also-deep")]),
        ])
    }

    #[test]
    fn test_new_node_is_bare() {
        let node = Node::new("n1");
        assert_eq!(node.id, "n1");
        assert!(node.name.is_empty());
        assert!(node.children.is_empty());
        assert!(node.payload.is_none());
        assert!(node.attributes.is_empty());
    }

    #[test]
    fn test_find_by_id_bfs() {
        let tree = sample();
        assert_eq!(tree.find_by_id("root").map(|n| n.name.as_str()), Some("root"));
        assert_eq!(tree.find_by_id("b").map(|n| n.name.as_str()), Some("b"));
        assert_eq!(tree.find_by_id("x").map(|n| n.name.as_str()), Some("deep"));
        assert!(tree.find_by_id("missing").is_none());
    }

    #[test]
    fn test_find_by_id_bfs_prefers_shallow_match() {
        let tree = Node::new("r").with_children(vec![
            Node::new("a").with_children(vec![Node::new("dup").with_name("deep")]),
            Node::new("dup").with_name("shallow"),
        ]);
        assert_eq!(tree.find_by_id("dup").unwrap().name, "shallow");
        assert_eq!(tree.find_by_id_dfs("dup").unwrap().name, "deep");
    }

    #[test]
    fn test_find_by_id_mut_allows_attach() {
        let mut tree = sample();
        tree.find_by_id_mut("b").unwrap().push_child(Node::new("c"));
        assert_eq!(tree.find_by_id("b").unwrap().children.len(), 2);
    }

    #[test]
    fn test_find_by_id_dfs_finds_nested() {
        let tree = sample();
        assert_eq!(tree.find_by_id_dfs("x").unwrap().name, "deep");
        assert_eq!(tree.find_by_id_dfs("b").unwrap().name, "b");
        assert!(tree.find_by_id_dfs("missing").is_none());
    }

    #[test]
    fn test_counts_depth_leaves() {
        let tree = sample();
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.leaf_ids(), vec!["x", "x"]);
    }

    #[test]
    fn test_edges_are_preorder() {
        let tree = sample();
        assert_eq!(
            tree.edges(),
            vec![("root", "a"), ("a", "x"), ("root", "b"), ("b", "x")]
        );
    }

    #[test]
    fn test_to_relations() {
        let relations = sample().to_relations();
        assert_eq!(relations[0], Relation::root("root"));
        assert_eq!(relations[1], Relation::new("a", "root"));
        assert_eq!(relations.len(), 5);
    }

    #[test]
    fn test_display_nested() {
        let tree = Node::new("root").with_name("head").with_children(vec![
            Node::new("foo").with_name("p"),
            Node::new("bar")
                .with_name("h2")
                .with_children(vec![Node::new("bar2").with_name("h1")]),
        ]);
        assert_eq!(tree.to_string(), "((p) ((h1) h2) head)");
        assert_eq!(Node::new("x").to_string(), "()");
    }

    #[test]
    fn test_payload_variants() {
        let node = Node::new("p").with_payload("This is a simple HTML document.");
        assert_eq!(
            node.payload,
            Some(Payload::Text("This is a simple HTML document.".into()))
        );
        let node = Node::new("h1").with_payload(1.33);
        assert!(matches!(node.payload, Some(Payload::Number(n)) if (n - 1.33).abs() < f64::EPSILON));
    }
}
