use std::collections::HashSet;

use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::Node;
use crate::domain::relation::Relation;

/// Upper bound of attachment passes over the relation list.
pub const MAX_ITERATIONS: usize = 10_000;

/// Outcome of a deserialization that found exactly one root.
///
/// `error` is only ever [`DomainError::UnresolvedNodes`]: the tree is still usable
/// but lacks the relations whose parent never showed up.
#[derive(Debug, Clone, PartialEq)]
pub struct Deserialized {
    pub root: Node,
    pub error: Option<DomainError>,
}

impl Deserialized {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Ids that could not be attached, empty for a complete tree.
    pub fn unresolved(&self) -> &[String] {
        match &self.error {
            Some(DomainError::UnresolvedNodes { unresolved, .. }) => unresolved.as_slice(),
            _ => &[],
        }
    }

    /// Drops the partial tree if the build was incomplete.
    pub fn into_result(self) -> DomainResult<Node> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.root),
        }
    }

    pub fn into_parts(self) -> (Node, Option<DomainError>) {
        (self.root, self.error)
    }
}

/// Rebuilds a tree from relations arriving in arbitrary order.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    max_iterations: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Builds the tree described by `relations`.
    ///
    /// Exactly one relation must have an empty parent id. Children are attached
    /// in repeated passes so that a child may be listed before its parent; within
    /// a parent, children keep the order in which they were attached.
    ///
    /// # Errors
    ///
    /// * [`DomainError::MultipleRoots`] / [`DomainError::NoRoot`] when the root is
    ///   ambiguous or missing. No tree is produced.
    ///
    /// Relations still unattached after `max_iterations` passes are reported via
    /// [`Deserialized::error`] next to the partial tree.
    #[instrument(level = "debug", skip(self, relations), fields(count = relations.len()))]
    pub fn build(&self, relations: &[Relation]) -> DomainResult<Deserialized> {
        let root_relation = find_root(relations)?;
        debug!("root: {}", root_relation.id);

        let mut root = Node::new(root_relation.id.clone());
        // keyed by id: repeated ids collapse into one pending entry
        let mut pending: HashSet<&str> = relations.iter().map(|r| r.id.as_str()).collect();
        pending.remove(root_relation.id.as_str());

        let mut iterations = 0;
        while iterations < self.max_iterations && !pending.is_empty() {
            iterations += 1;
            let mut attached = 0;

            for relation in relations {
                if !pending.contains(relation.id.as_str()) {
                    continue;
                }
                if let Some(parent) = root.find_by_id_mut(&relation.parent_id) {
                    parent.push_child(Node::new(relation.id.clone()));
                    pending.remove(relation.id.as_str());
                    attached += 1;
                    trace!("attached {}", relation);
                }
            }
            trace!(pass = iterations, attached, pending = pending.len(), "pass finished");
        }

        let mut unresolved: Vec<String> = Vec::with_capacity(pending.len());
        for relation in relations {
            if pending.remove(relation.id.as_str()) {
                unresolved.push(relation.id.clone());
            }
        }

        if unresolved.is_empty() {
            debug!(passes = iterations, nodes = root.node_count(), "tree complete");
            return Ok(Deserialized { root, error: None });
        }

        debug!(passes = iterations, ?unresolved, "tree incomplete");
        Ok(Deserialized {
            root,
            error: Some(DomainError::UnresolvedNodes {
                iterations,
                unresolved,
            }),
        })
    }
}

/// Builds a tree with the default pass ceiling, see [`TreeBuilder::build`].
pub fn deserialize(relations: &[Relation]) -> DomainResult<Deserialized> {
    TreeBuilder::new().build(relations)
}

fn find_root(relations: &[Relation]) -> DomainResult<&Relation> {
    let mut root: Option<&Relation> = None;
    for relation in relations.iter().filter(|r| r.is_root()) {
        if let Some(first) = root {
            return Err(DomainError::MultipleRoots {
                first: first.id.clone(),
                second: relation.id.clone(),
            });
        }
        root = Some(relation);
    }
    root.ok_or(DomainError::NoRoot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing;

    #[ctor::ctor]
    fn init() {
        testing::init_test_setup();
    }

    fn relations(pairs: &[(&str, &str)]) -> Vec<Relation> {
        pairs.iter().map(|(id, p)| Relation::new(*id, *p)).collect()
    }

    #[test]
    fn test_child_before_parent_is_attached() {
        let rels = relations(&[("6", "2"), ("5", "2"), ("4", "3"), ("3", "1"), ("2", "1"), ("1", "")]);
        let tree = deserialize(&rels).unwrap().into_result().unwrap();

        assert_eq!(tree.id, "1");
        let ids: Vec<_> = tree.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2"]);
        assert_eq!(tree.children[0].children[0].id, "4");
        let ids: Vec<_> = tree.children[1].children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["6", "5"]);
    }

    #[test]
    fn test_find_root_reports_both_candidates() {
        let rels = relations(&[("a", ""), ("b", "a"), ("c", "")]);
        assert_eq!(
            find_root(&rels).unwrap_err(),
            DomainError::MultipleRoots {
                first: "a".into(),
                second: "c".into()
            }
        );
    }

    #[test]
    fn test_small_ceiling_leaves_deep_chain_partial() {
        // each pass attaches one level because the chain is listed leaf-first
        let rels = relations(&[("d", "c"), ("c", "b"), ("b", "a"), ("a", "")]);
        let result = TreeBuilder::new().with_max_iterations(2).build(&rels).unwrap();

        assert_eq!(result.root.node_count(), 3);
        assert_eq!(result.unresolved(), ["d".to_string()]);
        assert_eq!(
            result.error,
            Some(DomainError::UnresolvedNodes {
                iterations: 2,
                unresolved: vec!["d".into()]
            })
        );
    }

    #[test]
    fn test_duplicate_id_attached_once_even_if_copy_is_unresolvable() {
        let rels = relations(&[("a", ""), ("b", "a"), ("b", "ghost"), ("c", "ghost"), ("c", "ghost")]);
        let result = TreeBuilder::new().with_max_iterations(3).build(&rels).unwrap();

        assert_eq!(result.root.node_count(), 2);
        assert_eq!(result.root.children[0].id, "b");
        assert_eq!(
            result.error,
            Some(DomainError::UnresolvedNodes {
                iterations: 3,
                unresolved: vec!["c".into()]
            })
        );
    }

    #[test]
    fn test_stops_once_everything_is_attached() {
        let rels = relations(&[("a", ""), ("b", "a"), ("c", "b")]);
        let result = TreeBuilder::new().with_max_iterations(1).build(&rels).unwrap();
        assert!(result.is_complete());
        assert_eq!(result.root.node_count(), 3);
    }

    #[test]
    fn test_root_only() {
        let result = deserialize(&[Relation::root("solo")]).unwrap();
        assert!(result.is_complete());
        assert_eq!(result.root, Node::new("solo"));
    }
}
