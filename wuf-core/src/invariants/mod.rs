//! Structural invariant checks for [`Forest`].
//!
//! The checker walks parent links without compressing them, so it can be run
//! on seeded data before the first lookup and after any sequence of public
//! operations in tests. Two properties are verified:
//!
//! - every node reaches a self-parented root in finitely many hops;
//! - every root's weight equals the number of nodes that resolve to it.
//!
//! Weights stored at non-root nodes are stale by construction and are never
//! inspected.

use crate::error::InvariantViolation;
use crate::forest::{Forest, Node};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeViolation {
    Cycle { node: usize },
    WeightMismatch {
        root: usize,
        recorded: usize,
        actual: usize,
    },
}

pub(crate) fn check<K: Clone>(forest: &Forest<K>) -> Result<(), InvariantViolation<K>> {
    check_nodes(forest.nodes()).map_err(|violation| match violation {
        NodeViolation::Cycle { node } => InvariantViolation::Cycle {
            key: forest.key_at(node).clone(),
        },
        NodeViolation::WeightMismatch {
            root,
            recorded,
            actual,
        } => InvariantViolation::WeightMismatch {
            root: forest.key_at(root).clone(),
            recorded,
            actual,
        },
    })
}

#[expect(
    clippy::indexing_slicing,
    reason = "roots are node indices into the same slice"
)]
fn check_nodes(nodes: &[Node]) -> Result<(), NodeViolation> {
    let roots = resolve_roots(nodes)?;

    let mut members = vec![0usize; nodes.len()];
    for &root in &roots {
        members[root] += 1;
    }

    for (index, node) in nodes.iter().enumerate() {
        if node.parent == index && node.weight != members[index] {
            return Err(NodeViolation::WeightMismatch {
                root: index,
                recorded: node.weight,
                actual: members[index],
            });
        }
    }
    Ok(())
}

/// Resolves the root of every node, memoising finished paths so each node is
/// walked once.
#[expect(
    clippy::indexing_slicing,
    reason = "parent links were validated against the node count"
)]
fn resolve_roots(nodes: &[Node]) -> Result<Vec<usize>, NodeViolation> {
    let mut resolved: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut on_path = vec![false; nodes.len()];
    let mut path = Vec::new();

    for start in 0..nodes.len() {
        let mut current = start;
        let root = loop {
            if let Some(root) = resolved[current] {
                break root;
            }
            let parent = nodes[current].parent;
            if parent == current {
                break current;
            }
            if on_path[current] {
                return Err(NodeViolation::Cycle { node: start });
            }
            on_path[current] = true;
            path.push(current);
            current = parent;
        };

        for node in path.drain(..) {
            on_path[node] = false;
            resolved[node] = Some(root);
        }
        resolved[current] = Some(root);
    }

    Ok(resolved
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

#[cfg(test)]
mod tests;
