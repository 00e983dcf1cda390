//! Unit tests for the structural invariant checker.

use rstest::rstest;

use super::{NodeViolation, check_nodes, resolve_roots};
use crate::forest::Node;
use crate::test_utils::forest_of;

const fn node(parent: usize, weight: usize) -> Node {
    Node { parent, weight }
}

#[test]
fn empty_forest_is_valid() {
    assert_eq!(check_nodes(&[]), Ok(()));
}

#[test]
fn resolves_chains_to_their_roots() {
    let nodes = [node(0, 4), node(0, 1), node(1, 1), node(2, 1), node(4, 1)];
    assert_eq!(resolve_roots(&nodes), Ok(vec![0, 0, 0, 0, 4]));
}

#[rstest]
#[case::two_cycle(vec![node(1, 1), node(0, 1)], 0)]
#[case::cycle_behind_a_tail(vec![node(0, 1), node(2, 1), node(3, 1), node(2, 1)], 1)]
fn detects_cycles(#[case] nodes: Vec<Node>, #[case] start: usize) {
    assert_eq!(
        check_nodes(&nodes),
        Err(NodeViolation::Cycle { node: start })
    );
}

#[rstest]
#[case::root_undercounts(vec![node(0, 1), node(0, 1)], 0, 1, 2)]
#[case::root_overcounts(vec![node(0, 3), node(0, 1)], 0, 3, 2)]
#[case::second_root(vec![node(0, 1), node(1, 5)], 1, 5, 1)]
fn detects_weight_mismatches(
    #[case] nodes: Vec<Node>,
    #[case] root: usize,
    #[case] recorded: usize,
    #[case] actual: usize,
) {
    assert_eq!(
        check_nodes(&nodes),
        Err(NodeViolation::WeightMismatch {
            root,
            recorded,
            actual
        })
    );
}

#[test]
fn stale_member_weights_are_ignored() {
    let nodes = [node(0, 3), node(0, 99), node(1, 0)];
    assert_eq!(check_nodes(&nodes), Ok(()));
}

#[test]
fn forest_operations_preserve_invariants() -> Result<(), Box<dyn std::error::Error>> {
    let mut forest = forest_of(&["a", "b", "c", "d", "e", "f", "g"]);
    for (p, q) in [("a", "b"), ("c", "d"), ("e", "f"), ("b", "d"), ("g", "a")] {
        forest.union(p, q)?;
        forest.check_invariants()?;
    }
    forest.group_by_root();
    forest.check_invariants()?;
    Ok(())
}
