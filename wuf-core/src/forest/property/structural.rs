//! Structural properties: weighted union bounds tree depth, compression never
//! deepens a tree, and union order does not change the resulting partition.

use std::collections::BTreeSet;

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::Forest;

/// Builds a forest over `node_count` keys and applies `edges` as unions.
fn forest_from_edges(node_count: u16, edges: &[(u16, u16)]) -> Result<Forest<u16>, TestCaseError> {
    let mut forest: Forest<u16> = (0..node_count).collect();
    for &(p, q) in edges {
        forest
            .union(&(p % node_count), &(q % node_count))
            .map_err(|err| TestCaseError::fail(format!("union({p}, {q}): {err}")))?;
    }
    Ok(forest)
}

/// Every key sits at most `floor(log2(n))` hops below its root.
pub(super) fn run_depth_bound_property(node_count: u16, edges: &[(u16, u16)]) -> TestCaseResult {
    let forest = forest_from_edges(node_count, edges)?;
    let bound = usize::try_from(usize::from(node_count).ilog2())
        .map_err(|err| TestCaseError::fail(err.to_string()))?;

    for key in forest.iter() {
        let depth = forest
            .depth(key)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        if depth > bound {
            return Err(TestCaseError::fail(format!(
                "key {key} has depth {depth}, exceeding log2 bound {bound} for {node_count} keys"
            )));
        }
    }
    Ok(())
}

/// Resolving a root never lengthens any key's path and leaves the queried key
/// at most one hop from its root.
pub(super) fn run_compression_property(node_count: u16, edges: &[(u16, u16)]) -> TestCaseResult {
    let mut forest = forest_from_edges(node_count, edges)?;
    let fail = |err: crate::ForestError<u16>| TestCaseError::fail(err.to_string());

    for probe in 0..node_count {
        let before: Vec<usize> = (0..node_count)
            .map(|key| forest.depth(&key))
            .collect::<Result<_, _>>()
            .map_err(fail)?;
        forest.find_root(&probe).map_err(fail)?;

        if forest.depth(&probe).map_err(fail)? > 1 {
            return Err(TestCaseError::fail(format!(
                "key {probe} was not compressed onto its root"
            )));
        }
        for (key, &previous) in (0..node_count).zip(&before) {
            let depth = forest.depth(&key).map_err(fail)?;
            if depth > previous {
                return Err(TestCaseError::fail(format!(
                    "resolving {probe} deepened key {key} from {previous} to {depth}"
                )));
            }
        }
    }
    Ok(())
}

/// Applying every union with its operands swapped yields the same partition.
pub(super) fn run_symmetry_property(node_count: u16, edges: &[(u16, u16)]) -> TestCaseResult {
    let swapped: Vec<(u16, u16)> = edges.iter().map(|&(p, q)| (q, p)).collect();
    let mut forward = forest_from_edges(node_count, edges)?;
    let mut backward = forest_from_edges(node_count, &swapped)?;

    let forward_partition = partition(&mut forward);
    let backward_partition = partition(&mut backward);
    if forward_partition != backward_partition {
        return Err(TestCaseError::fail(format!(
            "partition {forward_partition:?} differs from swapped {backward_partition:?}"
        )));
    }
    Ok(())
}

fn partition(forest: &mut Forest<u16>) -> BTreeSet<BTreeSet<u16>> {
    forest
        .group_by_root()
        .into_values()
        .map(|members| members.into_iter().collect())
        .collect()
}
