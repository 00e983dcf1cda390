//! Oracle equivalence: the forest and the relabelling oracle agree on every
//! observable result of a random operation script.

use std::collections::BTreeSet;

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{Forest, ForestError};

use super::oracle::LabelOracle;
use super::types::Operation;

pub(super) fn run_oracle_equivalence_property(script: &[Operation]) -> TestCaseResult {
    let mut forest: Forest<u8> = Forest::new();
    let mut oracle = LabelOracle::default();

    for (step, &operation) in script.iter().enumerate() {
        apply(&mut forest, &mut oracle, operation).map_err(|reason| {
            TestCaseError::fail(format!("step {step} ({operation:?}): {reason}"))
        })?;

        forest.check_invariants().map_err(|violation| {
            TestCaseError::fail(format!("step {step} ({operation:?}): {violation}"))
        })?;

        if forest.set_count() != oracle.set_count() {
            return Err(TestCaseError::fail(format!(
                "step {step} ({operation:?}): set count {} but oracle has {}",
                forest.set_count(),
                oracle.set_count(),
            )));
        }
    }

    let partition = forest_partition(&mut forest);
    if partition != oracle.partition() {
        return Err(TestCaseError::fail(format!(
            "final partition {partition:?} differs from oracle {:?}",
            oracle.partition(),
        )));
    }
    Ok(())
}

fn apply(
    forest: &mut Forest<u8>,
    oracle: &mut LabelOracle,
    operation: Operation,
) -> Result<(), String> {
    match operation {
        Operation::Insert(key) => {
            let inserted = forest.insert(key);
            expect_equal("insert", inserted, oracle.insert(key))
        }
        Operation::Union(p, q) => {
            let merged = forest.union(&p, &q);
            match (merged, oracle.union(p, q)) {
                (Ok(merged), Some(expected)) => expect_equal("union", merged, expected),
                (Err(ForestError::KeyNotFound { key }), None) => {
                    if oracle.contains(key) {
                        Err(format!("union reported present key {key} as missing"))
                    } else {
                        Ok(())
                    }
                }
                (actual, expected) => Err(format!(
                    "union returned {actual:?} but oracle expected {expected:?}"
                )),
            }
        }
        Operation::FindRoot(key) => match (forest.find_root(&key), oracle.set_size(key)) {
            (Ok(root), Some(expected_size)) => {
                expect_equal("root membership", forest.connected(&root, &key), Ok(true))?;
                expect_equal("set size", forest.set_size(&root), Ok(expected_size))
            }
            (Err(_), None) => Ok(()),
            (actual, expected) => Err(format!(
                "find_root returned {actual:?} but oracle set size is {expected:?}"
            )),
        },
        Operation::GroupByRoot => {
            let groups = forest.group_by_root();
            let members: usize = groups.values().map(indexmap::IndexSet::len).sum();
            expect_equal("grouped members", members, forest.len())
        }
    }
}

fn expect_equal<T: PartialEq + std::fmt::Debug>(
    label: &str,
    actual: T,
    expected: T,
) -> Result<(), String> {
    if actual == expected {
        Ok(())
    } else {
        Err(format!("{label}: got {actual:?}, expected {expected:?}"))
    }
}

fn forest_partition(forest: &mut Forest<u8>) -> BTreeSet<BTreeSet<u8>> {
    forest
        .group_by_root()
        .into_values()
        .map(|members| members.into_iter().collect())
        .collect()
}
