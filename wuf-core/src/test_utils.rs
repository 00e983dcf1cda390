//! Shared test utilities for `wuf-core`.

use proptest::test_runner::Config as ProptestConfig;
use wuf_test_support::proptest_profile::ProptestRunProfile;

use crate::Forest;

/// Builds a standard proptest configuration from the shared run profile so
/// every property suite honours `WUF_PROPTEST_CASES` and `WUF_PBT_FORK`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds a forest holding `keys` as singletons.
pub(crate) fn forest_of(keys: &[&'static str]) -> Forest<String> {
    keys.iter().map(|key| (*key).to_owned()).collect()
}

/// Returns the partition as sorted, sorted-member groups so assertions do not
/// depend on root identity or insertion order.
pub(crate) fn sorted_partition(forest: &mut Forest<String>) -> Vec<Vec<String>> {
    let mut groups: Vec<Vec<String>> = forest
        .group_by_root()
        .into_values()
        .map(|members| {
            let mut members: Vec<String> = members.into_iter().collect();
            members.sort();
            members
        })
        .collect();
    groups.sort();
    groups
}
