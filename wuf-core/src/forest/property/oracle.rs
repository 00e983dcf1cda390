//! Naive relabelling oracle for forest property verification.
//!
//! Every key carries an explicit set label; a union rewrites every label of
//! the absorbed set. Quadratic, but trivially correct.

use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, Default)]
pub(super) struct LabelOracle {
    labels: BTreeMap<u8, u8>,
}

impl LabelOracle {
    pub(super) fn insert(&mut self, key: u8) -> bool {
        if self.labels.contains_key(&key) {
            return false;
        }
        self.labels.insert(key, key);
        true
    }

    pub(super) fn contains(&self, key: u8) -> bool {
        self.labels.contains_key(&key)
    }

    /// Returns `None` when either key is missing, otherwise whether two
    /// distinct sets were merged.
    pub(super) fn union(&mut self, p: u8, q: u8) -> Option<bool> {
        let p_label = *self.labels.get(&p)?;
        let q_label = *self.labels.get(&q)?;
        if p_label == q_label {
            return Some(false);
        }
        for label in self.labels.values_mut() {
            if *label == q_label {
                *label = p_label;
            }
        }
        Some(true)
    }

    pub(super) fn set_count(&self) -> usize {
        self.labels.values().collect::<BTreeSet<_>>().len()
    }

    pub(super) fn set_size(&self, key: u8) -> Option<usize> {
        let label = self.labels.get(&key)?;
        Some(self.labels.values().filter(|other| *other == label).count())
    }

    /// Canonical partition: sorted groups of sorted keys.
    pub(super) fn partition(&self) -> BTreeSet<BTreeSet<u8>> {
        let mut groups: BTreeMap<u8, BTreeSet<u8>> = BTreeMap::new();
        for (&key, &label) in &self.labels {
            groups.entry(label).or_default().insert(key);
        }
        groups.into_values().collect()
    }
}
