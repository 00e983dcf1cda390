//! Seeded synthetic edge workloads.
//!
//! Workloads are pure data so the cost of generating them stays outside the
//! measured closures.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use wuf_core::Forest;

use crate::error::BenchSetupError;

/// Shape of a random workload.
#[derive(Clone, Copy, Debug)]
pub struct WorkloadConfig {
    /// Number of keys, drawn as `0..key_count`.
    pub key_count: u32,
    /// Number of random edges between those keys.
    pub edge_count: usize,
    /// RNG seed, so runs are comparable.
    pub seed: u64,
}

/// Keys and the edges to union between them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeWorkload {
    /// Number of keys; keys are `0..key_count`.
    pub key_count: u32,
    /// Edges in application order.
    pub edges: Vec<(u32, u32)>,
}

impl EdgeWorkload {
    /// Generates uniformly random edges.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::ZeroValue`] when `key_count` is zero.
    pub fn random(config: &WorkloadConfig) -> Result<Self, BenchSetupError> {
        if config.key_count == 0 {
            return Err(BenchSetupError::ZeroValue {
                context: "key_count",
            });
        }
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let edges = (0..config.edge_count)
            .map(|_| {
                (
                    rng.gen_range(0..config.key_count),
                    rng.gen_range(0..config.key_count),
                )
            })
            .collect();
        Ok(Self {
            key_count: config.key_count,
            edges,
        })
    }

    /// Links every key to its successor, `(0, 1), (1, 2), ...`.
    ///
    /// Weighted union keeps key `0` as the single root, so each lookup from a
    /// fresh key is short; the workload exercises the merge path rather than
    /// compression.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::ZeroValue`] when `key_count` is zero.
    pub fn chain(key_count: u32) -> Result<Self, BenchSetupError> {
        if key_count == 0 {
            return Err(BenchSetupError::ZeroValue {
                context: "key_count",
            });
        }
        Ok(Self {
            key_count,
            edges: (1..key_count).map(|key| (key - 1, key)).collect(),
        })
    }

    /// Inserts every key and applies every edge.
    ///
    /// # Errors
    /// Propagates [`wuf_core::ForestError`]; it cannot occur for workloads
    /// built by this module because every key is inserted first.
    pub fn build(&self) -> Result<Forest<u32>, BenchSetupError> {
        let mut forest: Forest<u32> = (0..self.key_count).collect();
        for (p, q) in &self.edges {
            forest.union(p, q)?;
        }
        Ok(forest)
    }

    /// Same keys rendered as strings, for measuring hashing cost.
    #[must_use]
    pub fn string_keys(&self) -> Vec<String> {
        (0..self.key_count).map(|key| format!("key-{key}")).collect()
    }
}
