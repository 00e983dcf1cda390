//! Benchmark parameter types.

use std::fmt;

/// Size of a forest benchmark run, used as the Criterion parameter label.
#[derive(Clone, Copy, Debug)]
pub struct ForestBenchParams {
    /// Number of distinct keys.
    pub key_count: u32,
    /// Number of union edges applied.
    pub edge_count: usize,
}

impl fmt::Display for ForestBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},m={}", self.key_count, self.edge_count)
    }
}
