//! Property-based tests for the weighted union-find forest.
//!
//! Replays random operation sequences against the forest and a naive
//! relabelling oracle, validates structural invariants after every step, and
//! checks the depth bound that weighted union guarantees.

mod equivalence;
mod oracle;
mod structural;
mod types;
