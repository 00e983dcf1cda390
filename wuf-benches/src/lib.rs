//! Benchmark support crate for wuf.
//!
//! Provides seeded synthetic edge workloads and parameter types used by the
//! Criterion benchmarks for forest construction, root lookup and grouping.

pub mod error;
pub mod params;
pub mod workload;
