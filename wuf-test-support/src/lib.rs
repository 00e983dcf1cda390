//! Shared test utilities used across wuf crates.

pub mod proptest_profile;
pub mod tracing;
