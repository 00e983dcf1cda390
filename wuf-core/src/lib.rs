//! Weighted union-find core library.
//!
//! [`Forest`] partitions a universe of keys into disjoint sets. Keys enter the
//! forest only through [`Forest::insert`]; lookups never create them. Root
//! resolution compresses paths and unions attach the lighter set beneath the
//! heavier root, giving near-constant amortised cost per operation.
//!
//! # Error codes
//!
//! Every error exposes a stable machine-readable code for downstream tooling:
//!
//! - `FOREST_KEY_NOT_FOUND`
//! - `FOREST_DUPLICATE_KEY`
//! - `FOREST_DANGLING_PARENT`
//! - `FOREST_CYCLE`
//! - `FOREST_WEIGHT_MISMATCH`
//!
//! These names are stable for downstream crates.

mod error;
mod forest;
mod invariants;

#[cfg(test)]
mod test_utils;

pub use crate::{
    error::{ForestError, ForestErrorCode, InvariantViolation, InvariantViolationCode, Result},
    forest::{Entries, EntryRef, Forest, Keys, RootGroups, Roots},
};
