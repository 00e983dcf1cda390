//! Operation scripts replayed by the forest property tests.

use test_strategy::Arbitrary;

/// Number of distinct keys drawn by generated operations. Small enough that
/// random unions regularly hit already-connected pairs and missing keys.
pub(super) const KEY_SPACE: u8 = 24;

/// A single forest operation in a generated script.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum Operation {
    /// Insert a key, which may already be present.
    #[weight(3)]
    Insert(#[strategy(0..KEY_SPACE)] u8),
    /// Union two keys, either of which may be missing.
    #[weight(4)]
    Union(#[strategy(0..KEY_SPACE)] u8, #[strategy(0..KEY_SPACE)] u8),
    /// Resolve the root of a key, which may be missing.
    #[weight(2)]
    FindRoot(#[strategy(0..KEY_SPACE)] u8),
    /// Materialise every group, compressing every path.
    #[weight(1)]
    GroupByRoot,
}
