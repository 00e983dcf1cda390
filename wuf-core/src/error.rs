//! Error types for the wuf core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident<$K:ident> {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl<$K> $ErrTy<$K> {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error produced by [`crate::Forest`] lookups.
///
/// Every fallible operation checks key membership before touching any parent
/// link, so a returned error never leaves the forest partially updated.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ForestError<K> {
    /// The key was never inserted into the forest.
    #[error("key {key:?} has not been inserted into the forest")]
    KeyNotFound {
        /// The key that failed to resolve.
        key: K,
    },
}

define_error_codes! {
    /// Stable codes describing [`ForestError`] variants.
    enum ForestErrorCode for ForestError<K> {
        /// The key was never inserted into the forest.
        KeyNotFound => KeyNotFound { .. } => "FOREST_KEY_NOT_FOUND",
    }
}

/// A broken structural invariant found while validating forest entries.
///
/// Produced by [`crate::Forest::check_invariants`] and when seeding a forest
/// through [`crate::Forest::try_from_entries`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InvariantViolation<K> {
    /// The same key appeared more than once in seed data.
    #[error("key {key:?} appears more than once")]
    DuplicateKey {
        /// The repeated key.
        key: K,
    },
    /// An entry names a parent that is not itself an entry.
    #[error("key {key:?} points at unknown parent {parent:?}")]
    DanglingParent {
        /// The entry holding the dangling link.
        key: K,
        /// The parent that could not be found.
        parent: K,
    },
    /// Following parent links from a key never reaches a root.
    #[error("parent links starting at {key:?} form a cycle")]
    Cycle {
        /// A key on, or leading into, the cycle.
        key: K,
    },
    /// A root's recorded weight differs from the number of keys in its set.
    #[error("root {root:?} records weight {recorded} but its set holds {actual} keys")]
    WeightMismatch {
        /// The offending root.
        root: K,
        /// Weight stored at the root.
        recorded: usize,
        /// Number of keys that resolve to the root.
        actual: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`InvariantViolation`] variants.
    enum InvariantViolationCode for InvariantViolation<K> {
        /// The same key appeared more than once in seed data.
        DuplicateKey => DuplicateKey { .. } => "FOREST_DUPLICATE_KEY",
        /// An entry names a parent that is not itself an entry.
        DanglingParent => DanglingParent { .. } => "FOREST_DANGLING_PARENT",
        /// Following parent links from a key never reaches a root.
        Cycle => Cycle { .. } => "FOREST_CYCLE",
        /// A root's recorded weight differs from the number of keys in its set.
        WeightMismatch => WeightMismatch { .. } => "FOREST_WEIGHT_MISMATCH",
    }
}

/// Convenient alias for results returned by [`crate::Forest`] lookups.
pub type Result<T, K> = core::result::Result<T, ForestError<K>>;
