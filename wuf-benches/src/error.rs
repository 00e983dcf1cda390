//! Benchmark setup error type.

use wuf_core::ForestError;

/// Errors that may occur while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
    /// Replaying a workload against a forest failed.
    #[error("forest operation failed: {0}")]
    Forest(#[from] ForestError<u32>),
}
