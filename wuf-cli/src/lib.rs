//! Support library for the `wuf` binary.
//!
//! Exposes argument parsing, command execution, report rendering and logging
//! set-up so integration tests can drive the pipeline without spawning a
//! subprocess.

pub mod cli;
pub mod logging;
pub mod output;
