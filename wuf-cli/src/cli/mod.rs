//! Command-line interface orchestration for `wuf`.
//!
//! Every subcommand reads an edge list, optionally on top of a seeded forest,
//! and produces a [`crate::output::Report`] for rendering.

mod commands;
mod input;

pub use commands::{Cli, CliError, Command, InputArgs, run_cli};
pub use input::{EdgeLine, parse_edge_list};

#[cfg(test)]
mod test_helpers;
