//! Command implementations and argument parsing for the `wuf` CLI.

use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{Span, field, info, instrument};
use wuf_core::{Forest, ForestError, InvariantViolation};

use super::input::{EdgeLine, load_seed, open_input, parse_edge_list};
use crate::output::{CycleEdge, OutputError, OutputFormat, Report, Snapshot};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "wuf",
    version,
    about = "Group keys connected by an edge list with a weighted union-find forest."
)]
pub struct Cli {
    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Write the report to this file instead of stdout. Required for parquet.
    #[arg(
        short,
        long,
        value_name = "PATH",
        global = true,
        required_if_eq("format", "parquet")
    )]
    pub outfile: Option<PathBuf>,

    /// Log more detail; repeat for debug and trace output.
    #[arg(short, long, action = ArgAction::Count, global = true, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Log less; repeat to silence errors too.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print every set as its root followed by its members.
    Groups(InputArgs),
    /// List edges whose endpoints were already connected when read.
    Cycles(InputArgs),
    /// Dump `key -> (parent, weight)` entries in the format `--seed` accepts.
    Snapshot(InputArgs),
}

impl Command {
    const fn name(&self) -> &'static str {
        match self {
            Self::Groups(_) => "groups",
            Self::Cycles(_) => "cycles",
            Self::Snapshot(_) => "snapshot",
        }
    }

    const fn input(&self) -> &InputArgs {
        match self {
            Self::Groups(args) | Self::Cycles(args) | Self::Snapshot(args) => args,
        }
    }
}

/// Input options shared by every command.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Edge list to read, or `-` for stdin.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// JSON snapshot to load before applying the edge list.
    #[arg(long, value_name = "SNAPSHOT")]
    pub seed: Option<PathBuf>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading an input file failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An edge-list line held too many tokens.
    #[error("line {line}: expected one or two keys, found {tokens}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// Number of whitespace-separated tokens on the line.
        tokens: usize,
    },
    /// A seed snapshot was not valid JSON of the expected shape.
    #[error("failed to parse seed `{path}`: {source}")]
    Json {
        /// Seed path.
        path: PathBuf,
        /// Underlying decoding error.
        #[source]
        source: serde_json::Error,
    },
    /// A seed snapshot described an inconsistent forest.
    #[error("invalid seed: {0}")]
    Seed(#[from] InvariantViolation<String>),
    /// A forest lookup failed.
    #[error(transparent)]
    Forest(#[from] ForestError<String>),
    /// Rendering or writing the report failed.
    #[error(transparent)]
    Output(#[from] OutputError),
}

impl CliError {
    /// Stable code of the underlying core error, if there is one.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Seed(violation) => Some(violation.code().as_str()),
            Self::Forest(error) => Some(error.code().as_str()),
            _ => None,
        }
    }
}

/// Executes the CLI command represented by `cli` and returns its report.
///
/// # Errors
/// Returns [`CliError`] when the seed or edge list cannot be read or is
/// malformed.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::ffi::OsStr;
/// # use clap::Parser;
/// # use tempfile::NamedTempFile;
/// # use wuf_cli::{cli::{Cli, run_cli}, output::Report};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "a b\nc d\nb c\n")?;
/// let args = [OsStr::new("wuf"), OsStr::new("groups"), file.path().as_os_str()];
/// let cli = Cli::try_parse_from(args)?;
/// let Report::Groups(groups) = run_cli(&cli)? else {
///     unreachable!("groups command yields a groups report");
/// };
/// assert_eq!(groups.len(), 1);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty, seeded = field::Empty),
)]
pub fn run_cli(cli: &Cli) -> Result<Report, CliError> {
    let span = Span::current();
    span.record("command", cli.command.name());
    let args = cli.command.input();
    span.record("seeded", args.seed.is_some());

    let mut forest = match &args.seed {
        Some(path) => load_seed(path)?,
        None => Forest::new(),
    };
    let lines = parse_edge_list(open_input(&args.input)?, &args.input)?;
    let cycles = apply_edges(&mut forest, &lines)?;

    let report = match cli.command {
        Command::Groups(_) => Report::Groups(forest.group_by_root()),
        Command::Cycles(_) => Report::Cycles(cycles),
        Command::Snapshot(_) => Report::Snapshot(snapshot(&forest)),
    };
    info!(
        keys = forest.len(),
        sets = forest.set_count(),
        "command completed"
    );
    Ok(report)
}

/// Inserts every key and unions every edge, returning the edges whose
/// endpoints were already connected.
#[instrument(
    name = "cli.apply_edges",
    err,
    skip_all,
    fields(lines = lines.len(), merged = field::Empty, redundant = field::Empty),
)]
pub(super) fn apply_edges(
    forest: &mut Forest<String>,
    lines: &[EdgeLine],
) -> Result<Vec<CycleEdge>, CliError> {
    let mut merged = 0_usize;
    let mut cycles = Vec::new();
    for entry in lines {
        match entry {
            EdgeLine::Key { key, .. } => {
                forest.insert(key.clone());
            }
            EdgeLine::Edge { line, from, to } => {
                forest.insert(from.clone());
                forest.insert(to.clone());
                if forest.union(from.as_str(), to.as_str())? {
                    merged += 1;
                } else {
                    cycles.push(CycleEdge {
                        line: *line,
                        from: from.clone(),
                        to: to.clone(),
                    });
                }
            }
        }
    }
    let span = Span::current();
    span.record("merged", merged);
    span.record("redundant", cycles.len());
    Ok(cycles)
}

pub(super) fn snapshot(forest: &Forest<String>) -> Snapshot {
    forest
        .entries()
        .map(|entry| {
            (
                entry.key().clone(),
                (entry.parent().clone(), entry.weight()),
            )
        })
        .collect()
}
