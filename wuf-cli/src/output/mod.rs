//! Report rendering for the `wuf` CLI.
//!
//! Text, JSON and CSV reports stream to any writer. Parquet output is binary
//! and is only ever written to a file.

mod parquet;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;
use tracing::{Span, field, instrument};
use wuf_core::RootGroups;

/// Snapshot of forest entries keyed by key, valued `(parent, weight)`.
pub type Snapshot = IndexMap<String, (String, usize)>;

/// Supported report formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// Comma-separated values with a header row.
    Csv,
    /// Apache Parquet; requires an output file.
    Parquet,
}

/// An edge whose endpoints were already in the same set when it was read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CycleEdge {
    /// One-based line in the edge list.
    pub line: usize,
    /// First endpoint.
    pub from: String,
    /// Second endpoint.
    pub to: String,
}

/// Result of a CLI command, ready for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// Each root with the members of its set.
    Groups(RootGroups<String>),
    /// Edges that closed a cycle.
    Cycles(Vec<CycleEdge>),
    /// Raw forest entries.
    Snapshot(Snapshot),
}

/// Errors raised while rendering or writing a report.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The output file could not be created.
    #[error("failed to create `{path}`: {source}")]
    Create {
        /// Requested output path.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Write(#[from] io::Error),
    /// JSON encoding failed.
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Assembling the Arrow record batch failed.
    #[error("failed to build record batch: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),
    /// Writing the Parquet file failed.
    #[error("failed to write parquet: {0}")]
    Parquet(#[from] ::parquet::errors::ParquetError),
    /// A binary format was requested without an output file.
    #[error("`{format:?}` output needs `--outfile`")]
    MissingOutfile {
        /// The requested format.
        format: OutputFormat,
    },
}

/// Element type of a table column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Values {
    Text(Vec<String>),
    Count(Vec<u64>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Column {
    pub(crate) name: &'static str,
    pub(crate) values: Values,
}

/// Column-oriented view of a report shared by the CSV and Parquet writers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Table {
    pub(crate) columns: Vec<Column>,
    pub(crate) rows: usize,
}

fn count(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

impl Report {
    /// Number of rows the report flattens to.
    #[must_use]
    pub fn rows(&self) -> usize {
        match self {
            Self::Groups(groups) => groups.values().map(|members| members.len()).sum(),
            Self::Cycles(cycles) => cycles.len(),
            Self::Snapshot(entries) => entries.len(),
        }
    }

    pub(crate) fn to_table(&self) -> Table {
        let columns = match self {
            Self::Groups(groups) => {
                let (roots, members) = groups
                    .iter()
                    .flat_map(|(root, set)| {
                        set.iter().map(move |member| (root.clone(), member.clone()))
                    })
                    .unzip();
                vec![
                    Column {
                        name: "root",
                        values: Values::Text(roots),
                    },
                    Column {
                        name: "member",
                        values: Values::Text(members),
                    },
                ]
            }
            Self::Cycles(cycles) => vec![
                Column {
                    name: "line",
                    values: Values::Count(cycles.iter().map(|edge| count(edge.line)).collect()),
                },
                Column {
                    name: "from",
                    values: Values::Text(cycles.iter().map(|edge| edge.from.clone()).collect()),
                },
                Column {
                    name: "to",
                    values: Values::Text(cycles.iter().map(|edge| edge.to.clone()).collect()),
                },
            ],
            Self::Snapshot(entries) => vec![
                Column {
                    name: "key",
                    values: Values::Text(entries.keys().cloned().collect()),
                },
                Column {
                    name: "parent",
                    values: Values::Text(
                        entries
                            .values()
                            .map(|(parent, _)| parent.clone())
                            .collect(),
                    ),
                },
                Column {
                    name: "weight",
                    values: Values::Count(
                        entries
                            .values()
                            .map(|&(_, weight)| count(weight))
                            .collect(),
                    ),
                },
            ],
        };
        Table {
            columns,
            rows: self.rows(),
        }
    }
}

/// Writes `report` in `format` to `outfile`, or to stdout when no file is
/// given.
///
/// # Errors
/// Returns [`OutputError::MissingOutfile`] for Parquet without a file, and
/// the underlying failure if creating, encoding or writing fails.
#[instrument(
    name = "cli.emit",
    err,
    skip(report),
    fields(rows = report.rows(), target = field::Empty),
)]
pub fn emit(
    report: &Report,
    format: OutputFormat,
    outfile: Option<&Path>,
) -> Result<(), OutputError> {
    let span = Span::current();
    let Some(path) = outfile else {
        span.record("target", "stdout");
        let stdout = io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        render(report, format, &mut writer)?;
        writer.flush()?;
        return Ok(());
    };

    span.record("target", field::display(path.display()));
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    if format == OutputFormat::Parquet {
        return parquet::write_table(&report.to_table(), file);
    }
    let mut writer = BufWriter::new(file);
    render(report, format, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Renders `report` to `writer` in a streaming format.
///
/// # Errors
/// Returns [`OutputError::MissingOutfile`] for [`OutputFormat::Parquet`], or
/// the encoding or I/O failure.
///
/// # Examples
/// ```
/// # use wuf_cli::output::{OutputFormat, Report, render};
/// # use wuf_core::Forest;
/// #
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut forest: Forest<String> = ["a", "b"].into_iter().map(String::from).collect();
/// forest.union("a", "b")?;
/// let mut buffer = Vec::new();
/// render(&Report::Groups(forest.group_by_root()), OutputFormat::Csv, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "root,member\na,a\na,b\n");
/// # Ok(())
/// # }
/// ```
pub fn render(
    report: &Report,
    format: OutputFormat,
    writer: &mut impl Write,
) -> Result<(), OutputError> {
    match format {
        OutputFormat::Text => render_text(report, writer)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, report)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => render_csv(&report.to_table(), writer)?,
        OutputFormat::Parquet => return Err(OutputError::MissingOutfile { format }),
    }
    Ok(())
}

fn render_text(report: &Report, writer: &mut impl Write) -> io::Result<()> {
    match report {
        Report::Groups(groups) => {
            writeln!(writer, "{} keys in {} sets", report.rows(), groups.len())?;
            for (root, members) in groups {
                write!(writer, "{root}:")?;
                for member in members {
                    write!(writer, " {member}")?;
                }
                writeln!(writer)?;
            }
        }
        Report::Cycles(cycles) => {
            writeln!(writer, "{} cycle-closing edges", cycles.len())?;
            for edge in cycles {
                writeln!(writer, "line {}: {} {}", edge.line, edge.from, edge.to)?;
            }
        }
        Report::Snapshot(entries) => {
            for (key, (parent, weight)) in entries {
                writeln!(writer, "{key} -> {parent} ({weight})")?;
            }
        }
    }
    Ok(())
}

fn render_csv(table: &Table, writer: &mut impl Write) -> io::Result<()> {
    let header: Vec<String> = table
        .columns
        .iter()
        .map(|column| csv_field(column.name))
        .collect();
    writeln!(writer, "{}", header.join(","))?;
    for row in 0..table.rows {
        let cells: Vec<String> = table
            .columns
            .iter()
            .map(|column| match &column.values {
                Values::Text(values) => values.get(row).map(|value| csv_field(value)),
                Values::Count(values) => values.get(row).map(u64::to_string),
            })
            .map(Option::unwrap_or_default)
            .collect();
        writeln!(writer, "{}", cells.join(","))?;
    }
    Ok(())
}

/// Quotes a field when it holds a delimiter, quote or line break, doubling
/// embedded quotes.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}
