//! Edge-list parsing and seed loading.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use indexmap::IndexMap;
use tracing::{Span, debug, field, instrument};
use wuf_core::Forest;

use super::CliError;

/// Path understood as standard input.
pub(super) const STDIN_PATH: &str = "-";

/// A meaningful line of an edge list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EdgeLine {
    /// A lone key to insert.
    Key {
        /// One-based source line.
        line: usize,
        /// Key to insert.
        key: String,
    },
    /// Two keys to insert and union.
    Edge {
        /// One-based source line.
        line: usize,
        /// First endpoint.
        from: String,
        /// Second endpoint.
        to: String,
    },
}

/// Parses an edge list.
///
/// Blank lines and lines whose first non-blank character is `#` are skipped.
/// One token is a key, two whitespace-separated tokens are an edge.
///
/// # Errors
/// Returns [`CliError::Parse`] for a line with more than two tokens and
/// [`CliError::Io`] if reading fails, attributing it to `path`.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use wuf_cli::cli::{EdgeLine, parse_edge_list};
///
/// # fn main() -> Result<(), wuf_cli::cli::CliError> {
/// let lines = parse_edge_list("# comment\na b\n\nc\n".as_bytes(), Path::new("-"))?;
/// assert_eq!(lines.len(), 2);
/// assert!(matches!(&lines[1], EdgeLine::Key { line: 4, key } if key == "c"));
/// # Ok(())
/// # }
/// ```
pub fn parse_edge_list(reader: impl BufRead, path: &Path) -> Result<Vec<EdgeLine>, CliError> {
    let mut parsed = Vec::new();
    for (index, text) in reader.lines().enumerate() {
        let line = index + 1;
        let text = text.map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut tokens = trimmed.split_whitespace();
        let entry = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(key), None, _) => EdgeLine::Key {
                line,
                key: key.to_owned(),
            },
            (Some(from), Some(to), None) => EdgeLine::Edge {
                line,
                from: from.to_owned(),
                to: to.to_owned(),
            },
            _ => {
                return Err(CliError::Parse {
                    line,
                    tokens: trimmed.split_whitespace().count(),
                });
            }
        };
        parsed.push(entry);
    }
    Ok(parsed)
}

/// Opens `path` for reading, treating `-` as standard input.
#[instrument(
    name = "cli.open_input",
    err,
    fields(path = field::Empty),
)]
pub(super) fn open_input(path: &Path) -> Result<Box<dyn BufRead>, CliError> {
    Span::current().record("path", field::display(path.display()));
    if path.as_os_str() == STDIN_PATH {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Loads a `{"key": ["parent", weight]}` snapshot and validates it as a
/// forest.
#[instrument(
    name = "cli.load_seed",
    err,
    fields(path = field::Empty, keys = field::Empty),
)]
pub(super) fn load_seed(path: &Path) -> Result<Forest<String>, CliError> {
    let span = Span::current();
    span.record("path", field::display(path.display()));
    let mut raw = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut raw))
        .map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let entries: IndexMap<String, (String, usize)> =
        serde_json::from_str(&raw).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    span.record("keys", entries.len());
    let forest = Forest::try_from_entries(entries)?;
    debug!(sets = forest.set_count(), "seed loaded");
    Ok(forest)
}
