//! Error types for butterfly-walk
//!
//! Provides the error taxonomy for ingestion, configuration and queries,
//! plus fuzzy matching for misspelled column names.

use std::fmt;
use std::path::PathBuf;

use strsim::{jaro_winkler, normalized_levenshtein};
use thiserror::Error;

use crate::core::graph::VertexId;

/// Field of a road record, used to point at the offending value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Start,
    End,
    Label,
    Distance,
    /// The row as a whole (undecodable line)
    Row,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordField::Start => "start",
            RecordField::End => "end",
            RecordField::Label => "label",
            RecordField::Distance => "distance",
            RecordField::Row => "row",
        };
        f.write_str(name)
    }
}

/// Main error type for butterfly-walk operations
#[derive(Debug, Error)]
pub enum Error {
    /// An input row could not be turned into a road record
    #[error("Malformed record at line {line}, field '{field}': {reason}")]
    MalformedRecord {
        line: u64,
        field: RecordField,
        reason: String,
    },

    /// A query referenced a vertex that is not part of the graph
    #[error("Unknown vertex {0}: no road in the dataset touches it")]
    UnknownVertex(VertexId),

    /// The input source could not be opened or read
    #[error("Cannot read '{}': {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configured column name matches no header
    #[error("Unknown column '{name}'{}", suggestion_hint(.suggestion))]
    UnknownColumn {
        name: String,
        suggestion: Option<String>,
    },

    /// Invalid configuration file or option combination
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid arguments passed to a query
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{s}'?)"),
        None => String::new(),
    }
}

/// Convenience result type for butterfly-walk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Suggest the closest header for a misspelled column name
///
/// Scores every header with 70% Jaro-Winkler plus 30% normalized Levenshtein,
/// both case-insensitive. Returns `None` when the name already matches a header
/// exactly (ignoring case) or when nothing reaches the 0.7 threshold.
pub fn suggest_column(name: &str, headers: &[String]) -> Option<String> {
    let name_lower = name.to_lowercase();

    if headers.iter().any(|h| h.eq_ignore_ascii_case(name)) {
        return None;
    }

    let min_threshold = 0.7;
    let mut best_match = None;
    let mut best_score = 0.0f64;

    for header in headers {
        let header_lower = header.to_lowercase();
        let jw_score = jaro_winkler(&name_lower, &header_lower);
        let lev_score = normalized_levenshtein(&name_lower, &header_lower);
        let score = (jw_score * 0.7) + (lev_score * 0.3);

        if score >= min_threshold && score > best_score {
            best_score = score;
            best_match = Some(header.clone());
        }
    }

    best_match
}
