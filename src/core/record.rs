//! Road record parsing
//!
//! Turns delimited rows into [`RoadRecord`]s according to a configurable
//! column mapping. Columns may be referenced by header name or by zero-based
//! index, since road datasets differ in schema.

use std::fmt;
use std::str::FromStr;

use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::core::error::{suggest_column, Error, RecordField, Result};
use crate::core::graph::VertexId;

/// One bidirectional road segment as read from the input
#[derive(Debug, Clone, PartialEq)]
pub struct RoadRecord {
    pub start: VertexId,
    pub end: VertexId,
    pub label: String,
    pub distance: f64,
}

impl RoadRecord {
    /// Create a record, validating the distance
    pub fn new(start: VertexId, end: VertexId, label: impl Into<String>, distance: f64) -> Result<Self> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(Error::InvalidInput(format!(
                "road distance must be a non-negative finite number, got {distance}"
            )));
        }
        Ok(Self {
            start,
            end,
            label: label.into(),
            distance,
        })
    }
}

/// Reference to an input column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    /// Zero-based field position
    Index(usize),
    /// Header name, matched exactly
    Name(String),
}

impl FromStr for ColumnRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().parse::<usize>() {
            Ok(index) => ColumnRef::Index(index),
            Err(_) => ColumnRef::Name(s.trim().to_string()),
        })
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Index(index) => write!(f, "#{index}"),
            ColumnRef::Name(name) => write!(f, "{name}"),
        }
    }
}

/// Which input columns hold the four road fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub start: ColumnRef,
    pub end: ColumnRef,
    pub label: ColumnRef,
    pub distance: ColumnRef,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            start: ColumnRef::Name("start".to_string()),
            end: ColumnRef::Name("end".to_string()),
            label: ColumnRef::Name("name".to_string()),
            distance: ColumnRef::Name("distance".to_string()),
        }
    }
}

impl ColumnMapping {
    /// Layout of the VTrans road centerline export: FromNode/ToNode ids,
    /// street name and ArcMiles at fixed positions.
    pub fn vt_road_centerline() -> Self {
        Self {
            start: ColumnRef::Index(60),
            end: ColumnRef::Index(61),
            label: ColumnRef::Index(9),
            distance: ColumnRef::Index(31),
        }
    }

    /// Resolve every column to a field position
    ///
    /// `headers` is `None` when the input has no header row, in which case
    /// only index references are accepted.
    pub fn resolve(&self, headers: Option<&[String]>) -> Result<ResolvedColumns> {
        Ok(ResolvedColumns {
            start: resolve_column(&self.start, headers)?,
            end: resolve_column(&self.end, headers)?,
            label: resolve_column(&self.label, headers)?,
            distance: resolve_column(&self.distance, headers)?,
        })
    }
}

fn resolve_column(column: &ColumnRef, headers: Option<&[String]>) -> Result<usize> {
    match column {
        ColumnRef::Index(index) => Ok(*index),
        ColumnRef::Name(name) => {
            let headers = headers.ok_or_else(|| {
                Error::Config(format!(
                    "column '{name}' is referenced by name but the input has no header row"
                ))
            })?;
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| Error::UnknownColumn {
                    name: name.clone(),
                    suggestion: suggest_column(name, headers),
                })
        }
    }
}

/// Column mapping resolved against a concrete input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub start: usize,
    pub end: usize,
    pub label: usize,
    pub distance: usize,
}

impl ResolvedColumns {
    /// Parse one row; `line` is the 1-based input line used in errors
    pub fn parse(&self, line: u64, row: &StringRecord) -> Result<RoadRecord> {
        let start = parse_vertex(line, RecordField::Start, field(line, row, self.start, RecordField::Start)?)?;
        let end = parse_vertex(line, RecordField::End, field(line, row, self.end, RecordField::End)?)?;
        let label = field(line, row, self.label, RecordField::Label)?.trim().to_string();
        let distance = parse_distance(line, field(line, row, self.distance, RecordField::Distance)?)?;

        Ok(RoadRecord {
            start,
            end,
            label,
            distance,
        })
    }
}

fn field<'r>(line: u64, row: &'r StringRecord, index: usize, which: RecordField) -> Result<&'r str> {
    row.get(index).ok_or_else(|| Error::MalformedRecord {
        line,
        field: which,
        reason: format!("missing column #{index} (row has {} fields)", row.len()),
    })
}

fn parse_vertex(line: u64, which: RecordField, raw: &str) -> Result<VertexId> {
    raw.trim().parse::<VertexId>().map_err(|_| Error::MalformedRecord {
        line,
        field: which,
        reason: format!("'{raw}' is not an integer vertex id"),
    })
}

fn parse_distance(line: u64, raw: &str) -> Result<f64> {
    let malformed = |reason: String| Error::MalformedRecord {
        line,
        field: RecordField::Distance,
        reason,
    };

    let distance = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| malformed(format!("'{raw}' is not a number")))?;

    if !distance.is_finite() {
        return Err(malformed(format!("'{raw}' is not finite")));
    }
    if distance < 0.0 {
        return Err(malformed(format!("negative distance {distance}")));
    }
    Ok(distance)
}
