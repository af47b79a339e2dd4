//! Delimited file loading
//!
//! Reads road segments with the `csv` crate and feeds them straight into a
//! [`GraphBuilder`]. The whole file must parse; the first bad row aborts
//! the load.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};

use crate::core::config::LoaderConfig;
use crate::core::error::{Error, RecordField, Result};
use crate::core::graph::{Graph, GraphBuilder};

/// Load a road graph from a file on disk
pub fn load_graph<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> Result<Graph> {
    let path = path.as_ref();
    info!("Loading roads from {}", path.display());

    let file = File::open(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let start = Instant::now();
    let graph = read_roads(file, config, path)?;
    info!("Loaded {} in {:.2}s", path.display(), start.elapsed().as_secs_f64());

    Ok(graph)
}

/// Load a road graph from any reader, e.g. an in-memory buffer or stdin
pub fn read_graph<R: Read>(reader: R, config: &LoaderConfig) -> Result<Graph> {
    read_roads(reader, config, Path::new("<input>"))
}

fn read_roads<R: Read>(reader: R, config: &LoaderConfig, origin: &Path) -> Result<Graph> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .has_headers(config.has_headers)
        .flexible(true)
        .from_reader(reader);

    let headers = if config.has_headers {
        let headers = rdr
            .headers()
            .map_err(|e| csv_error(e, origin))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect::<Vec<_>>();
        debug!("Header row has {} columns", headers.len());
        Some(headers)
    } else {
        None
    };

    let columns = config.columns.resolve(headers.as_deref())?;
    debug!("Resolved columns: {columns:?}");

    let first_line = if config.has_headers { 2 } else { 1 };
    let records = rdr.records().enumerate().map(|(i, row)| {
        let row = row.map_err(|e| csv_error(e, origin))?;
        columns.parse(line_of(&row, first_line + i as u64), &row)
    });

    GraphBuilder::ingest(records)
}

fn line_of(row: &StringRecord, fallback: u64) -> u64 {
    row.position().map(|p| p.line()).unwrap_or(fallback)
}

fn csv_error(err: csv::Error, origin: &Path) -> Error {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => Error::FileAccess {
            path: PathBuf::from(origin),
            source,
        },
        _ => Error::MalformedRecord {
            line,
            field: RecordField::Row,
            reason,
        },
    }
}
