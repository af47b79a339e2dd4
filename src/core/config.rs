//! Loader configuration
//!
//! Describes how a delimited road file is laid out. Every key is optional,
//! so a TOML file only needs to name what differs from the defaults:
//!
//! ```toml
//! delimiter = ";"
//! [columns]
//! start = "FromNode"
//! end = "ToNode"
//! label = 9
//! distance = "ArcMiles"
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};
use crate::core::record::ColumnMapping;

/// How to read a road dataset and how to query it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Field separator, a single ASCII character
    pub delimiter: char,

    /// Whether the first row names the columns
    pub has_headers: bool,

    /// Relax each Bellman-Ford column in parallel
    pub parallel: bool,

    pub columns: ColumnMapping,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_headers: true,
            parallel: false,
            columns: ColumnMapping::default(),
        }
    }
}

impl LoaderConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.delimiter_byte()?;
        Ok(config)
    }

    /// Read a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Delimiter as the single byte the csv reader expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(Error::Config(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )))
        }
    }
}

/// Built-in dataset layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Columns named `start`, `end`, `name`, `distance`
    Default,
    /// VTrans road centerline CSV export
    VtRoadCenterline,
}

impl Preset {
    pub fn config(self) -> LoaderConfig {
        match self {
            Preset::Default => LoaderConfig::default(),
            Preset::VtRoadCenterline => LoaderConfig {
                columns: ColumnMapping::vt_road_centerline(),
                ..LoaderConfig::default()
            },
        }
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Preset::Default),
            "vt-road-centerline" | "vt" => Ok(Preset::VtRoadCenterline),
            other => Err(Error::Config(format!(
                "unknown preset '{other}' (expected 'default' or 'vt-road-centerline')"
            ))),
        }
    }
}
