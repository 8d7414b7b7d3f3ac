//! Import and export codecs.
//!
//! Import format is picked from the file extension (`.csv` or `.json`,
//! case-sensitive). Export format is chosen explicitly; the exported file
//! name is `<basename>.<ext>`.

use crate::error::{Result, SongbookError};
use crate::model::Song;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub mod csv;
pub mod json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFormat {
    Csv,
    Json,
}

impl TransferFormat {
    /// Picks the import format for `path` from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if name.ends_with(".csv") {
            Ok(TransferFormat::Csv)
        } else if name.ends_with(".json") {
            Ok(TransferFormat::Json)
        } else {
            Err(SongbookError::UnsupportedFormat(name))
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            TransferFormat::Csv => "csv",
            TransferFormat::Json => "json",
        }
    }

    pub fn filename(&self, basename: &str) -> String {
        format!("{}.{}", basename, self.extension())
    }

    pub fn decode(&self, text: &str) -> Result<Vec<Song>> {
        match self {
            TransferFormat::Csv => csv::import(text),
            TransferFormat::Json => json::import(text),
        }
    }
}

impl fmt::Display for TransferFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for TransferFormat {
    type Err = SongbookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(TransferFormat::Csv),
            "json" => Ok(TransferFormat::Json),
            other => Err(SongbookError::UnsupportedFormat(other.to_string())),
        }
    }
}
