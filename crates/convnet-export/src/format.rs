//! Output format selection.

use crate::error::{ExportError, Result};
use crate::gexf::GexfWriter;
use crate::json::JsonWriter;
use crate::GraphWriter;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Supported graph output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// GEXF 1.2draft XML
    #[default]
    Gexf,
    /// JSON property graph
    Json,
}

impl ExportFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }

    /// Canonical file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Gexf => "gexf",
            ExportFormat::Json => "json",
        }
    }

    /// Writer for this format
    pub fn writer(&self) -> Box<dyn GraphWriter> {
        match self {
            ExportFormat::Gexf => Box::new(GexfWriter::new()),
            ExportFormat::Json => Box::new(JsonWriter::pretty()),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gexf" => Ok(ExportFormat::Gexf),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
