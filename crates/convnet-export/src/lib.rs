//! Graph export for the convention influence network
//!
//! Renders a finished [`InfluenceGraph`] as GEXF or as a JSON property graph and
//! writes it to disk atomically.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod atomic;
pub mod error;
pub mod format;
pub mod gexf;
pub mod json;

pub use atomic::write_atomic;
pub use error::{ExportError, Result};
pub use format::ExportFormat;
pub use gexf::GexfWriter;
pub use json::JsonWriter;

use convnet_domain::InfluenceGraph;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

/// Serializes a graph into a byte stream
pub trait GraphWriter {
    /// Write the complete document
    fn write_graph(&self, graph: &InfluenceGraph, out: &mut dyn Write) -> Result<()>;

    /// Render the document into a string
    fn render(&self, graph: &InfluenceGraph) -> Result<String> {
        let mut buf = Vec::new();
        self.write_graph(graph, &mut buf)?;
        String::from_utf8(buf)
            .map_err(|e| ExportError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

/// Write `graph` to `path` in the given format, replacing any existing file
pub fn export_graph(graph: &InfluenceGraph, path: &Path, format: ExportFormat) -> Result<()> {
    let writer = format.writer();
    write_atomic(path, |out| writer.write_graph(graph, out))?;

    info!(
        path = %path.display(),
        %format,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph exported"
    );
    Ok(())
}
