//! All-or-nothing file output
//!
//! Content is rendered into a temp file in the destination directory and
//! renamed over the target only once rendering succeeded, so a failed export
//! never leaves a truncated file behind.

use crate::error::Result;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Render into a temp file next to `path`, then move it into place
pub fn write_atomic<F>(path: &Path, render: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        render(&mut writer)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;

    debug!(temp = %tmp.path().display(), target = %path.display(), "persisting output");
    tmp.persist(path)?;
    Ok(())
}
