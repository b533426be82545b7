use crate::ResultSink;
use anyhow::Context;
use efx_primitives::EmissionRecord;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;


/// Writes the emission table as a pretty-printed JSON array.
///
/// The file is written next to its final location and renamed over it,
/// so readers never observe a half-written table.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf
}


impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into()
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}


impl ResultSink for JsonFileSink {
    fn persist(&self, records: &[EmissionRecord]) -> anyhow::Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new(".")
        };

        let mut file = tempfile::NamedTempFile::new_in(dir).with_context(|| {
            format!("failed to create a temporary file in {}", dir.display())
        })?;

        serde_json::to_writer_pretty(&mut file, records)
            .context("failed to serialize emission records")?;
        file.flush()?;

        file.persist(&self.path).with_context(|| {
            format!("failed to save {}", self.path.display())
        })?;

        info!(records = records.len(), "saved JSON data to {}", self.path.display());
        Ok(())
    }
}
