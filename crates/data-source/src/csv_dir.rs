use crate::{MissingDataset, RawDataSource};
use anyhow::{ensure, Context};
use efx_primitives::{RawSeriesRow, SeriesKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info};


/// Directory of daily CSV exports, one file per series kind.
///
/// Files are matched by their name prefix (`GasUsed`, `NetworkHash`).
/// When several files match, the lexicographically last one is used,
/// so that `GasUsed-2022-06-01.csv` wins over `GasUsed-2022-01-01.csv`.
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    dir: PathBuf
}


impl CsvDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into()
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn find_dataset(&self, kind: SeriesKind) -> anyhow::Result<PathBuf> {
        let entries = std::fs::read_dir(&self.dir).with_context(|| {
            format!("failed to list data directory {}", self.dir.display())
        })?;

        let mut found: Option<PathBuf> = None;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue
            }
            let path = entry.path();
            let matches = path.file_name()
                .and_then(|name| name.to_str())
                .map_or(false, |name| name.starts_with(kind.file_prefix()));
            if matches && found.as_ref().map_or(true, |prev| prev < &path) {
                found = Some(path)
            }
        }

        found.ok_or_else(|| {
            MissingDataset {
                kind,
                dir: self.dir.clone()
            }.into()
        })
    }
}


pub fn read_series_file(path: &Path) -> anyhow::Result<Vec<RawSeriesRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let rows = reader.deserialize()
        .collect::<Result<Vec<RawSeriesRow>, _>>()
        .with_context(|| format!("failed to parse {}", path.display()))?;

    for (i, pair) in rows.windows(2).enumerate() {
        ensure!(
            pair[0].unix_timestamp < pair[1].unix_timestamp,
            "{}: rows are not in ascending time order at data row {}",
            path.display(),
            i + 2
        );
    }

    Ok(rows)
}


impl RawDataSource for CsvDirectory {
    fn load_series(&self, kind: SeriesKind) -> anyhow::Result<Vec<RawSeriesRow>> {
        let path = self.find_dataset(kind)?;
        debug!(file = %path.display(), "reading {} series", kind);
        let rows = read_series_file(&path)?;
        info!(file = %path.display(), rows = rows.len(), "loaded {} series", kind);
        Ok(rows)
    }
}
