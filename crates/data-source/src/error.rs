use efx_primitives::SeriesKind;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;


#[derive(Debug)]
pub struct MissingDataset {
    pub kind: SeriesKind,
    pub dir: PathBuf
}


impl Display for MissingDataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "could not find {}/{}-[date].csv with the {} series",
            self.dir.display(),
            self.kind.file_prefix(),
            self.kind
        )
    }
}


impl std::error::Error for MissingDataset {}
