use efx_primitives::SeriesKind;
use std::fmt::{Display, Formatter};


#[derive(Debug)]
pub struct UnknownMode {
    pub mode: String
}


impl Display for UnknownMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown index mode '{}', please specify 'block' or 'day'", self.mode)
    }
}


impl std::error::Error for UnknownMode {}


#[derive(Debug)]
pub struct InvalidResolution;


impl Display for InvalidResolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "index resolution must be greater than 0 and fit the row index range")
    }
}


impl std::error::Error for InvalidResolution {}


#[derive(Debug)]
pub struct EmptySeries {
    pub kind: SeriesKind
}


impl Display for EmptySeries {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} series has no rows", self.kind)
    }
}


impl std::error::Error for EmptySeries {}


#[derive(Debug)]
pub struct SeriesMismatch {
    pub gas_rows: usize,
    pub hashrate_rows: usize
}


impl Display for SeriesMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "gas used series has {} rows, but network hashrate series has {}",
            self.gas_rows,
            self.hashrate_rows
        )
    }
}


impl std::error::Error for SeriesMismatch {}
