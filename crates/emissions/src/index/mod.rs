//! Alignment of the daily datasets with chain heights.
//!
//! An index is an ordered list of [IndexPoint]s. Both strategies end the list
//! with a point pinned to the last dataset row, so that aggregation covers
//! the whole dataset.
mod block;
mod day;


use crate::UnknownMode;
use efx_primitives::{BlockNumber, IndexPoint, RawSeriesRow, RowIndex, UnixTime};
use futures::future::BoxFuture;
use std::fmt::{Display, Formatter};
use std::str::FromStr;


pub use block::BlockResolution;
pub use day::DayResolution;


pub trait IndexingStrategy {
    /// Builds the index for a non-empty, time ordered daily series.
    fn build<'a>(
        &'a self,
        series: &'a [RawSeriesRow],
        latest_block: BlockNumber
    ) -> BoxFuture<'a, anyhow::Result<Vec<IndexPoint>>>;
}


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum IndexMode {
    /// Sample every N-th block
    Block,
    /// Sample every N-th day of the dataset
    Day
}


impl FromStr for IndexMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block" => Ok(IndexMode::Block),
            "day" => Ok(IndexMode::Day),
            _ => Err(UnknownMode {
                mode: s.to_string()
            })
        }
    }
}


impl Display for IndexMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexMode::Block => write!(f, "block"),
            IndexMode::Day => write!(f, "day")
        }
    }
}


/// Row of the dataset that is in effect at `time`:
/// the first row whose successor starts strictly after `time`.
///
/// Moments at or past the start of the last row resolve to the last row.
/// The same goes for moments that predate the whole dataset, they resolve to the first one.
pub fn row_in_effect(series: &[RawSeriesRow], time: UnixTime) -> RowIndex {
    series.get(1..).map_or(0, |tail| {
        tail.partition_point(|row| row.unix_timestamp <= time)
    })
}
