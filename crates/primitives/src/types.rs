use std::fmt::{Display, Formatter};


pub type BlockNumber = u64;
pub type UnixTime = i64;
pub type RowIndex = usize;


/// One day of a raw input dataset.
///
/// The column names match the daily chart exports the datasets come from.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeriesRow {
    #[cfg_attr(feature = "serde", serde(rename = "Date(UTC)"))]
    pub date_label: String,
    #[cfg_attr(feature = "serde", serde(rename = "UnixTimeStamp"))]
    pub unix_timestamp: UnixTime,
    #[cfg_attr(feature = "serde", serde(rename = "Value"))]
    pub value: f64
}


impl RawSeriesRow {
    pub fn new(date_label: impl Into<String>, unix_timestamp: UnixTime, value: f64) -> Self {
        Self {
            date_label: date_label.into(),
            unix_timestamp,
            value
        }
    }
}


/// Checkpoint binding a raw dataset row to a moment in time and a chain height.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct IndexPoint {
    /// Row of the raw datasets that was current as of `unix_time`
    pub row_index: RowIndex,
    pub unix_time: UnixTime,
    pub block_number: BlockNumber
}


impl Display for IndexPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {} @ {} (block {})", self.row_index, self.unix_time, self.block_number)
    }
}


#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EmissionRecord {
    pub unix_time: UnixTime,
    pub block_number: BlockNumber,
    pub emission_factor: f64
}


#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SeriesKind {
    GasUsed,
    NetworkHash
}


impl SeriesKind {
    /// File name prefix of the dataset holding this series
    pub fn file_prefix(&self) -> &'static str {
        match self {
            SeriesKind::GasUsed => "GasUsed",
            SeriesKind::NetworkHash => "NetworkHash"
        }
    }
}


impl Display for SeriesKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesKind::GasUsed => write!(f, "gas used"),
            SeriesKind::NetworkHash => write!(f, "network hashrate")
        }
    }
}
