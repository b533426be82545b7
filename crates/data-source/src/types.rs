use efx_primitives::{EmissionRecord, RawSeriesRow, SeriesKind};


pub trait RawDataSource {
    /// Loads one daily series, ordered by ascending timestamp.
    fn load_series(&self, kind: SeriesKind) -> anyhow::Result<Vec<RawSeriesRow>>;
}


pub trait ResultSink {
    /// Stores the complete emission table, replacing whatever was stored before.
    fn persist(&self, records: &[EmissionRecord]) -> anyhow::Result<()>;
}


impl<'a, T: RawDataSource + ?Sized> RawDataSource for &'a T {
    fn load_series(&self, kind: SeriesKind) -> anyhow::Result<Vec<RawSeriesRow>> {
        (**self).load_series(kind)
    }
}


impl<'a, T: ResultSink + ?Sized> ResultSink for &'a T {
    fn persist(&self, records: &[EmissionRecord]) -> anyhow::Result<()> {
        (**self).persist(records)
    }
}
