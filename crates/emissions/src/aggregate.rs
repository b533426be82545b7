//! Conversion of the raw daily series into emission factors per index window.
use crate::EmissionConstants;
use anyhow::ensure;
use efx_primitives::{EmissionRecord, IndexPoint, RawSeriesRow};
use std::ops::Range;


/// Sums over a half-open window of dataset rows.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct WindowTotals {
    pub gas_used: f64,
    pub terahash_seconds: f64,
    pub rows: usize
}


impl std::ops::Add for WindowTotals {
    type Output = WindowTotals;

    fn add(self, rhs: Self) -> Self::Output {
        WindowTotals {
            gas_used: self.gas_used + rhs.gas_used,
            terahash_seconds: self.terahash_seconds + rhs.terahash_seconds,
            rows: self.rows + rhs.rows
        }
    }
}


impl WindowTotals {
    /// Emissions per unit of gas over the window.
    ///
    /// `0` for an empty window and for a window in which no gas was used.
    pub fn emission_factor(&self, constants: &EmissionConstants) -> f64 {
        if self.rows == 0 || self.gas_used <= 0.0 {
            return 0.0
        }
        let terahashes_per_gas = self.terahash_seconds / self.gas_used / self.rows as f64;
        constants.emissions_per_terahash() * terahashes_per_gas
    }
}


/// Both series must cover `window`.
pub fn window_totals(
    window: Range<usize>,
    gas: &[RawSeriesRow],
    hashrate: &[RawSeriesRow],
    constants: &EmissionConstants
) -> WindowTotals {
    let mut totals = WindowTotals {
        rows: window.len(),
        ..WindowTotals::default()
    };
    for (g, h) in gas[window.clone()].iter().zip(&hashrate[window]) {
        totals.gas_used += g.value;
        totals.terahash_seconds += h.value / constants.hash_efficiency * constants.seconds_in_day;
    }
    totals
}


/// Computes one [EmissionRecord] per consecutive pair of index points.
///
/// Both series are expected to be day aligned row by row.
pub fn aggregate(
    points: &[IndexPoint],
    gas: &[RawSeriesRow],
    hashrate: &[RawSeriesRow],
    constants: &EmissionConstants
) -> anyhow::Result<Vec<EmissionRecord>> {
    let rows = std::cmp::min(gas.len(), hashrate.len());

    points.windows(2).map(|pair| {
        let (beg, end) = (&pair[0], &pair[1]);
        ensure!(
            beg.row_index <= end.row_index && end.row_index <= rows,
            "index window {}..{} is out of order or out of the dataset bounds ({} rows)",
            beg.row_index,
            end.row_index,
            rows
        );
        let totals = window_totals(beg.row_index..end.row_index, gas, hashrate, constants);
        Ok(EmissionRecord {
            unix_time: beg.unix_time,
            block_number: beg.block_number,
            emission_factor: totals.emission_factor(constants)
        })
    }).collect()
}
