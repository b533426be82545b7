#![allow(dead_code)]
use anyhow::anyhow;
use efx_chain_client::{BlockExplorerLookup, ChainTimeLookup, RateLimited};
use efx_data_source::{RawDataSource, ResultSink};
use efx_primitives::{BlockNumber, EmissionRecord, RawSeriesRow, SeriesKind, UnixTime};
use futures::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use std::collections::HashMap;


pub const FIRST_DAY: UnixTime = 1438214400;
pub const DAY: UnixTime = 86400;
pub const GENESIS: UnixTime = 1438270000;
pub const BLOCK_TIME: UnixTime = 15;


pub fn day_series(values: &[f64]) -> Vec<RawSeriesRow> {
    values.iter()
        .enumerate()
        .map(|(i, &v)| RawSeriesRow::new(format!("day {}", i), FIRST_DAY + DAY * i as i64, v))
        .collect()
}


/// Chain mined one block every [BLOCK_TIME] seconds since [GENESIS].
pub struct MockChain {
    pub height: BlockNumber,
    pub fail_at: Option<BlockNumber>,
    pub requested: Mutex<Vec<BlockNumber>>
}


impl MockChain {
    pub fn new(height: BlockNumber) -> Self {
        Self {
            height,
            fail_at: None,
            requested: Mutex::new(Vec::new())
        }
    }

    pub fn block_time(block: BlockNumber) -> UnixTime {
        GENESIS + BLOCK_TIME * block as i64
    }
}


impl ChainTimeLookup for MockChain {
    fn block_timestamp(&self, block: BlockNumber) -> BoxFuture<'_, anyhow::Result<UnixTime>> {
        self.requested.lock().push(block);
        let result = if self.fail_at == Some(block) {
            Err(anyhow!("rpc node is down"))
        } else {
            Ok(Self::block_time(block))
        };
        futures::future::ready(result).boxed()
    }

    fn current_height(&self) -> BoxFuture<'_, anyhow::Result<BlockNumber>> {
        futures::future::ready(Ok(self.height)).boxed()
    }
}


/// Explorer over the [MockChain] timeline, refusing some lookups a given number of times.
pub struct MockExplorer {
    pub refusals: Mutex<HashMap<UnixTime, usize>>,
    pub requested: Mutex<Vec<UnixTime>>
}


impl MockExplorer {
    pub fn new() -> Self {
        Self {
            refusals: Mutex::new(HashMap::new()),
            requested: Mutex::new(Vec::new())
        }
    }

    pub fn refuse(self, time: UnixTime, times: usize) -> Self {
        self.refusals.lock().insert(time, times);
        self
    }

    pub fn block_at(time: UnixTime) -> BlockNumber {
        ((time - GENESIS) / BLOCK_TIME) as BlockNumber
    }
}


impl BlockExplorerLookup for MockExplorer {
    fn block_at_or_before(&self, time: UnixTime) -> BoxFuture<'_, anyhow::Result<BlockNumber>> {
        self.requested.lock().push(time);
        let refused = match self.refusals.lock().get_mut(&time) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            },
            _ => false
        };
        let result = if refused {
            Err(anyhow!(RateLimited { message: "Max rate limit reached".to_string() }))
        } else if time < GENESIS {
            Err(anyhow!("no blocks before genesis"))
        } else {
            Ok(Self::block_at(time))
        };
        futures::future::ready(result).boxed()
    }
}


pub struct MemorySource {
    pub gas: Vec<RawSeriesRow>,
    pub hashrate: Vec<RawSeriesRow>
}


impl RawDataSource for MemorySource {
    fn load_series(&self, kind: SeriesKind) -> anyhow::Result<Vec<RawSeriesRow>> {
        Ok(match kind {
            SeriesKind::GasUsed => self.gas.clone(),
            SeriesKind::NetworkHash => self.hashrate.clone()
        })
    }
}


#[derive(Default)]
pub struct MemorySink {
    pub records: Mutex<Option<Vec<EmissionRecord>>>
}


impl ResultSink for MemorySink {
    fn persist(&self, records: &[EmissionRecord]) -> anyhow::Result<()> {
        *self.records.lock() = Some(records.to_vec());
        Ok(())
    }
}
