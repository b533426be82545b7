use super::IndexingStrategy;
use crate::{EmptySeries, InvalidResolution, MAINNET_GENESIS_FLOOR};
use anyhow::Context;
use efx_chain_client::{with_retries, BlockExplorerLookup, RetryPolicy};
use efx_primitives::{BlockNumber, IndexPoint, RawSeriesRow, RowIndex, SeriesKind, UnixTime};
use futures::future::BoxFuture;
use futures::{StreamExt, TryStreamExt};
use tracing::info;


/// Samples every `step`-th row of the dataset and asks a block explorer
/// which block was the latest one at the start of that day.
pub struct DayResolution<E> {
    explorer: E,
    step: usize,
    genesis_floor: UnixTime,
    retry: RetryPolicy,
    concurrency: usize
}


impl<E: BlockExplorerLookup> DayResolution<E> {
    pub fn new(explorer: E, step: usize) -> anyhow::Result<Self> {
        if step == 0 {
            return Err(InvalidResolution.into())
        }
        Ok(Self {
            explorer,
            step,
            genesis_floor: MAINNET_GENESIS_FLOOR,
            retry: RetryPolicy::retry_once(),
            concurrency: 1
        })
    }

    pub fn with_genesis_floor(mut self, genesis_floor: UnixTime) -> Self {
        self.genesis_floor = genesis_floor;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = std::cmp::max(concurrency, 1);
        self
    }

    async fn lookup(&self, time: UnixTime) -> anyhow::Result<BlockNumber> {
        with_retries(&self.retry, "block number by time", || {
            self.explorer.block_at_or_before(time)
        }).await.with_context(|| {
            format!("failed to find the block mined at or before {}", time)
        })
    }

    async fn sample(&self, row_index: RowIndex, row: &RawSeriesRow) -> anyhow::Result<IndexPoint> {
        // the explorer knows nothing about days before the chain existed
        let time = std::cmp::max(row.unix_timestamp, self.genesis_floor);
        let block_number = self.lookup(time).await?;
        Ok(IndexPoint {
            row_index,
            unix_time: row.unix_timestamp,
            block_number
        })
    }

    async fn build_index(&self, series: &[RawSeriesRow]) -> anyhow::Result<Vec<IndexPoint>> {
        let last = series.last().ok_or(EmptySeries {
            kind: SeriesKind::GasUsed
        })?;

        info!(
            step = self.step,
            rows = series.len(),
            "generating index array using day resolution"
        );

        let sampled = (0..series.len()).step_by(self.step);

        let mut points: Vec<IndexPoint> = futures::stream::iter(sampled)
            .map(|i| self.sample(i, &series[i]))
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let final_block = self.lookup(last.unix_timestamp).await?;

        points.push(IndexPoint {
            row_index: series.len() - 1,
            unix_time: last.unix_timestamp,
            block_number: final_block
        });

        Ok(points)
    }
}


impl<E: BlockExplorerLookup> IndexingStrategy for DayResolution<E> {
    fn build<'a>(
        &'a self,
        series: &'a [RawSeriesRow],
        _latest_block: BlockNumber
    ) -> BoxFuture<'a, anyhow::Result<Vec<IndexPoint>>> {
        Box::pin(self.build_index(series))
    }
}
