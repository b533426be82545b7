use super::{row_in_effect, IndexingStrategy};
use crate::{EmptySeries, InvalidResolution};
use anyhow::Context;
use efx_chain_client::{with_retries, ChainTimeLookup, RetryPolicy};
use efx_primitives::{BlockNumber, IndexPoint, RawSeriesRow, SeriesKind};
use futures::future::BoxFuture;
use futures::{StreamExt, TryStreamExt};
use tracing::{debug, info};


/// Samples blocks `0, step, 2 * step, ...` below the latest block
/// and looks up the dataset row in effect at each sampled block's time.
pub struct BlockResolution<C> {
    chain: C,
    step: BlockNumber,
    retry: RetryPolicy,
    concurrency: usize
}


impl<C: ChainTimeLookup> BlockResolution<C> {
    pub fn new(chain: C, step: BlockNumber) -> anyhow::Result<Self> {
        if step == 0 {
            return Err(InvalidResolution.into())
        }
        Ok(Self {
            chain,
            step,
            retry: RetryPolicy::no_retries(),
            concurrency: 1
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = std::cmp::max(concurrency, 1);
        self
    }

    pub fn sampled_blocks(&self, latest_block: BlockNumber) -> impl Iterator<Item = BlockNumber> {
        let step = self.step;
        std::iter::successors(Some(0), move |b: &BlockNumber| b.checked_add(step))
            .take_while(move |b| *b < latest_block)
    }

    async fn sample(&self, series: &[RawSeriesRow], block: BlockNumber) -> anyhow::Result<IndexPoint> {
        let time = with_retries(&self.retry, "block timestamp", || {
            self.chain.block_timestamp(block)
        }).await.with_context(|| {
            format!("failed to fetch the timestamp of block {}", block)
        })?;

        let row_index = row_in_effect(series, time);
        if row_index + 1 == series.len() && time > series[row_index].unix_timestamp {
            debug!(block, time, "block postdates the dataset, using its last row");
        }

        Ok(IndexPoint {
            row_index,
            unix_time: time,
            block_number: block
        })
    }

    async fn build_index(
        &self,
        series: &[RawSeriesRow],
        latest_block: BlockNumber
    ) -> anyhow::Result<Vec<IndexPoint>> {
        let last = series.last().ok_or(EmptySeries {
            kind: SeriesKind::GasUsed
        })?;

        info!(
            step = self.step,
            latest_block,
            "generating index array using block resolution"
        );

        let mut points: Vec<IndexPoint> = futures::stream::iter(self.sampled_blocks(latest_block))
            .map(|block| self.sample(series, block))
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        points.push(IndexPoint {
            row_index: series.len() - 1,
            unix_time: last.unix_timestamp,
            block_number: latest_block
        });

        Ok(points)
    }
}


impl<C: ChainTimeLookup> IndexingStrategy for BlockResolution<C> {
    fn build<'a>(
        &'a self,
        series: &'a [RawSeriesRow],
        latest_block: BlockNumber
    ) -> BoxFuture<'a, anyhow::Result<Vec<IndexPoint>>> {
        Box::pin(self.build_index(series, latest_block))
    }
}
