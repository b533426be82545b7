use crate::aggregate::aggregate;
use crate::index::{BlockResolution, DayResolution, IndexMode, IndexingStrategy};
use crate::{EmissionConstants, EmptySeries, IndexSettings, InvalidResolution, SeriesMismatch};
use anyhow::Context;
use efx_chain_client::{with_retries, BlockExplorerLookup, ChainTimeLookup};
use efx_data_source::{RawDataSource, ResultSink};
use efx_primitives::{EmissionRecord, RawSeriesRow, SeriesKind};
use tracing::{info, warn};


/// Index mode and resolution of a single run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RunParams {
    pub mode: IndexMode,
    /// Blocks per index step in block mode, days per index step in day mode
    pub resolution: u64
}


impl RunParams {
    pub fn new(mode: IndexMode, resolution: u64) -> anyhow::Result<Self> {
        if resolution == 0 {
            return Err(InvalidResolution.into())
        }
        if mode == IndexMode::Day && usize::try_from(resolution).is_err() {
            return Err(InvalidResolution.into())
        }
        Ok(Self {
            mode,
            resolution
        })
    }

    pub fn parse(mode: &str, resolution: u64) -> anyhow::Result<Self> {
        let mode: IndexMode = mode.parse()?;
        Self::new(mode, resolution)
    }

    /// Rows per index step in day mode.
    pub fn day_step(&self) -> anyhow::Result<usize> {
        usize::try_from(self.resolution).map_err(|_| InvalidResolution.into())
    }
}


#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineSettings {
    pub constants: EmissionConstants,
    pub indexing: IndexSettings
}


/// Batch job producing the emission factor table.
pub struct Pipeline<S, K, C, E> {
    source: S,
    sink: K,
    chain: C,
    explorer: E,
    settings: PipelineSettings
}


impl<S, K, C, E> Pipeline<S, K, C, E>
where
    S: RawDataSource,
    K: ResultSink,
    C: ChainTimeLookup,
    E: BlockExplorerLookup
{
    pub fn new(source: S, sink: K, chain: C, explorer: E) -> Self {
        Self {
            source,
            sink,
            chain,
            explorer,
            settings: PipelineSettings::default()
        }
    }

    pub fn with_settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Runs the whole job and returns the persisted records.
    ///
    /// Nothing is persisted unless every step succeeds.
    pub async fn run(&self, params: &RunParams) -> anyhow::Result<Vec<EmissionRecord>> {
        info!(mode = %params.mode, resolution = params.resolution, "generating new emissions data");

        let (gas, hashrate) = self.load_series()?;

        let latest_block = with_retries(&self.settings.indexing.chain_retry, "current height", || {
            self.chain.current_height()
        }).await.context("failed to fetch the current block number")?;

        info!(latest_block, "fetched current chain height");

        let strategy = self.strategy(params)?;
        let points = strategy.build(&gas, latest_block)
            .await
            .with_context(|| format!("failed to build the {} index", params.mode))?;

        info!(points = points.len(), "index built");

        let records = aggregate(&points, &gas, &hashrate, &self.settings.constants)?;
        if records.is_empty() {
            warn!("index has a single point, the emission table will be empty");
        }

        self.sink.persist(&records).context("failed to persist the emission table")?;

        Ok(records)
    }

    fn load_series(&self) -> anyhow::Result<(Vec<RawSeriesRow>, Vec<RawSeriesRow>)> {
        let gas = self.source.load_series(SeriesKind::GasUsed)
            .context("failed to load gas used data")?;

        let hashrate = self.source.load_series(SeriesKind::NetworkHash)
            .context("failed to load network hashrate data")?;

        if gas.is_empty() {
            return Err(EmptySeries { kind: SeriesKind::GasUsed }.into())
        }

        if gas.len() != hashrate.len() {
            return Err(SeriesMismatch {
                gas_rows: gas.len(),
                hashrate_rows: hashrate.len()
            }.into())
        }

        Ok((gas, hashrate))
    }

    fn strategy(&self, params: &RunParams) -> anyhow::Result<Box<dyn IndexingStrategy + '_>> {
        let indexing = &self.settings.indexing;
        let strategy: Box<dyn IndexingStrategy + '_> = match params.mode {
            IndexMode::Block => Box::new(
                BlockResolution::new(&self.chain, params.resolution)?
                    .with_retry_policy(indexing.chain_retry.clone())
                    .with_concurrency(indexing.lookup_concurrency)
            ),
            IndexMode::Day => Box::new(
                DayResolution::new(&self.explorer, params.day_step()?)?
                    .with_genesis_floor(indexing.genesis_floor)
                    .with_retry_policy(indexing.explorer_retry.clone())
                    .with_concurrency(indexing.lookup_concurrency)
            )
        };
        Ok(strategy)
    }
}
