use anyhow::{ensure, Context};
use efx_chain_client::RetryPolicy;
use efx_primitives::UnixTime;
use serde::{Deserialize, Serialize};


/// Physical assumptions behind the gas to emissions conversion.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct EmissionConstants {
    /// Share of the network hashrate doing useful work
    pub hash_efficiency: f64,
    pub seconds_in_day: f64,
    pub kwh_per_terahash: f64,
    /// Emissions per kWh, a rough average across mining regions
    pub emissions_per_kwh: f64
}


impl Default for EmissionConstants {
    fn default() -> Self {
        Self {
            hash_efficiency: 0.4,
            seconds_in_day: 86400.0,
            kwh_per_terahash: 0.00002,
            emissions_per_kwh: 325.0
        }
    }
}


impl EmissionConstants {
    pub fn emissions_per_terahash(&self) -> f64 {
        self.kwh_per_terahash * self.emissions_per_kwh
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.hash_efficiency > 0.0, "hash efficiency must be positive");
        ensure!(self.seconds_in_day > 0.0, "seconds in day must be positive");
        ensure!(self.kwh_per_terahash >= 0.0, "kWh per terahash can't be negative");
        ensure!(self.emissions_per_kwh >= 0.0, "emissions per kWh can't be negative");
        Ok(())
    }
}


/// Timestamp of the first mainnet blocks.
/// Explorer lookups for earlier moments are clamped to it.
pub const MAINNET_GENESIS_FLOOR: UnixTime = 1438270000;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct IndexSettings {
    pub genesis_floor: UnixTime,
    pub explorer_retry: RetryPolicy,
    pub chain_retry: RetryPolicy,
    /// Max number of remote lookups in flight while building an index
    pub lookup_concurrency: usize
}


impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            genesis_floor: MAINNET_GENESIS_FLOOR,
            explorer_retry: RetryPolicy::retry_once(),
            chain_retry: RetryPolicy::no_retries(),
            lookup_concurrency: 1
        }
    }
}


impl IndexSettings {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.lookup_concurrency > 0, "lookup concurrency must be at least 1");
        validate_retry(&self.explorer_retry).context("invalid explorer retry policy")?;
        validate_retry(&self.chain_retry).context("invalid chain retry policy")?;
        Ok(())
    }
}


fn validate_retry(policy: &RetryPolicy) -> anyhow::Result<()> {
    ensure!(policy.max_attempts > 0, "max attempts must be at least 1");
    Ok(())
}
