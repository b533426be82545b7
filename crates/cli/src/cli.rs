use crate::config::Config;
use clap::Parser;
use efx_emissions::index::IndexMode;
use efx_emissions::pipeline::PipelineSettings;
use std::path::PathBuf;
use url::Url;


#[derive(Parser, Debug)]
#[command(version, about = "Generates the gas emission factor table", long_about = None)]
pub struct Cli {
    /// How to place index points: every N-th block ("block") or every N-th day ("day")
    #[arg(long, default_value = "block")]
    pub mode: IndexMode,

    /// Index step, in blocks or days depending on the mode
    #[arg(long, default_value = "100000")]
    pub resolution: u64,

    /// Directory with the GasUsed-*.csv and NetworkHash-*.csv daily exports
    #[arg(long, value_name = "DIR", default_value = "src/data")]
    pub data_dir: PathBuf,

    /// Where to save the emission factor table
    #[arg(short, long, value_name = "FILE", default_value = "src/data/emissionFactorTable.json")]
    pub output: PathBuf,

    /// Ethereum JSON-RPC endpoint
    #[arg(long, env = "ETH_RPC_URL")]
    pub rpc_url: Url,

    /// Block explorer API endpoint
    #[arg(long, default_value = "https://api.etherscan.io/api")]
    pub explorer_url: Url,

    #[arg(long, env = "ETHERSCAN_API_KEY", hide_env_values = true)]
    pub explorer_api_key: Option<String>,

    /// JSON file with physical constants and lookup settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Max number of remote lookups in flight, overrides the config file
    #[arg(long)]
    pub lookup_concurrency: Option<usize>
}


impl Cli {
    pub fn pipeline_settings(&self, config: Config) -> PipelineSettings {
        let mut settings = PipelineSettings {
            constants: config.constants,
            indexing: config.indexing
        };
        if let Some(n) = self.lookup_concurrency {
            settings.indexing.lookup_concurrency = n;
        }
        settings
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_match_the_classic_run() {
        let cli = Cli::try_parse_from(["efx", "--rpc-url", "http://localhost:8545"]).unwrap();
        assert_eq!(cli.mode, IndexMode::Block);
        assert_eq!(cli.resolution, 100_000);
        assert_eq!(cli.output, PathBuf::from("src/data/emissionFactorTable.json"));
    }

    #[test]
    fn unknown_mode_fails_at_startup() {
        let result = Cli::try_parse_from([
            "efx", "--rpc-url", "http://localhost:8545", "--mode", "week"
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn concurrency_flag_overrides_config() {
        let cli = Cli::try_parse_from([
            "efx", "--rpc-url", "http://localhost:8545", "--mode", "day", "--resolution", "30",
            "--lookup-concurrency", "4"
        ]).unwrap();
        let settings = cli.pipeline_settings(Config::default());
        assert_eq!(cli.mode, IndexMode::Day);
        assert_eq!(settings.indexing.lookup_concurrency, 4);
    }
}
