mod cli;
mod config;


use anyhow::Context;
use clap::Parser;
use cli::Cli;
use config::Config;
use efx_chain_client::reqwest::{default_http_client, ExplorerClient, RpcChainClient};
use efx_data_source::{CsvDirectory, JsonFileSink};
use efx_emissions::index::IndexMode;
use efx_emissions::pipeline::{Pipeline, PipelineSettings, RunParams};
use tracing::{info, warn};


fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    init_tracing();

    let params = RunParams::new(args.mode, args.resolution)?;

    let config = match args.config.as_ref() {
        Some(file) => Config::read(file).with_context(|| {
            format!("failed to read config from '{}'", file.display())
        })?,
        None => Config::default()
    };

    let settings = args.pipeline_settings(config);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(args, params, settings))
}


async fn run(args: Cli, params: RunParams, settings: PipelineSettings) -> anyhow::Result<()> {
    let http = default_http_client()?;

    let chain = RpcChainClient::new(http.clone(), args.rpc_url.clone());

    if params.mode == IndexMode::Day && args.explorer_api_key.is_none() {
        warn!("no explorer API key given, expect rate limited lookups");
    }

    let explorer = ExplorerClient::new(
        http,
        args.explorer_url.clone(),
        args.explorer_api_key.clone()
    );

    let pipeline = Pipeline::new(
        CsvDirectory::new(&args.data_dir),
        JsonFileSink::new(&args.output),
        chain,
        explorer
    ).with_settings(settings);

    let records = pipeline.run(&params).await?;

    info!(records = records.len(), output = %args.output.display(), "emission table generated");
    Ok(())
}


fn init_tracing() {
    use std::io::IsTerminal;

    let env_filter = tracing_subscriber::EnvFilter::builder().parse_lossy(
        std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV)
            .unwrap_or("info".to_string()),
    );

    if std::io::stderr().is_terminal() {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(false)
            .init();
    }
}
