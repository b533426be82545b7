use super::client::{default_http_client, parse_quantity, response_error};
use crate::{BlockNotFound, ChainTimeLookup, RpcError};
use anyhow::Context;
use efx_primitives::{BlockNumber, UnixTime};
use futures::future::BoxFuture;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument};


/// Ethereum JSON-RPC client answering block timestamp and chain height queries.
pub struct RpcChainClient {
    http: Client,
    url: Url,
    request_id: AtomicU64
}


impl Debug for RpcChainClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcChainClient")
            .field("url", &self.url.as_str())
            .finish()
    }
}


#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>
}


#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String
}


#[derive(Deserialize)]
struct BlockHeader {
    timestamp: String
}


impl RpcChainClient {
    pub fn from_url(url: Url) -> anyhow::Result<Self> {
        let http = default_http_client()?;
        Ok(Self::new(http, url))
    }

    pub fn new(http: Client, url: Url) -> Self {
        Self {
            http,
            url,
            request_id: AtomicU64::new(1)
        }
    }

    #[instrument(level = "debug", skip(self), ret, err(Debug))]
    pub async fn get_block_timestamp(&self, block: BlockNumber) -> anyhow::Result<UnixTime> {
        let header: Option<BlockHeader> = self.call(
            "eth_getBlockByNumber",
            json!([format!("0x{:x}", block), false])
        ).await?;

        let header = header.ok_or(BlockNotFound { block })?;

        let timestamp = parse_quantity(&header.timestamp)
            .with_context(|| format!("block {} has an invalid timestamp", block))?;

        UnixTime::try_from(timestamp)
            .with_context(|| format!("block {} timestamp is out of range", block))
    }

    #[instrument(level = "debug", skip(self), ret, err(Debug))]
    pub async fn get_block_number(&self) -> anyhow::Result<BlockNumber> {
        let height: Option<String> = self.call("eth_blockNumber", json!([])).await?;
        let height = height.context("eth_blockNumber returned no result")?;
        parse_quantity(&height).context("invalid eth_blockNumber result")
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> anyhow::Result<Option<T>> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": self.request_id.fetch_add(1, Ordering::Relaxed),
            "method": method,
            "params": params
        });

        debug!(method, "send rpc request");

        let res = self.http
            .post(self.url.clone())
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(response_error(res).await)
        }

        let res: RpcResponse<T> = res.json()
            .await
            .with_context(|| format!("failed to decode {} response", method))?;

        if let Some(err) = res.error {
            return Err(RpcError {
                code: err.code,
                message: err.message
            }.into())
        }

        Ok(res.result)
    }
}


impl ChainTimeLookup for RpcChainClient {
    fn block_timestamp(&self, block: BlockNumber) -> BoxFuture<'_, anyhow::Result<UnixTime>> {
        Box::pin(self.get_block_timestamp(block))
    }

    fn current_height(&self) -> BoxFuture<'_, anyhow::Result<BlockNumber>> {
        Box::pin(self.get_block_number())
    }
}
