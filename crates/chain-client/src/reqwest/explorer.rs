use super::client::{default_http_client, response_error};
use crate::{BlockExplorerLookup, RateLimited};
use anyhow::{anyhow, Context};
use efx_primitives::{BlockNumber, UnixTime};
use futures::future::BoxFuture;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use std::fmt::{Debug, Formatter};
use tracing::{debug, instrument};


/// Client of an Etherscan compatible `getblocknobytime` endpoint.
#[derive(Clone)]
pub struct ExplorerClient {
    http: Client,
    url: Url,
    api_key: Option<String>
}


impl Debug for ExplorerClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerClient")
            .field("url", &self.url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}


#[derive(Deserialize)]
struct ExplorerResponse {
    status: String,
    #[serde(default)]
    message: String,
    result: Value
}


impl ExplorerClient {
    pub fn from_url(url: Url, api_key: Option<String>) -> anyhow::Result<Self> {
        let http = default_http_client()?;
        Ok(Self::new(http, url, api_key))
    }

    pub fn new(http: Client, url: Url, api_key: Option<String>) -> Self {
        Self {
            http,
            url,
            api_key
        }
    }

    fn lookup_url(&self, time: UnixTime) -> Url {
        let mut url = self.url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("module", "block")
                .append_pair("action", "getblocknobytime")
                .append_pair("timestamp", &time.to_string())
                .append_pair("closest", "before");
            if let Some(key) = self.api_key.as_ref() {
                query.append_pair("apikey", key);
            }
        }
        url
    }

    #[instrument(level = "debug", skip(self), ret, err(Debug))]
    pub async fn get_block_number_by_time(&self, time: UnixTime) -> anyhow::Result<BlockNumber> {
        debug!("send explorer request");

        let res = self.http.get(self.lookup_url(time)).send().await?;

        if !res.status().is_success() {
            return Err(response_error(res).await)
        }

        let res: ExplorerResponse = res.json()
            .await
            .context("failed to decode explorer response")?;

        parse_block_number(res)
    }
}


fn parse_block_number(res: ExplorerResponse) -> anyhow::Result<BlockNumber> {
    if res.status == "0" {
        let detail = match &res.result {
            Value::String(s) => s.clone(),
            other => other.to_string()
        };
        return Err(anyhow!(RateLimited {
            message: format!("{}: {}", res.message, detail)
        }))
    }

    match &res.result {
        Value::String(s) => s.parse().with_context(|| {
            format!("explorer returned a non-numeric block number '{}'", s)
        }),
        Value::Number(n) => n.as_u64().ok_or_else(|| {
            anyhow!("explorer returned an invalid block number {}", n)
        }),
        other => Err(anyhow!("unexpected explorer result: {}", other))
    }
}


impl BlockExplorerLookup for ExplorerClient {
    fn block_at_or_before(&self, time: UnixTime) -> BoxFuture<'_, anyhow::Result<BlockNumber>> {
        Box::pin(self.get_block_number_by_time(time))
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> ExplorerResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn parses_block_number() {
        let res = response(json!({"status": "1", "message": "OK", "result": "12379"}));
        assert_eq!(parse_block_number(res).unwrap(), 12379);
    }

    #[test]
    fn zero_status_is_rate_limit() {
        let res = response(json!({
            "status": "0",
            "message": "NOTOK",
            "result": "Max rate limit reached"
        }));
        let err = parse_block_number(res).unwrap_err();
        assert!(err.is::<RateLimited>());
    }

    #[test]
    fn garbage_result_is_permanent() {
        let res = response(json!({"status": "1", "message": "OK", "result": "soon"}));
        let err = parse_block_number(res).unwrap_err();
        assert!(!err.is::<RateLimited>());
    }

    #[test]
    fn lookup_url_carries_query() {
        let client = ExplorerClient::new(
            Client::new(),
            Url::parse("https://api.etherscan.io/api").unwrap(),
            Some("KEY".to_string())
        );
        assert_eq!(
            client.lookup_url(1438270000).as_str(),
            "https://api.etherscan.io/api?module=block&action=getblocknobytime&timestamp=1438270000&closest=before&apikey=KEY"
        );
    }
}
