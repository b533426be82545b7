use crate::RateLimited;
use anyhow::anyhow;
use reqwest::{Client, Response};
use std::time::Duration;


pub fn default_http_client() -> anyhow::Result<Client> {
    let client = Client::builder()
        .read_timeout(Duration::from_secs(20))
        .connect_timeout(Duration::from_secs(20))
        .gzip(true)
        .build()?;
    Ok(client)
}


/// Turns a non-success response into an error,
/// marking statuses a remote service uses for temporary refusals as [RateLimited].
pub(crate) async fn response_error(response: Response) -> anyhow::Error {
    let status = response.status().as_u16();
    let message = match response.text().await.ok() {
        Some(text) => format!("got HTTP {}: {}", status, text),
        None => format!("got HTTP {}", status)
    };
    if is_transient_status(status) {
        anyhow!(RateLimited { message })
    } else {
        anyhow!(message)
    }
}


pub(crate) fn is_transient_status(status: u16) -> bool {
    matches!(status, 429 | 502 | 503 | 504 | 524)
}


/// Parses a `0x`-prefixed hex quantity.
pub(crate) fn parse_quantity(s: &str) -> anyhow::Result<u64> {
    let digits = s.strip_prefix("0x")
        .ok_or_else(|| anyhow!("quantity '{}' is missing the 0x prefix", s))?;
    u64::from_str_radix(digits, 16).map_err(|err| {
        anyhow!("invalid hex quantity '{}': {}", s, err)
    })
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hex_quantities() {
        assert_eq!(parse_quantity("0x0").unwrap(), 0);
        assert_eq!(parse_quantity("0x55ba467c").unwrap(), 1438271100);
        assert_eq!(parse_quantity("0x1000000").unwrap(), 16_777_216);
        assert!(parse_quantity("1000").is_err());
        assert!(parse_quantity("0xzz").is_err());
    }

    #[test]
    fn transient_statuses() {
        assert!(is_transient_status(429));
        assert!(is_transient_status(503));
        assert!(!is_transient_status(400));
        assert!(!is_transient_status(404));
    }
}
