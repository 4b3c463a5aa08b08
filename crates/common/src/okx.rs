use crate::http::get_json;
use crate::types::{parse_decimal, TickerResponse};
use anyhow::{Context, Result};
use reqwest::Url;
use rust_decimal::Decimal;

/// Spot price from an OKX market ticker URL, e.g.
/// `https://www.okx.com/api/v5/market/ticker?instId=ETH-USD-SWAP`.
pub struct OkxTickerClient {
    url: Url,
    client: reqwest::Client,
}

impl OkxTickerClient {
    pub fn new(client: reqwest::Client, url: &str) -> Result<Self> {
        let url = Url::parse(url).with_context(|| format!("invalid ticker url: {url}"))?;
        Ok(Self { url, client })
    }

    pub async fn fetch_last_price_raw(&self) -> Result<Decimal> {
        let resp: TickerResponse = get_json(&self.client, self.url.clone()).await?;
        if let Some(code) = resp.code.as_deref() {
            anyhow::ensure!(code == "0", "ticker returned error code {code}");
        }
        let ticker = resp.data.first().context("ticker response has no data")?;
        let price = parse_decimal(&ticker.last)?;
        anyhow::ensure!(price > Decimal::ZERO, "ticker price must be positive, got {price}");
        Ok(price)
    }
}
