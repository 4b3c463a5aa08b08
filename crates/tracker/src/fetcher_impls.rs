use anyhow::Result;
use common::http::classify_api_error;
use common::okx::OkxTickerClient;
use common::types::{BalancesResponse, Page, TransferItem, TxnItem};
use common::voyager::VoyagerClient;
use rust_decimal::Decimal;
use std::future::Future;
use std::time::Instant;

use crate::fetcher_traits::*;

/// Record latency, request and error counters for one upstream call.
async fn observed<T>(endpoint: &'static str, call: impl Future<Output = Result<T>>) -> Result<T> {
    let start = Instant::now();
    let res = call.await;
    let ms = start.elapsed().as_secs_f64() * 1000.0;
    metrics::histogram!("tracker_api_latency_ms", "endpoint" => endpoint).record(ms);
    match &res {
        Ok(_) => {
            metrics::counter!("tracker_api_requests_total", "endpoint" => endpoint, "status" => "ok")
                .increment(1);
        }
        Err(e) => {
            metrics::counter!("tracker_api_requests_total", "endpoint" => endpoint, "status" => "error")
                .increment(1);
            metrics::counter!(
                "tracker_api_errors_total",
                "endpoint" => endpoint,
                "kind" => classify_api_error(e).as_str()
            )
            .increment(1);
        }
    }
    res
}

impl TxnsPager for VoyagerClient {
    async fn fetch_txns_page(&self, address: &str, page: u32) -> Result<Page<TxnItem>> {
        observed("txns", self.fetch_txns_raw(address, page)).await
    }
}

impl TransfersPager for VoyagerClient {
    async fn fetch_transfers_page(&self, address: &str, page: u32) -> Result<Page<TransferItem>> {
        observed("transfers", self.fetch_transfers_raw(address, page)).await
    }
}

impl BalancesFetcher for VoyagerClient {
    async fn fetch_balances(&self, address: &str) -> Result<BalancesResponse> {
        observed("balances", self.fetch_balances_raw(address)).await
    }
}

impl SpotPriceFetcher for OkxTickerClient {
    async fn fetch_spot_price(&self) -> Result<Decimal> {
        observed("spot_price", self.fetch_last_price_raw()).await
    }
}
