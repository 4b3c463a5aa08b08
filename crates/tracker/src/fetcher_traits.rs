use anyhow::Result;
use common::types::{BalancesResponse, Page, TransferItem, TxnItem};
use rust_decimal::Decimal;

pub trait TxnsPager {
    fn fetch_txns_page(
        &self,
        address: &str,
        page: u32,
    ) -> impl std::future::Future<Output = Result<Page<TxnItem>>> + Send;
}

pub trait TransfersPager {
    fn fetch_transfers_page(
        &self,
        address: &str,
        page: u32,
    ) -> impl std::future::Future<Output = Result<Page<TransferItem>>> + Send;
}

pub trait BalancesFetcher {
    fn fetch_balances(
        &self,
        address: &str,
    ) -> impl std::future::Future<Output = Result<BalancesResponse>> + Send;
}

pub trait SpotPriceFetcher {
    fn fetch_spot_price(&self) -> impl std::future::Future<Output = Result<Decimal>> + Send;
}
