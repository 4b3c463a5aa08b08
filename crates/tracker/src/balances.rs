use anyhow::Result;
use common::types::{balance_amount, BalancesResponse};
use rust_decimal::Decimal;
use tracing::warn;

use crate::fetcher_traits::BalancesFetcher;
use crate::report::AMOUNT_DP;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub eth: Decimal,
    pub usdc: Decimal,
    pub usdt: Decimal,
    pub dai: Decimal,
}

impl BalanceSnapshot {
    fn from_response(resp: &BalancesResponse) -> Result<Self> {
        let amount = |slug: &str| -> Result<Decimal> {
            Ok(balance_amount(resp, slug)?
                .unwrap_or_default()
                .round_dp(AMOUNT_DP))
        };
        Ok(Self {
            eth: amount("ethereum")?,
            usdc: amount("usd-coin")?,
            usdt: amount("tether")?,
            dai: amount("dai")?,
        })
    }
}

/// Current balances. Never fails: a missing asset is zero, and any error
/// zeroes the whole snapshot.
#[tracing::instrument(skip_all, fields(address = %address))]
pub async fn fetch_balances<F: BalancesFetcher + Sync>(
    fetcher: &F,
    address: &str,
) -> BalanceSnapshot {
    let snapshot = fetcher
        .fetch_balances(address)
        .await
        .and_then(|resp| BalanceSnapshot::from_response(&resp));
    snapshot.unwrap_or_else(|e| {
        warn!(error = %format!("{e:#}"), "balances unavailable, using zero snapshot");
        BalanceSnapshot::default()
    })
}
