use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use common::config::Display;
use futures::future::try_join_all;
use rust_decimal::Decimal;
use tracing::info;

use crate::activity::{fetch_activity, format_age, ActivityStats};
use crate::balances::{fetch_balances, BalanceSnapshot};
use crate::context::RunContext;
use crate::fetcher_traits::{BalancesFetcher, TransfersPager, TxnsPager};
use crate::tier::{tier, Banded, Tier};
use crate::transfers::{fetch_transfers_and_contracts, TransferStats};
use crate::wallets::{View, WalletRef};

/// Decimal places for balances and fees.
pub const AMOUNT_DP: u32 = 5;
/// Decimal places for USD volume.
pub const VALUE_DP: u32 = 2;

pub const BASE_COLUMNS: [&str; 12] = [
    "#", "eth", "usdc", "usdt", "dai", "tx", "last tx", "day", "week", "mon", "volume", "fee",
];

/// Raw aggregates for one wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletReport {
    pub wallet: WalletRef,
    pub activity: ActivityStats,
    pub transfers: TransferStats,
    pub balances: BalanceSnapshot,
}

/// One table row, in [`BASE_COLUMNS`] order followed by the task columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub label: String,
    pub eth: Banded<Decimal>,
    pub usdc: Decimal,
    pub usdt: Decimal,
    pub dai: Decimal,
    pub invoke_tx_count: Banded<u64>,
    pub last_tx: Banded<String>,
    pub days: u64,
    pub weeks: u64,
    pub months: Banded<u64>,
    pub outgoing_value: Banded<Decimal>,
    pub fees: Decimal,
    pub interactions: Vec<u64>,
}

/// Grand total across every wallet; the other columns stay blank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TotalRow {
    pub eth: Decimal,
    pub usdc: Decimal,
    pub fees: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub task_labels: Vec<String>,
    pub rows: Vec<ReportRow>,
    pub total: Option<TotalRow>,
}

impl Report {
    pub fn columns(&self) -> Vec<String> {
        BASE_COLUMNS
            .iter()
            .map(|c| (*c).to_string())
            .chain(self.task_labels.iter().cloned())
            .collect()
    }
}

pub fn build_row(report: &WalletReport, display: &Display, view: View) -> ReportRow {
    let WalletReport {
        wallet,
        activity,
        transfers,
        balances,
    } = report;

    let low_native = match view {
        View::All => display.low_native_all,
        View::Single => display.low_native_single,
    };

    let last_tx = match activity.last_tx_age {
        Some(age) => Banded::new(
            format_age(age),
            Tier::flagged_if(age.num_days() > display.stale_after_days),
        ),
        None => Banded::new("-".to_string(), Tier::Flagged),
    };

    ReportRow {
        label: wallet.label(),
        eth: Banded::new(balances.eth, Tier::flagged_if(balances.eth <= low_native)),
        usdc: balances.usdc,
        usdt: balances.usdt,
        dai: balances.dai,
        invoke_tx_count: Banded::new(
            activity.invoke_tx_count,
            tier(activity.invoke_tx_count, &display.tx),
        ),
        last_tx,
        days: activity.distinct_days,
        weeks: activity.distinct_weeks,
        months: Banded::new(
            activity.distinct_months,
            tier(activity.distinct_months, &display.months),
        ),
        outgoing_value: Banded::new(
            transfers.total_outgoing_value,
            tier(transfers.total_outgoing_value, &display.volume),
        ),
        fees: activity.total_fees,
        interactions: transfers.interactions.clone(),
    }
}

pub fn grand_total(reports: &[WalletReport]) -> TotalRow {
    let sum = reports.iter().fold(TotalRow::default(), |acc, r| TotalRow {
        eth: acc.eth + r.balances.eth,
        usdc: acc.usdc + r.balances.usdc,
        fees: acc.fees + r.activity.total_fees,
    });
    TotalRow {
        eth: sum.eth.round_dp(AMOUNT_DP),
        usdc: sum.usdc.round_dp(AMOUNT_DP),
        fees: sum.fees.round_dp(AMOUNT_DP),
    }
}

/// Run the three aggregators for one wallet, in order. Activity and transfer
/// failures propagate; balances never fail.
pub async fn collect_wallet<A>(
    api: &A,
    ctx: &RunContext,
    wallet: WalletRef,
) -> Result<WalletReport>
where
    A: TxnsPager + TransfersPager + BalancesFetcher + Sync,
{
    let label = wallet.label();
    let activity = fetch_activity(api, &wallet.address, ctx.now)
        .await
        .with_context(|| format!("{label}: activity"))?;
    let transfers = fetch_transfers_and_contracts(api, &wallet.address, ctx)
        .await
        .with_context(|| format!("{label}: transfers"))?;
    let balances = fetch_balances(api, &wallet.address).await;
    info!(wallet = %label, "wallet aggregated");
    metrics::counter!("tracker_wallets_aggregated_total").increment(1);

    Ok(WalletReport {
        wallet,
        activity,
        transfers,
        balances,
    })
}

/// One concurrent task per wallet; the first unrecovered error fails the batch.
pub async fn collect_reports<A>(
    api: &A,
    ctx: &RunContext,
    wallets: Vec<WalletRef>,
) -> Result<Vec<WalletReport>>
where
    A: TxnsPager + TransfersPager + BalancesFetcher + Sync,
{
    try_join_all(wallets.into_iter().map(|w| collect_wallet(api, ctx, w))).await
}

pub fn build_report(ctx: &RunContext, view: View, reports: &[WalletReport]) -> Report {
    let rows = reports
        .iter()
        .map(|r| build_row(r, &ctx.display, view))
        .collect();
    let total = match view {
        View::All => Some(grand_total(reports)),
        View::Single => None,
    };
    Report {
        generated_at: ctx.now,
        task_labels: ctx.registry.labels().to_vec(),
        rows,
        total,
    }
}
