use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use common::types::{wei_to_ether, TxnItem};
use rust_decimal::Decimal;
use tracing::debug;

use crate::fetcher_traits::TxnsPager;
use crate::report::AMOUNT_DP;

const INVOKE: &str = "INVOKE";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityStats {
    pub distinct_days: u64,
    pub distinct_weeks: u64,
    pub distinct_months: u64,
    /// Sum of `actual_fee`, in ether, rounded to [`AMOUNT_DP`] places.
    pub total_fees: Decimal,
    /// Age of the first transaction on page 1. `None` when the wallet has none.
    pub last_tx_age: Option<TimeDelta>,
    pub invoke_tx_count: u64,
}

#[derive(Default)]
struct ActivityAccumulator {
    days: HashSet<NaiveDate>,
    weeks: HashSet<(i32, u32)>,
    months: HashSet<(i32, u32)>,
    fees: Decimal,
    invokes: u64,
}

impl ActivityAccumulator {
    fn add(&mut self, item: &TxnItem) -> Result<()> {
        if item.tx_type.as_deref() == Some(INVOKE) {
            self.invokes += 1;
        }

        let fee = wei_to_ether(&item.actual_fee)
            .with_context(|| format!("bad actual_fee on tx {:?}", item.hash))?;
        self.fees += fee;

        let date = timestamp_to_utc(item.timestamp)?.date_naive();
        let week = date.iso_week();
        self.days.insert(date);
        self.weeks.insert((week.year(), week.week()));
        self.months.insert((date.year(), date.month()));
        Ok(())
    }

    fn finish(self, last_tx_age: Option<TimeDelta>) -> ActivityStats {
        ActivityStats {
            distinct_days: self.days.len() as u64,
            distinct_weeks: self.weeks.len() as u64,
            distinct_months: self.months.len() as u64,
            total_fees: self.fees.round_dp(AMOUNT_DP),
            last_tx_age,
            invoke_tx_count: self.invokes,
        }
    }
}

fn timestamp_to_utc(ts: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0).with_context(|| format!("timestamp out of range: {ts}"))
}

/// Time elapsed since `ts`, clamped at zero for clock skew.
fn age_since(ts: i64, now: DateTime<Utc>) -> Result<TimeDelta> {
    let at = timestamp_to_utc(ts)?;
    Ok((now - at).max(TimeDelta::zero()))
}

/// Walk the wallet's transaction history. Errors propagate: a failed page
/// aborts the wallet.
#[tracing::instrument(skip_all, fields(address = %address))]
pub async fn fetch_activity<P: TxnsPager + Sync>(
    pager: &P,
    address: &str,
    now: DateTime<Utc>,
) -> Result<ActivityStats> {
    let first = pager
        .fetch_txns_page(address, 1)
        .await
        .with_context(|| format!("failed to fetch txns page 1 for {address}"))?;

    let last_tx_age = first
        .items
        .first()
        .map(|item| age_since(item.timestamp, now))
        .transpose()?;

    let mut acc = ActivityAccumulator::default();
    if first.last_page >= 1 {
        for item in &first.items {
            acc.add(item)?;
        }
    }
    for page in 2..=first.last_page {
        let next = pager
            .fetch_txns_page(address, page)
            .await
            .with_context(|| format!("failed to fetch txns page {page} for {address}"))?;
        for item in &next.items {
            acc.add(item)?;
        }
    }

    let stats = acc.finish(last_tx_age);
    debug!(
        pages = first.last_page,
        invokes = stats.invoke_tx_count,
        days = stats.distinct_days,
        "activity aggregated"
    );
    Ok(stats)
}

/// Largest whole unit: `"3d"`, `"5h"`, `"12m"`, `"40s"`.
pub fn format_age(age: TimeDelta) -> String {
    if age.num_days() > 0 {
        format!("{}d", age.num_days())
    } else if age.num_hours() > 0 {
        format!("{}h", age.num_hours())
    } else if age.num_minutes() > 0 {
        format!("{}m", age.num_minutes())
    } else {
        format!("{}s", age.num_seconds())
    }
}
