use std::collections::HashSet;

use anyhow::{Context, Result};
use common::address::canonical_address;
use common::types::{parse_decimal, TransferItem};
use rust_decimal::Decimal;
use tracing::debug;

use crate::context::RunContext;
use crate::fetcher_traits::TransfersPager;
use crate::report::VALUE_DP;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferStats {
    /// Outgoing ETH + USDC volume in USD, rounded to [`VALUE_DP`] places.
    pub total_outgoing_value: Decimal,
    /// One counter per registry task label, in registry order.
    pub interactions: Vec<u64>,
}

struct TransferAccumulator<'a> {
    ctx: &'a RunContext,
    wallet: String,
    seen_hashes: HashSet<String>,
    total: Decimal,
    interactions: Vec<u64>,
}

impl<'a> TransferAccumulator<'a> {
    fn new(ctx: &'a RunContext, address: &str) -> Self {
        Self {
            ctx,
            wallet: canonical_address(address),
            seen_hashes: HashSet::new(),
            total: Decimal::ZERO,
            interactions: ctx.registry.zeroed_counts(),
        }
    }

    fn add(&mut self, item: &TransferItem) -> Result<()> {
        let to = canonical_address(&item.transfer_to);

        // Interactions count every leg, whatever the direction, asset or hash.
        if let Some(idx) = self.ctx.registry.label_index(&to) {
            self.interactions[idx] += 1;
        }

        if canonical_address(&item.transfer_from) != self.wallet || to == self.ctx.empty_contract
        {
            return Ok(());
        }
        // Only the first outgoing leg of a transaction counts toward volume.
        let hash = item.tx_hash.clone().unwrap_or_default();
        if !self.seen_hashes.insert(hash) {
            return Ok(());
        }

        let Some(symbol) = item.token_symbol.as_deref() else {
            return Ok(());
        };
        if symbol == self.ctx.native_symbol {
            self.total += transfer_value(item)? * self.ctx.price;
        } else if symbol == self.ctx.stablecoin_symbol {
            self.total += transfer_value(item)?;
        }
        Ok(())
    }

    fn finish(self) -> TransferStats {
        TransferStats {
            total_outgoing_value: self.total.round_dp(VALUE_DP),
            interactions: self.interactions,
        }
    }
}

fn transfer_value(item: &TransferItem) -> Result<Decimal> {
    let raw = item
        .transfer_value
        .as_deref()
        .with_context(|| format!("transfer in tx {:?} has no value", item.tx_hash))?;
    parse_decimal(raw)
}

/// Walk the wallet's transfer history, summing outgoing volume and counting
/// registry interactions. Errors propagate.
#[tracing::instrument(skip_all, fields(address = %address))]
pub async fn fetch_transfers_and_contracts<P: TransfersPager + Sync>(
    pager: &P,
    address: &str,
    ctx: &RunContext,
) -> Result<TransferStats> {
    let first = pager
        .fetch_transfers_page(address, 1)
        .await
        .with_context(|| format!("failed to fetch transfers page 1 for {address}"))?;

    let mut acc = TransferAccumulator::new(ctx, address);
    if first.last_page >= 1 {
        for item in &first.items {
            acc.add(item)?;
        }
    }
    for page in 2..=first.last_page {
        let next = pager
            .fetch_transfers_page(address, page)
            .await
            .with_context(|| format!("failed to fetch transfers page {page} for {address}"))?;
        for item in &next.items {
            acc.add(item)?;
        }
    }

    let stats = acc.finish();
    debug!(
        pages = first.last_page,
        volume = %stats.total_outgoing_value,
        "transfers aggregated"
    );
    Ok(stats)
}
