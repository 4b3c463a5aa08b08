use rust_decimal::Decimal;
use tracing::{error, info};

use crate::fetcher_traits::SpotPriceFetcher;

/// Native asset spot price for the whole run. Never fails: any error is logged
/// and `fallback` is used instead.
pub async fn fetch_native_asset_price<F: SpotPriceFetcher + Sync>(
    fetcher: &F,
    fallback: Decimal,
) -> Decimal {
    match fetcher.fetch_spot_price().await {
        Ok(price) => {
            info!(%price, "native asset price");
            price
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), %fallback, "price lookup failed, using fallback");
            metrics::counter!("tracker_price_fallback_total").increment(1);
            fallback
        }
    }
}
