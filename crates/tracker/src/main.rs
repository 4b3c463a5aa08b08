use anyhow::Result;
use chrono::Utc;
use clap::Parser;

mod activity;
mod balances;
mod cli;
mod context;
mod fetcher_impls;
mod fetcher_traits;
mod metrics;
mod price;
mod registry;
mod render;
mod report;
mod tier;
mod transfers;
mod wallets;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let config = common::config::Config::load(&args.config)?;

    let (dispatch, _otel_guard) = common::observability::build_dispatch(
        "tracker",
        &config.general.log_level,
        config.general.log_format,
    );
    tracing::dispatcher::set_global_default(dispatch).map_err(anyhow::Error::msg)?;
    metrics::describe();

    if args.no_color {
        colored::control::set_override(false);
    }

    // Bad selections fail before any request goes out.
    let (view, selected) = wallets::select_wallets(&config.wallets, args.idx, args.wtype)?;
    tracing::info!(wallets = selected.len(), ?view, "tracker starting");

    let client = common::http::build_client(config.explorer.request_timeout())?;
    let explorer = common::voyager::VoyagerClient::new(
        client.clone(),
        &config.explorer.base_url,
        config.explorer.page_size,
    );
    let ticker = common::okx::OkxTickerClient::new(client, &config.price.url)?;

    let price = price::fetch_native_asset_price(&ticker, config.price.fallback).await;
    let ctx = context::RunContext::new(&config, price, Utc::now());

    let reports = report::collect_reports(&explorer, &ctx, selected).await?;
    let table = report::build_report(&ctx, view, &reports);
    println!("{}", render::render(&table));

    Ok(())
}
