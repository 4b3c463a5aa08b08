use chrono::{DateTime, Utc};
use common::address::canonical_address;
use common::config::{Config, Display};
use rust_decimal::Decimal;

use crate::registry::ContractRegistry;

/// Everything a run needs besides the HTTP clients, fixed before the first
/// wallet is fetched and shared read-only by every wallet task.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Native asset price in USD; one snapshot for the whole run.
    pub price: Decimal,
    pub registry: ContractRegistry,
    pub native_symbol: String,
    pub stablecoin_symbol: String,
    /// Canonical form of the burn/empty contract.
    pub empty_contract: String,
    pub display: Display,
    pub now: DateTime<Utc>,
}

impl RunContext {
    pub fn new(config: &Config, price: Decimal, now: DateTime<Utc>) -> Self {
        Self {
            price,
            registry: ContractRegistry::from_entries(&config.contracts),
            native_symbol: config.assets.native_symbol.clone(),
            stablecoin_symbol: config.assets.stablecoin_symbol.clone(),
            empty_contract: canonical_address(&config.assets.empty_contract),
            display: config.display.clone(),
            now,
        }
    }
}
