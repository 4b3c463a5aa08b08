use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::address::is_valid_address;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub general: General,
    pub explorer: Explorer,
    pub price: Price,
    pub assets: Assets,
    #[serde(default)]
    pub display: Display,
    #[serde(default)]
    pub wallets: Wallets,
    pub contracts: Vec<ContractEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct General {
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Explorer {
    pub base_url: String,
    pub page_size: u32,
    /// Client-wide request timeout. Unset means requests never time out.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Explorer {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Price {
    pub url: String,
    pub fallback: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assets {
    pub native_symbol: String,
    pub stablecoin_symbol: String,
    pub empty_contract: String,
}

/// Banding limits for one metric. A missing limit disables that band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Thresholds<T> {
    pub flag_below: Option<T>,
    pub elevated_from: Option<T>,
    pub high_from: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Display {
    pub tx: Thresholds<u64>,
    pub months: Thresholds<u64>,
    pub volume: Thresholds<Decimal>,
    pub stale_after_days: i64,
    /// Native balance at or below this is flagged in the all-wallets view.
    pub low_native_all: Decimal,
    /// Same, for the single-wallet view.
    pub low_native_single: Decimal,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            tx: Thresholds {
                flag_below: Some(10),
                elevated_from: Some(25),
                high_from: Some(100),
            },
            months: Thresholds {
                flag_below: Some(2),
                elevated_from: Some(6),
                high_from: Some(9),
            },
            volume: Thresholds {
                flag_below: Some(Decimal::from(10_000)),
                elevated_from: Some(Decimal::from(50_000)),
                high_from: Some(Decimal::from(250_000)),
            },
            stale_after_days: 14,
            low_native_all: Decimal::new(1, 2),
            low_native_single: Decimal::new(5, 3),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Wallets {
    #[serde(default)]
    pub argent: Vec<String>,
    #[serde(default)]
    pub braavos: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractEntry {
    pub address: String,
    pub task: String,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).context("failed to parse tracker config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.explorer.page_size > 0, "explorer.page_size must be > 0");
        anyhow::ensure!(
            self.explorer.request_timeout_secs != Some(0),
            "explorer.request_timeout_secs must be > 0 when set"
        );
        anyhow::ensure!(
            self.price.fallback > Decimal::ZERO,
            "price.fallback must be > 0"
        );
        anyhow::ensure!(
            is_valid_address(&self.assets.empty_contract),
            "assets.empty_contract is not a valid address: {}",
            self.assets.empty_contract
        );
        anyhow::ensure!(
            !self.contracts.is_empty(),
            "at least one [[contracts]] entry is required"
        );
        for entry in &self.contracts {
            anyhow::ensure!(
                is_valid_address(&entry.address),
                "contract address is not valid: {}",
                entry.address
            );
            anyhow::ensure!(
                !entry.task.trim().is_empty(),
                "contract {} has an empty task label",
                entry.address
            );
        }
        for address in self.wallets.argent.iter().chain(&self.wallets.braavos) {
            anyhow::ensure!(
                is_valid_address(address),
                "wallet address is not valid: {address}"
            );
        }
        ensure_ascending("display.tx", &self.display.tx)?;
        ensure_ascending("display.months", &self.display.months)?;
        ensure_ascending("display.volume", &self.display.volume)?;
        anyhow::ensure!(
            self.display.stale_after_days >= 0,
            "display.stale_after_days must be >= 0"
        );
        Ok(())
    }
}

fn ensure_ascending<T: PartialOrd + Copy>(name: &str, t: &Thresholds<T>) -> Result<()> {
    let bands = [t.flag_below, t.elevated_from, t.high_from];
    let present: Vec<T> = bands.iter().flatten().copied().collect();
    anyhow::ensure!(
        present.windows(2).all(|w| w[0] <= w[1]),
        "{name} thresholds must be ascending (flag_below <= elevated_from <= high_from)"
    );
    Ok(())
}
