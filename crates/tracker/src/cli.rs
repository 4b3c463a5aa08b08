use clap::Parser;
use common::config::DEFAULT_CONFIG_PATH;
use std::path::PathBuf;

use crate::wallets::WalletProvider;

/// Starknet wallet activity report.
#[derive(Debug, Clone, Parser)]
#[command(name = "tracker", version)]
pub struct Args {
    /// 1-based wallet index within the provider's list; 0 reports every wallet.
    #[arg(short, long, default_value_t = 0)]
    pub idx: usize,

    /// Wallet provider the index refers to.
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = WalletProvider::Argent)]
    pub wtype: WalletProvider,

    /// Path to the TOML config.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Disable ANSI colors in the table.
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["tracker"]).unwrap();
        assert_eq!(args.idx, 0);
        assert_eq!(args.wtype, WalletProvider::Argent);
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(!args.no_color);
    }

    #[test]
    fn test_short_flags() {
        let args = Args::try_parse_from(["tracker", "-i", "3", "-w", "braavos"]).unwrap();
        assert_eq!(args.idx, 3);
        assert_eq!(args.wtype, WalletProvider::Braavos);
    }

    #[test]
    fn test_long_flags() {
        let args = Args::try_parse_from([
            "tracker",
            "--idx",
            "2",
            "--wtype",
            "argent",
            "--config",
            "/tmp/t.toml",
            "--no-color",
        ])
        .unwrap();
        assert_eq!(args.idx, 2);
        assert_eq!(args.config, PathBuf::from("/tmp/t.toml"));
        assert!(args.no_color);
    }

    #[test]
    fn test_provider_is_case_insensitive() {
        let args = Args::try_parse_from(["tracker", "-w", "Braavos"]).unwrap();
        assert_eq!(args.wtype, WalletProvider::Braavos);
        let args = Args::try_parse_from(["tracker", "--wtype", "ARGENT"]).unwrap();
        assert_eq!(args.wtype, WalletProvider::Argent);
    }

    #[test]
    fn test_rejects_unknown_provider_and_negative_index() {
        assert!(Args::try_parse_from(["tracker", "-w", "metamask"]).is_err());
        assert!(Args::try_parse_from(["tracker", "-i", "-1"]).is_err());
    }
}
