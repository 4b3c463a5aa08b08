use clap::ValueEnum;
use common::config::Wallets;

/// Account-abstraction implementation a wallet was deployed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum WalletProvider {
    Argent,
    Braavos,
}

impl WalletProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Argent => "Argent",
            Self::Braavos => "Braavos",
        }
    }

    fn list(self, wallets: &Wallets) -> &[String] {
        match self {
            Self::Argent => &wallets.argent,
            Self::Braavos => &wallets.braavos,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletRef {
    pub address: String,
    pub provider: WalletProvider,
    /// 0-based position in the provider's list.
    pub index: usize,
}

impl WalletRef {
    pub fn label(&self) -> String {
        format!("{}-{}", self.provider.as_str(), self.index + 1)
    }
}

/// Which part of the report a run renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    All,
    Single,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("wallet index {index} is out of range: {provider} has {len} wallet(s)")]
    IndexOutOfRange {
        index: usize,
        provider: &'static str,
        len: usize,
    },
}

/// `idx == 0` selects every wallet (Argent first, then Braavos); otherwise a
/// 1-based index into `provider`'s list.
pub fn select_wallets(
    wallets: &Wallets,
    idx: usize,
    provider: WalletProvider,
) -> Result<(View, Vec<WalletRef>), SelectionError> {
    if idx == 0 {
        let all = [WalletProvider::Argent, WalletProvider::Braavos]
            .into_iter()
            .flat_map(move |p| {
                p.list(wallets)
                    .iter()
                    .enumerate()
                    .map(move |(index, address)| WalletRef {
                        address: address.clone(),
                        provider: p,
                        index,
                    })
            })
            .collect();
        return Ok((View::All, all));
    }

    let list = provider.list(wallets);
    let index = idx - 1;
    let address = list.get(index).ok_or(SelectionError::IndexOutOfRange {
        index: idx,
        provider: provider.as_str(),
        len: list.len(),
    })?;
    Ok((
        View::Single,
        vec![WalletRef {
            address: address.clone(),
            provider,
            index,
        }],
    ))
}
