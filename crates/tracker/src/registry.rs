use std::collections::HashMap;

use common::address::canonical_address;
use common::config::ContractEntry;
use tracing::warn;

/// Known contracts grouped under task labels. Each distinct label is one report
/// column, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractRegistry {
    labels: Vec<String>,
    by_address: HashMap<String, usize>,
}

impl ContractRegistry {
    pub fn from_entries(entries: &[ContractEntry]) -> Self {
        let mut labels: Vec<String> = Vec::new();
        let mut by_address = HashMap::new();

        for entry in entries {
            let label_idx = match labels.iter().position(|l| l == &entry.task) {
                Some(idx) => idx,
                None => {
                    labels.push(entry.task.clone());
                    labels.len() - 1
                }
            };
            let key = canonical_address(&entry.address);
            if let Some(existing) = by_address.get(&key) {
                warn!(
                    address = %entry.address,
                    kept = %labels[*existing],
                    ignored = %entry.task,
                    "duplicate contract address in registry"
                );
                continue;
            }
            by_address.insert(key, label_idx);
        }

        Self { labels, by_address }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Column index of the task this contract belongs to.
    pub fn label_index(&self, address: &str) -> Option<usize> {
        self.by_address.get(&canonical_address(address)).copied()
    }

    pub fn zeroed_counts(&self) -> Vec<u64> {
        vec![0; self.labels.len()]
    }
}
