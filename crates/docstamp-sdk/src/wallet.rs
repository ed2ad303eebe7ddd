// Copyright 2026 docstamp contributors
// Licensed under the Apache License, Version 2.0

//! Wallet config and registration-history persistence.
//!
//! Stored as JSON at `~/.docstamp/wallet.json`. The history log is a
//! convenience cache of this client's own registrations,
//! most-recent-first and capped at [`HISTORY_CAP`]; it is never treated
//! as ledger truth.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum retained history entries; older ones fall off the end.
pub const HISTORY_CAP: usize = 50;

pub const PLACEHOLDER: &str = "PLACEHOLDER";

#[derive(Serialize, Deserialize, Clone)]
pub struct WalletData {
    pub stellar_secret: String,
    pub network: String,
    pub rpc_url: String,
    pub contract_id: String,
    pub pinning_url: String,
    pub pinning_gateway: String,
    pub pinning_token: String,
    pub indexer_url: String,
    pub history: Vec<HistoryEntry>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Canonical `0x` hex fingerprint.
    pub fingerprint: String,
    /// Unix milliseconds at submission.
    pub when: u64,
    pub tx_hash: String,
    pub owner: String,
    pub uri: String,
}

impl WalletData {
    pub fn with_defaults() -> Self {
        WalletData {
            stellar_secret: PLACEHOLDER.into(),
            network: "testnet".into(),
            rpc_url: "https://soroban-testnet.stellar.org:443".into(),
            contract_id: PLACEHOLDER.into(),
            pinning_url: "https://api.pinata.cloud".into(),
            pinning_gateway: "https://gateway.pinata.cloud".into(),
            pinning_token: PLACEHOLDER.into(),
            indexer_url: "http://localhost:3000".into(),
            history: vec![],
        }
    }
}

pub fn wallet_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".docstamp").join("wallet.json"))
}

pub fn load_wallet() -> Result<WalletData> {
    load_wallet_from(&wallet_path()?)
}

pub fn save_wallet(wallet: &WalletData) -> Result<()> {
    save_wallet_to(&wallet_path()?, wallet)
}

pub fn load_wallet_from(path: &Path) -> Result<WalletData> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("cannot read wallet at {}", path.display()))?;
    serde_json::from_str(&data).context("invalid wallet JSON")
}

pub fn save_wallet_to(path: &Path, wallet: &WalletData) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(wallet)?;
    fs::write(path, json)?;
    Ok(())
}

/// Prepend `entry` and truncate to [`HISTORY_CAP`].
pub fn push_history(wallet: &mut WalletData, entry: HistoryEntry) {
    wallet.history.insert(0, entry);
    wallet.history.truncate(HISTORY_CAP);
}

pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: u64) -> HistoryEntry {
        HistoryEntry {
            fingerprint: format!("0x{:064x}", n),
            when: n,
            tx_hash: format!("tx{n}"),
            owner: "GALICE".into(),
            uri: format!("ipfs://Qm{n}"),
        }
    }

    #[test]
    fn history_is_most_recent_first() {
        let mut wallet = WalletData::with_defaults();
        push_history(&mut wallet, entry(1));
        push_history(&mut wallet, entry(2));
        push_history(&mut wallet, entry(3));

        let whens: Vec<u64> = wallet.history.iter().map(|e| e.when).collect();
        assert_eq!(whens, vec![3, 2, 1]);
    }

    #[test]
    fn history_caps_at_limit() {
        let mut wallet = WalletData::with_defaults();
        for n in 0..(HISTORY_CAP as u64 + 10) {
            push_history(&mut wallet, entry(n));
        }
        assert_eq!(wallet.history.len(), HISTORY_CAP);
        // newest survives, oldest fell off
        assert_eq!(wallet.history[0].when, HISTORY_CAP as u64 + 9);
        assert_eq!(wallet.history.last().unwrap().when, 10);
    }

    #[test]
    fn wallet_roundtrips_through_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("wallet.json");

        let mut wallet = WalletData::with_defaults();
        wallet.contract_id = "C_REGISTRY".into();
        push_history(&mut wallet, entry(7));

        save_wallet_to(&path, &wallet).unwrap();
        let loaded = load_wallet_from(&path).unwrap();
        assert_eq!(loaded.contract_id, "C_REGISTRY");
        assert_eq!(loaded.history, wallet.history);
    }

    #[test]
    fn missing_wallet_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(load_wallet_from(&tmp.path().join("absent.json")).is_err());
    }
}
