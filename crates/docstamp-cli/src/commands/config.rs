use std::path::Path;

use anyhow::Result;
use docstamp_sdk::deployment::load_contract_address;
use docstamp_sdk::wallet::{load_wallet, save_wallet};

use crate::output;

const ALLOWED_KEYS: &[&str] = &[
    "stellar_secret",
    "network",
    "rpc_url",
    "contract_id",
    "pinning_url",
    "pinning_gateway",
    "pinning_token",
    "indexer_url",
];

pub fn set(key: &str, value: &str) -> Result<()> {
    if !ALLOWED_KEYS.contains(&key) {
        return Err(output::fail_with_hint(
            &format!("unknown config key: {key}"),
            &format!("allowed keys: {}", ALLOWED_KEYS.join(", ")),
        ));
    }

    let mut wallet = load_wallet()?;
    match key {
        "stellar_secret" => wallet.stellar_secret = value.to_string(),
        "network" => wallet.network = value.to_string(),
        "rpc_url" => wallet.rpc_url = value.to_string(),
        "contract_id" => wallet.contract_id = value.to_string(),
        "pinning_url" => wallet.pinning_url = value.to_string(),
        "pinning_gateway" => wallet.pinning_gateway = value.to_string(),
        "pinning_token" => wallet.pinning_token = value.to_string(),
        "indexer_url" => wallet.indexer_url = value.to_string(),
        _ => unreachable!(),
    }
    save_wallet(&wallet)?;

    if output::is_json() {
        output::json_output(serde_json::json!({ "key": key, "value": value }));
    } else {
        output::success(&format!("{key} updated"));
    }
    Ok(())
}

/// Point `contract_id` at the address in a deployment artifact.
pub fn artifact(path: &Path) -> Result<()> {
    let address = load_contract_address(path)?;
    let mut wallet = load_wallet()?;
    wallet.contract_id = address.clone();
    save_wallet(&wallet)?;

    if output::is_json() {
        output::json_output(serde_json::json!({ "contract_id": address }));
    } else {
        output::success(&format!("contract_id set to {address}"));
    }
    Ok(())
}

fn mask(s: &str) -> String {
    if s.len() <= 8 || s == "PLACEHOLDER" {
        return s.to_string();
    }
    format!("{}***{}", &s[..4], &s[s.len() - 4..])
}

pub fn show() -> Result<()> {
    let wallet = load_wallet()?;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "stellar_secret": mask(&wallet.stellar_secret),
            "network": wallet.network,
            "rpc_url": wallet.rpc_url,
            "contract_id": wallet.contract_id,
            "pinning_url": wallet.pinning_url,
            "pinning_gateway": wallet.pinning_gateway,
            "pinning_token": mask(&wallet.pinning_token),
            "indexer_url": wallet.indexer_url,
            "history_count": wallet.history.len(),
        }));
    } else {
        output::label("stellar_secret", &mask(&wallet.stellar_secret));
        output::label("network", &wallet.network);
        output::label("rpc_url", &wallet.rpc_url);
        output::label("contract_id", &wallet.contract_id);
        output::label("pinning_url", &wallet.pinning_url);
        output::label("pinning_gateway", &wallet.pinning_gateway);
        output::label("pinning_token", &mask(&wallet.pinning_token));
        output::label("indexer_url", &wallet.indexer_url);
        output::label("history", &wallet.history.len().to_string());
    }
    Ok(())
}
