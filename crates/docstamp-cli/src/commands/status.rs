use anyhow::Result;
use colored::Colorize;
use docstamp_sdk::wallet::{load_wallet, wallet_path, PLACEHOLDER};

use crate::output;

pub async fn run() -> Result<()> {
    let path = wallet_path()?;
    if !path.exists() {
        if output::is_json() {
            output::json_output(serde_json::json!({
                "wallet_loaded": false,
                "contract_configured": false,
                "identity_configured": false,
                "pinning_configured": false,
                "indexer_reachable": false,
                "history_count": 0,
            }));
        } else {
            output::label("wallet", &"not found".red().to_string());
            output::info("run `docstamp init` to create one");
        }
        return Ok(());
    }

    let wallet = load_wallet()?;
    let contract_configured = wallet.contract_id != PLACEHOLDER && !wallet.contract_id.is_empty();
    let identity_configured =
        wallet.stellar_secret != PLACEHOLDER && !wallet.stellar_secret.is_empty();
    let pinning_configured =
        wallet.pinning_token != PLACEHOLDER && !wallet.pinning_token.is_empty();

    let indexer_reachable = reqwest::Client::new()
        .get(format!("{}/v1/health", wallet.indexer_url))
        .timeout(std::time::Duration::from_secs(3))
        .send()
        .await
        .map(|r| r.status().is_success())
        .unwrap_or(false);

    if output::is_json() {
        output::json_output(serde_json::json!({
            "wallet_loaded": true,
            "network": wallet.network,
            "contract_configured": contract_configured,
            "identity_configured": identity_configured,
            "pinning_configured": pinning_configured,
            "indexer_reachable": indexer_reachable,
            "history_count": wallet.history.len(),
        }));
        return Ok(());
    }

    output::label("wallet", &"loaded".green().to_string());
    output::label("network", &wallet.network);
    let fmt_flag = |ok: bool, missing: &str| {
        if ok {
            "configured".green().to_string()
        } else {
            missing.yellow().to_string()
        }
    };
    output::label(
        "contract",
        &fmt_flag(contract_configured, "missing contract_id"),
    );
    output::label(
        "identity",
        &fmt_flag(identity_configured, "missing stellar_secret"),
    );
    output::label(
        "pinning",
        &fmt_flag(pinning_configured, "missing pinning_token"),
    );
    let indexer_str = if indexer_reachable {
        format!("{} ({})", "reachable".green(), wallet.indexer_url)
    } else {
        format!("{} ({})", "unreachable".red(), wallet.indexer_url)
    };
    output::label("indexer", &indexer_str);
    output::label("history", &wallet.history.len().to_string());
    Ok(())
}
