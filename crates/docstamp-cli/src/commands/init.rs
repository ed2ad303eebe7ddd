use anyhow::Result;
use docstamp_sdk::wallet::{save_wallet, wallet_path, WalletData};

use crate::output;

pub fn run() -> Result<()> {
    let path = wallet_path()?;
    if path.exists() {
        anyhow::bail!(
            "wallet already exists at {}\ndelete it first to start over",
            path.display()
        );
    }

    let wallet = WalletData::with_defaults();
    save_wallet(&wallet)?;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "wallet_path": path.display().to_string(),
            "network": wallet.network,
        }));
    } else {
        output::success(&format!("wallet created at {}", path.display()));
        output::warn("run `docstamp config set stellar_secret <SECRET>` to set your identity");
        output::warn("run `docstamp config artifact <path>` to point at the deployed registry");
        output::warn("run `docstamp config set pinning_token <JWT>` to enable pinning");
    }
    Ok(())
}
