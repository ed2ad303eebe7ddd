use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use docstamp_sdk::client::RegistryClient;
use docstamp_sdk::wallet::load_wallet;
use docstamp_types::Fingerprint;

use crate::output;

pub async fn run(file: &Path) -> Result<()> {
    let wallet = load_wallet()?;
    let bytes =
        std::fs::read(file).with_context(|| format!("cannot read {}", file.display()))?;
    let fingerprint = Fingerprint::of_bytes(&bytes);

    let pb = output::spinner("querying registry…");
    let client = RegistryClient::from_wallet(&wallet)?;
    let result = client.is_registered(&fingerprint).await;
    pb.finish_and_clear();
    let registered = result?;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "fingerprint": fingerprint.to_hex(),
            "registered": registered,
        }));
    } else {
        output::label("fingerprint", &fingerprint.to_hex());
        let verdict = if registered {
            "registered".green().to_string()
        } else {
            "not registered".red().to_string()
        };
        output::label("status", &verdict);
    }
    Ok(())
}
