use anyhow::Result;
use docstamp_sdk::client::RegistryClient;
use docstamp_sdk::wallet::load_wallet;

use crate::output;

pub async fn run() -> Result<()> {
    let wallet = load_wallet()?;

    let pb = output::spinner("loading on-chain documents…");
    let client = RegistryClient::from_wallet(&wallet)?;
    let result = client.my_docs().await;
    pb.finish_and_clear();
    let rows = result?;

    if output::is_json() {
        let docs: Vec<serde_json::Value> = rows
            .iter()
            .map(|d| {
                serde_json::json!({
                    "fingerprint": d.fingerprint,
                    "uri": d.uri,
                    "exists": d.exists,
                    "gateway": d.gateway,
                })
            })
            .collect();
        output::json_output(serde_json::json!({ "docs": docs }));
        return Ok(());
    }

    if rows.is_empty() {
        output::info("(no on-chain docs yet)");
        return Ok(());
    }

    for (i, d) in rows.iter().enumerate() {
        let marker = if d.exists { "ok" } else { "missing" };
        output::info(&format!(
            "  [{}] {} {} {}",
            i,
            output::shorten(&d.fingerprint, 8),
            d.uri,
            marker
        ));
    }
    output::info(&format!("{} document(s) on-chain", rows.len()));
    Ok(())
}
