use anyhow::Result;
use docstamp_sdk::wallet::{load_wallet, save_wallet};

use crate::output;

pub fn run(clear: bool) -> Result<()> {
    let mut wallet = load_wallet()?;

    if clear {
        wallet.history.clear();
        save_wallet(&wallet)?;
        if output::is_json() {
            output::json_output(serde_json::json!({ "cleared": true }));
        } else {
            output::success("history cleared");
        }
        return Ok(());
    }

    if output::is_json() {
        let entries: Vec<serde_json::Value> = wallet
            .history
            .iter()
            .map(|e| {
                serde_json::json!({
                    "fingerprint": e.fingerprint,
                    "when": e.when,
                    "tx_hash": e.tx_hash,
                    "owner": e.owner,
                    "uri": e.uri,
                })
            })
            .collect();
        output::json_output(serde_json::json!({ "history": entries }));
        return Ok(());
    }

    if wallet.history.is_empty() {
        output::info("(no local history — this is a cache, the registry is the source of truth)");
        return Ok(());
    }

    // most-recent-first, as stored
    for (i, e) in wallet.history.iter().enumerate() {
        output::info(&format!(
            "  [{}] {} when={} owner={} {}",
            i,
            output::shorten(&e.fingerprint, 8),
            e.when,
            output::shorten(&e.owner, 6),
            e.uri
        ));
    }
    Ok(())
}
