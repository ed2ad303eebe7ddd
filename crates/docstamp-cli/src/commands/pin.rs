use std::path::Path;

use anyhow::{Context, Result};
use docstamp_sdk::pinning::PinningClient;
use docstamp_sdk::wallet::load_wallet;

use crate::output;

pub async fn run(file: &Path) -> Result<()> {
    let wallet = load_wallet()?;
    let bytes =
        std::fs::read(file).with_context(|| format!("cannot read {}", file.display()))?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file")
        .to_string();

    let pb = output::spinner("uploading to pinning service…");
    let pinner = PinningClient::from_wallet(&wallet);
    let result = pinner.pin_file(&file_name, bytes).await;
    pb.finish_and_clear();
    let pinned = result?;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "uri": pinned.uri,
            "gateway": pinned.gateway,
        }));
    } else {
        output::success("pinned");
        output::label("uri", &pinned.uri);
        output::label("gateway", &pinned.gateway);
    }
    Ok(())
}
