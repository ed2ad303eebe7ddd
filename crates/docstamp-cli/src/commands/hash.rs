use std::path::Path;

use anyhow::{Context, Result};
use docstamp_types::Fingerprint;

use crate::output;

pub fn run(file: &Path) -> Result<()> {
    let bytes =
        std::fs::read(file).with_context(|| format!("cannot read {}", file.display()))?;
    let fingerprint = Fingerprint::of_bytes(&bytes);

    if output::is_json() {
        output::json_output(serde_json::json!({
            "file": file.display().to_string(),
            "fingerprint": fingerprint.to_hex(),
        }));
    } else {
        output::label("file", &file.display().to_string());
        output::label("fingerprint", &fingerprint.to_hex());
    }
    Ok(())
}
