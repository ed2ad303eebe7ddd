// Copyright 2026 docstamp contributors
// Licensed under the Apache License, Version 2.0

//! Registry contract invocation via the `stellar` CLI.
//!
//! The wallet collaborator: key derivation (`requestAccounts`) and
//! signed submission (`signAndSend`) are delegated to the
//! [Stellar CLI](https://github.com/stellar/stellar-cli), which must be
//! installed and on `$PATH`. A user declining to sign surfaces as a
//! failed invocation, which callers treat as recoverable.
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn example() -> anyhow::Result<()> {
//! let owner = docstamp_sdk::soroban::get_public_key("S_SECRET...").await?;
//!
//! let out = docstamp_sdk::soroban::invoke_contract(
//!     "C_REGISTRY_ID",
//!     "testnet",
//!     "S_SECRET...",
//!     "is_registered",
//!     &[("fingerprint", "deadbeef...")],
//! ).await?;
//! # let _ = (owner, out);
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use tokio::process::Command;

/// Run the `stellar` binary, returning trimmed stdout on success.
async fn run_stellar(cmd: &mut Command, what: &str) -> Result<String> {
    let output = cmd
        .output()
        .await
        .with_context(|| format!("failed to run `stellar` CLI for {what} — is it installed?"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow::anyhow!("{what} failed: {stderr}"));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Derive the public key (G…) for a Stellar secret key.
pub async fn get_public_key(secret: &str) -> Result<String> {
    let mut cmd = Command::new("stellar");
    cmd.arg("keys").arg("address").arg(secret);
    run_stellar(&mut cmd, "key derivation").await
}

/// Invoke a registry function. Read-only functions are simulated; writes
/// are signed with `source_secret` and submitted.
///
/// `args` is a list of (arg_name, value) pairs passed as `--arg_name value`.
/// Returns the CLI's stdout (the function result rendered as JSON).
pub async fn invoke_contract(
    contract_id: &str,
    network: &str,
    source_secret: &str,
    function: &str,
    args: &[(&str, &str)],
) -> Result<String> {
    let mut cmd = Command::new("stellar");
    cmd.arg("contract")
        .arg("invoke")
        .arg("--id")
        .arg(contract_id)
        .arg("--network")
        .arg(network)
        .arg("--source")
        .arg(source_secret)
        .arg("--")
        .arg(function);

    for (name, value) in args {
        cmd.arg(format!("--{name}"));
        cmd.arg(value);
    }

    run_stellar(&mut cmd, &format!("contract invoke {function}")).await
}
