// Copyright 2026 docstamp contributors
// Licensed under the Apache License, Version 2.0

//! High-level registry client.
//!
//! Wraps wallet identity, the stellar CLI, and response parsing into the
//! four registry operations the front end needs: register, verify, read
//! one record, list mine. Reads always hit the chain; the local history
//! log is never consulted here.
//!
//! ```rust,no_run
//! use docstamp_sdk::client::RegistryClient;
//!
//! # async fn example() -> docstamp_sdk::error::DocResult<()> {
//! let client = RegistryClient::new("C_REGISTRY...", "testnet", "S_SECRET...")?;
//! let registered = client
//!     .is_registered(&docstamp_sdk::Fingerprint::of_bytes(b"file bytes"))
//!     .await?;
//! # let _ = registered;
//! # Ok(())
//! # }
//! ```

use docstamp_types::Fingerprint;
use serde::Deserialize;

use crate::error::{DocError, DocResult};
use crate::pinning::ipfs_to_gateway;
use crate::wallet::WalletData;

pub struct RegistryClient {
    contract_id: String,
    network: String,
    stellar_secret: String,
}

pub struct RegisterOutcome {
    /// Canonical `0x` hex of the registered fingerprint.
    pub fingerprint: String,
    pub uri: String,
    /// Submitting address (G…).
    pub owner: String,
    /// Raw CLI result of the submission.
    pub tx_result: String,
}

/// One row of the "my documents" view, straight from ledger state.
pub struct DocRow {
    pub fingerprint: String,
    pub uri: String,
    pub exists: bool,
    pub gateway: String,
}

#[derive(Deserialize)]
struct DocRecordJson {
    uri: String,
    exists: bool,
}

impl RegistryClient {
    pub fn new(contract_id: &str, network: &str, stellar_secret: &str) -> DocResult<Self> {
        Ok(Self {
            contract_id: contract_id.to_string(),
            network: network.to_string(),
            stellar_secret: stellar_secret.to_string(),
        })
    }

    pub fn from_wallet(wallet: &WalletData) -> DocResult<Self> {
        Self::new(&wallet.contract_id, &wallet.network, &wallet.stellar_secret)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn require_contract(&self) -> DocResult<()> {
        if self.contract_id == "PLACEHOLDER" || self.contract_id.is_empty() {
            return Err(DocError::Config(
                "contract_id not configured — set it from the deployment artifact".to_string(),
            ));
        }
        Ok(())
    }

    fn require_identity(&self) -> DocResult<()> {
        if self.stellar_secret == "PLACEHOLDER" || self.stellar_secret.is_empty() {
            return Err(DocError::Config(
                "stellar_secret not configured".to_string(),
            ));
        }
        Ok(())
    }

    async fn invoke(&self, function: &str, args: &[(&str, &str)]) -> DocResult<String> {
        crate::soroban::invoke_contract(
            &self.contract_id,
            &self.network,
            &self.stellar_secret,
            function,
            args,
        )
        .await
        .map_err(ledger_error)
    }

    async fn owner_address(&self) -> DocResult<String> {
        crate::soroban::get_public_key(&self.stellar_secret)
            .await
            .map_err(|e| DocError::Wallet(e.to_string()))
    }

    // -----------------------------------------------------------------------
    // Registry operations
    // -----------------------------------------------------------------------

    /// Submit a registration transaction. Fails with
    /// [`DocError::Ledger`] if the fingerprint is already registered;
    /// the caller surfaces that, it never retries.
    pub async fn register(
        &self,
        fingerprint: &Fingerprint,
        uri: &str,
    ) -> DocResult<RegisterOutcome> {
        self.require_contract()?;
        self.require_identity()?;

        let owner = self.owner_address().await?;
        let fp_hex = fingerprint.to_raw_hex();
        let tx_result = self
            .invoke(
                "register",
                &[("owner", &owner), ("fingerprint", &fp_hex), ("uri", uri)],
            )
            .await?;

        Ok(RegisterOutcome {
            fingerprint: fingerprint.to_hex(),
            uri: uri.to_string(),
            owner,
            tx_result,
        })
    }

    /// Pure read: whether the fingerprint exists on-chain.
    pub async fn is_registered(&self, fingerprint: &Fingerprint) -> DocResult<bool> {
        self.require_contract()?;
        let out = self
            .invoke("is_registered", &[("fingerprint", &fingerprint.to_raw_hex())])
            .await?;
        parse_bool(&out)
    }

    /// Pure read: `(uri, exists)`, the zero pair for unknown fingerprints.
    pub async fn doc(&self, fingerprint: &Fingerprint) -> DocResult<(String, bool)> {
        self.require_contract()?;
        let out = self
            .invoke("docs", &[("fingerprint", &fingerprint.to_raw_hex())])
            .await?;
        parse_doc_record(&out)
    }

    /// Ledger truth for "my documents": the owner index in submission
    /// order, then each record.
    pub async fn my_docs(&self) -> DocResult<Vec<DocRow>> {
        self.require_contract()?;
        self.require_identity()?;

        let owner = self.owner_address().await?;
        let out = self.invoke("get_user_docs", &[("owner", &owner)]).await?;

        let mut rows = Vec::new();
        for fp_hex in parse_fingerprints(&out)? {
            let fingerprint = Fingerprint::from_hex(&fp_hex)
                .map_err(|e| DocError::Ledger(format!("bad fingerprint in index: {e}")))?;
            let (uri, exists) = self.doc(&fingerprint).await?;
            rows.push(DocRow {
                fingerprint: fingerprint.to_hex(),
                gateway: ipfs_to_gateway(&uri),
                uri,
                exists,
            });
        }
        Ok(rows)
    }
}

// ---------------------------------------------------------------------------
// CLI result parsing
// ---------------------------------------------------------------------------

fn ledger_error(err: anyhow::Error) -> DocError {
    let msg = err.to_string();
    // surface the contract's own rejection reason when present
    for reason in ["document already registered", "empty uri"] {
        if msg.contains(reason) {
            return DocError::Ledger(reason.to_string());
        }
    }
    DocError::Ledger(msg)
}

fn parse_bool(out: &str) -> DocResult<bool> {
    serde_json::from_str(out.trim())
        .map_err(|_| DocError::Ledger(format!("unexpected is_registered response: {out}")))
}

fn parse_doc_record(out: &str) -> DocResult<(String, bool)> {
    let record: DocRecordJson = serde_json::from_str(out.trim())
        .map_err(|_| DocError::Ledger(format!("unexpected docs response: {out}")))?;
    Ok((record.uri, record.exists))
}

/// Owner index as canonical `0x` hex strings, submission order preserved.
fn parse_fingerprints(out: &str) -> DocResult<Vec<String>> {
    let raw: Vec<String> = serde_json::from_str(out.trim())
        .map_err(|_| DocError::Ledger(format!("unexpected get_user_docs response: {out}")))?;
    raw.iter()
        .map(|h| {
            Fingerprint::from_hex(h)
                .map(|fp| fp.to_hex())
                .map_err(|e| DocError::Ledger(format!("bad fingerprint in index: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_wallet_accepts_placeholders() {
        let wallet = WalletData::with_defaults();
        assert!(RegistryClient::from_wallet(&wallet).is_ok());
    }

    #[test]
    fn require_contract_rejects_placeholder() {
        let client = RegistryClient::new("PLACEHOLDER", "testnet", "S_SECRET").unwrap();
        assert!(matches!(
            client.require_contract(),
            Err(DocError::Config(_))
        ));
    }

    #[test]
    fn require_identity_rejects_placeholder() {
        let client = RegistryClient::new("C_REGISTRY", "testnet", "PLACEHOLDER").unwrap();
        assert!(client.require_contract().is_ok());
        assert!(matches!(
            client.require_identity(),
            Err(DocError::Config(_))
        ));
    }

    #[test]
    fn parse_bool_responses() {
        assert!(parse_bool("true").unwrap());
        assert!(!parse_bool("false\n").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn parse_doc_record_response() {
        let (uri, exists) =
            parse_doc_record(r#"{"uri":"ipfs://QmAbc","exists":true}"#).unwrap();
        assert_eq!(uri, "ipfs://QmAbc");
        assert!(exists);

        let (uri, exists) = parse_doc_record(r#"{"uri":"","exists":false}"#).unwrap();
        assert_eq!(uri, "");
        assert!(!exists);
    }

    #[test]
    fn parse_fingerprints_normalizes_and_keeps_order() {
        let out = format!(r#"["{}","{}"]"#, "aa".repeat(32), "bb".repeat(32));
        let parsed = parse_fingerprints(&out).unwrap();
        assert_eq!(
            parsed,
            vec![
                format!("0x{}", "aa".repeat(32)),
                format!("0x{}", "bb".repeat(32)),
            ]
        );

        assert!(parse_fingerprints(r#"["zz"]"#).is_err());
        assert_eq!(parse_fingerprints("[]").unwrap().len(), 0);
    }

    #[test]
    fn ledger_error_extracts_contract_reason() {
        let err = ledger_error(anyhow::anyhow!(
            "stellar contract invoke register failed: HostError … \"document already registered\" …"
        ));
        assert!(matches!(
            err,
            DocError::Ledger(msg) if msg == "document already registered"
        ));

        let err = ledger_error(anyhow::anyhow!("connection refused"));
        assert!(matches!(
            err,
            DocError::Ledger(msg) if msg.contains("connection refused")
        ));
    }
}
