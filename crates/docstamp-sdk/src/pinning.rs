// Copyright 2026 docstamp contributors
// Licensed under the Apache License, Version 2.0

//! Content-pinning client (Pinata-compatible HTTP API).
//!
//! Uploads raw bytes via bearer-authenticated multipart POST and turns
//! the returned content identifier into an `ipfs://` URI plus an HTTP
//! gateway URL. Upload failure is a reported, non-fatal
//! [`DocError::Pinning`], never a crash.

use serde::Deserialize;

use crate::error::{DocError, DocResult};
use crate::wallet::WalletData;

/// Public gateway used when a URI must be displayed as a clickable link.
const PUBLIC_GATEWAY: &str = "https://ipfs.io/ipfs";

pub struct PinningClient {
    base_url: String,
    gateway_url: String,
    token: String,
    http: reqwest::Client,
}

#[derive(Debug)]
pub struct PinResult {
    /// Canonical locator, e.g. `ipfs://Qm…`.
    pub uri: String,
    /// HTTP gateway URL for the same content.
    pub gateway: String,
}

#[derive(Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

impl PinningClient {
    pub fn new(base_url: &str, gateway_url: &str, token: &str) -> Self {
        PinningClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_wallet(wallet: &WalletData) -> Self {
        Self::new(
            &wallet.pinning_url,
            &wallet.pinning_gateway,
            &wallet.pinning_token,
        )
    }

    fn require_token(&self) -> DocResult<()> {
        if self.token.is_empty() || self.token == "PLACEHOLDER" {
            return Err(DocError::Config(
                "pinning token not configured — set pinning_token".to_string(),
            ));
        }
        Ok(())
    }

    /// Upload `bytes` and return its locator pair.
    pub async fn pin_file(&self, file_name: &str, bytes: Vec<u8>) -> DocResult<PinResult> {
        self.require_token()?;

        let url = format!("{}/pinning/pinFileToIPFS", self.base_url);
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DocError::Pinning(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DocError::Pinning(format!(
                "upload failed: {}",
                resp.status()
            )));
        }

        let body: PinResponse = resp
            .json()
            .await
            .map_err(|e| DocError::Pinning(format!("unexpected response: {e}")))?;

        Ok(self.locate(&body.ipfs_hash))
    }

    fn locate(&self, cid: &str) -> PinResult {
        PinResult {
            uri: format!("ipfs://{cid}"),
            gateway: format!("{}/ipfs/{cid}", self.gateway_url),
        }
    }
}

/// Map an `ipfs://` URI to a public gateway URL for display; anything
/// else passes through untouched.
pub fn ipfs_to_gateway(uri: &str) -> String {
    match uri.strip_prefix("ipfs://") {
        Some(cid) => format!("{PUBLIC_GATEWAY}/{cid}"),
        None => uri.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_builds_uri_and_gateway() {
        let client = PinningClient::new(
            "https://api.pinata.cloud/",
            "https://gateway.pinata.cloud/",
            "jwt",
        );
        let result = client.locate("QmTest123");
        assert_eq!(result.uri, "ipfs://QmTest123");
        assert_eq!(result.gateway, "https://gateway.pinata.cloud/ipfs/QmTest123");
    }

    #[test]
    fn pin_response_parses_provider_json() {
        let body = r#"{"IpfsHash":"QmAbc","PinSize":1234,"Timestamp":"2026-01-01T00:00:00Z"}"#;
        let parsed: PinResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.ipfs_hash, "QmAbc");
    }

    #[test]
    fn gateway_mapping() {
        assert_eq!(
            ipfs_to_gateway("ipfs://QmAbc"),
            "https://ipfs.io/ipfs/QmAbc"
        );
        assert_eq!(
            ipfs_to_gateway("https://example.com/doc"),
            "https://example.com/doc"
        );
        assert_eq!(ipfs_to_gateway(""), "");
    }

    #[test]
    fn missing_token_is_config_error() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let client =
                PinningClient::new("https://api.pinata.cloud", "https://gw", "PLACEHOLDER");
            let err = client.pin_file("a.txt", vec![1, 2, 3]).await.unwrap_err();
            assert!(matches!(err, DocError::Config(_)));
        });
    }
}
