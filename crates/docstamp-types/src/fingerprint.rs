// Copyright 2026 docstamp contributors
// Licensed under the Apache License, Version 2.0

//! Document fingerprints: SHA-256 digests of file bytes.
//!
//! The fingerprint is the registry's primary key. It is always computed
//! locally, before any network call. Canonical text form is `0x`-prefixed
//! lowercase hex (66 chars); parsing also accepts the prefix-less form.

use std::fmt;

use sha2::{Digest, Sha256};

/// Digest width in bytes (on-chain type `BytesN<32>`).
pub const FINGERPRINT_LEN: usize = 32;

/// A document's content fingerprint.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub [u8; FINGERPRINT_LEN]);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FingerprintParseError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("expected {FINGERPRINT_LEN} bytes, got {0}")]
    WrongLength(usize),
}

impl Fingerprint {
    /// Hash arbitrary file bytes. Deterministic: the same bytes always
    /// produce the same fingerprint.
    pub fn of_bytes(data: &[u8]) -> Self {
        let digest = Sha256::digest(data);
        Fingerprint(digest.into())
    }

    pub fn from_hex(s: &str) -> Result<Self, FingerprintParseError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes =
            hex::decode(s).map_err(|e| FingerprintParseError::InvalidHex(e.to_string()))?;
        let arr: [u8; FINGERPRINT_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| FingerprintParseError::WrongLength(bytes.len()))?;
        Ok(Fingerprint(arr))
    }

    /// Canonical `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Raw hex without the `0x` prefix, as the stellar CLI expects for
    /// `BytesN<32>` arguments.
    pub fn to_raw_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}
