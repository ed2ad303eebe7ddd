// Copyright 2026 docstamp contributors
// Licensed under the Apache License, Version 2.0

//! # docstamp-sdk
//!
//! Client library for **docstamp** — hash-only proof of existence on a
//! public ledger.
//!
//! The SDK is the façade between a human-driven front end and three
//! collaborators: the wallet (identity + transaction signing), the
//! content-pinning service (off-chain storage), and the on-chain document
//! registry. Fingerprints are always computed locally, before any network
//! call; registry reads are the source of truth, the local history log is
//! a convenience cache only.
//!
//! ## Crate layout
//!
//! | Module | Purpose |
//! |---|---|
//! | *crate root* | Re-exports [`Fingerprint`] |
//! | [`session`] | Identity/network/pending-action snapshot + transitions |
//! | [`pinning`] | Content-pinning HTTP client (`ipfs://` URIs) |
//! | [`soroban`] | Stellar CLI wrapper for on-chain contract invocation |
//! | [`client`] | Registry read/write operations |
//! | [`wallet`] | Config + capped registration history persistence |
//! | [`deployment`] | Deployment artifact (`{ "address": … }`) loader |
//! | [`error`] | [`DocError`](error::DocError) taxonomy |
//!
//! ## Typical flow
//!
//! ```rust,no_run
//! use docstamp_sdk::{client::RegistryClient, pinning::PinningClient, Fingerprint};
//! use docstamp_sdk::wallet::{self, HistoryEntry};
//!
//! # async fn example() -> docstamp_sdk::error::DocResult<()> {
//! let mut w = wallet::load_wallet()?;
//!
//! // 1. Fingerprint locally
//! let bytes = std::fs::read("report.pdf").map_err(anyhow::Error::from)?;
//! let fingerprint = Fingerprint::of_bytes(&bytes);
//!
//! // 2. Pin the bytes, get a URI
//! let pinner = PinningClient::from_wallet(&w);
//! let pinned = pinner.pin_file("report.pdf", bytes).await?;
//!
//! // 3. Register on-chain, then refresh ledger truth
//! let registry = RegistryClient::from_wallet(&w)?;
//! let outcome = registry.register(&fingerprint, &pinned.uri).await?;
//! let mine = registry.my_docs().await?;
//!
//! // 4. Append to the local history cache
//! wallet::push_history(&mut w, HistoryEntry {
//!     fingerprint: outcome.fingerprint,
//!     when: wallet::now_millis(),
//!     tx_hash: outcome.tx_result,
//!     owner: outcome.owner,
//!     uri: pinned.uri,
//! });
//! wallet::save_wallet(&w)?;
//! # let _ = mine;
//! # Ok(())
//! # }
//! ```

pub use docstamp_types::{Fingerprint, FingerprintParseError, FINGERPRINT_LEN};

pub mod client;
pub mod deployment;
pub mod error;
pub mod pinning;
pub mod session;
pub mod soroban;
pub mod wallet;
