// Copyright 2026 docstamp contributors
// Licensed under the Apache License, Version 2.0

//! Typed errors for façade operations.
//!
//! Every failure is caught at the action boundary and reported; none may
//! crash the session, and nothing is retried automatically.

#[derive(Debug, thiserror::Error)]
pub enum DocError {
    /// A register/verify precondition is unmet; reported before any
    /// network call is attempted.
    #[error("{0}")]
    Precondition(&'static str),

    /// An action is already in flight; register/verify do not re-enter.
    #[error("busy — an action is already in flight")]
    Busy,

    #[error("pinning: {0}")]
    Pinning(String),

    /// Wallet/signer failure, including user rejection. Recoverable.
    #[error("wallet: {0}")]
    Wallet(String),

    /// The ledger rejected or failed the operation.
    #[error("ledger: {0}")]
    Ledger(String),

    #[error("config: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DocResult<T> = Result<T, DocError>;
