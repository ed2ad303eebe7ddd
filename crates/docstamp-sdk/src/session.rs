// Copyright 2026 docstamp contributors
// Licensed under the Apache License, Version 2.0

//! Session state machine for the front end.
//!
//! Wallet events (account picked, network switched) and local progress
//! (file hashed, bytes pinned) are explicit transitions over an immutable
//! snapshot: each handler returns a new [`Session`] plus the effect the
//! front end must apply. There is no ambient mutable state.
//!
//! A register action requires all four of: a selected account, the
//! registry's deployment network active, a computed fingerprint, and a
//! storage URI. [`Session::check_register_preconditions`] reports the
//! first unmet one. The `busy` flag serializes actions; re-entry while
//! an action is in flight is refused.

use docstamp_types::Fingerprint;

use crate::error::{DocError, DocResult};

/// Immutable snapshot of identity, network, and pending-action state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    expected_network: String,
    pub account: Option<String>,
    pub network: Option<String>,
    pub fingerprint: Option<Fingerprint>,
    pub uri: Option<String>,
    pub busy: bool,
}

/// What the front end must do after applying a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEffect {
    None,
    /// Identity changed; re-fetch the document list from the registry.
    RefreshDocs,
    /// Signing context changed; reload everything.
    FullReload,
}

impl Session {
    /// `expected_network` is the network the registry is deployed on.
    pub fn new(expected_network: &str) -> Self {
        Session {
            expected_network: expected_network.to_string(),
            account: None,
            network: None,
            fingerprint: None,
            uri: None,
            busy: false,
        }
    }

    /// Wallet reported a (possibly empty) account selection. The first
    /// entry becomes the active identity; the document list is stale
    /// either way.
    pub fn account_changed(&self, accounts: &[String]) -> (Session, SessionEffect) {
        let mut next = self.clone();
        next.account = accounts.first().filter(|a| !a.is_empty()).cloned();
        (next, SessionEffect::RefreshDocs)
    }

    /// Wallet switched networks. Identity-dependent progress is dropped
    /// wholesale: the signing context changed under us.
    pub fn network_changed(&self, network: &str) -> (Session, SessionEffect) {
        let mut next = Session::new(&self.expected_network);
        next.account = self.account.clone();
        next.network = Some(network.to_string());
        (next, SessionEffect::FullReload)
    }

    /// A file was chosen: fingerprint it locally, drop any URI obtained
    /// for the previous file.
    pub fn file_selected(&self, bytes: &[u8]) -> Session {
        let mut next = self.clone();
        next.fingerprint = Some(Fingerprint::of_bytes(bytes));
        next.uri = None;
        next
    }

    /// The pinning service returned a storage URI for the current file.
    pub fn pinned(&self, uri: &str) -> Session {
        let mut next = self.clone();
        next.uri = Some(uri.to_string());
        next
    }

    pub fn network_matches(&self) -> bool {
        self.network.as_deref() == Some(self.expected_network.as_str())
    }

    /// First unmet register precondition, or Ok. Checked before any
    /// network call; the order matches the user-visible action ladder.
    pub fn check_register_preconditions(&self) -> DocResult<()> {
        if self.account.is_none() {
            return Err(DocError::Precondition("connect a wallet first"));
        }
        if !self.network_matches() {
            return Err(DocError::Precondition(
                "wrong network — switch to the registry's deployment network",
            ));
        }
        if self.fingerprint.is_none() {
            return Err(DocError::Precondition("choose a file first"));
        }
        if self.uri.is_none() {
            return Err(DocError::Precondition("pin the file to storage first"));
        }
        Ok(())
    }

    /// Claim the action slot. Refused while another action is in flight.
    pub fn begin_action(&self) -> DocResult<Session> {
        if self.busy {
            return Err(DocError::Busy);
        }
        let mut next = self.clone();
        next.busy = true;
        Ok(next)
    }

    pub fn end_action(&self) -> Session {
        let mut next = self.clone();
        next.busy = false;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_session() -> Session {
        let s = Session::new("testnet");
        let (s, _) = s.account_changed(&["GALICE".to_string()]);
        let (s, _) = s.network_changed("testnet");
        let s = s.file_selected(b"contract draft");
        s.pinned("ipfs://CID1")
    }

    #[test]
    fn preconditions_met_in_ready_state() {
        assert!(ready_session().check_register_preconditions().is_ok());
    }

    #[test]
    fn preconditions_report_first_unmet() {
        let s = Session::new("testnet");
        assert!(matches!(
            s.check_register_preconditions(),
            Err(DocError::Precondition(msg)) if msg.contains("wallet")
        ));

        let (s, _) = s.account_changed(&["GALICE".to_string()]);
        assert!(matches!(
            s.check_register_preconditions(),
            Err(DocError::Precondition(msg)) if msg.contains("network")
        ));

        let (s, _) = s.network_changed("testnet");
        assert!(matches!(
            s.check_register_preconditions(),
            Err(DocError::Precondition(msg)) if msg.contains("file")
        ));

        let s = s.file_selected(b"bytes");
        assert!(matches!(
            s.check_register_preconditions(),
            Err(DocError::Precondition(msg)) if msg.contains("pin")
        ));
    }

    #[test]
    fn wrong_network_blocks_register() {
        let s = ready_session();
        let (s, effect) = s.network_changed("mainnet");
        assert_eq!(effect, SessionEffect::FullReload);
        assert!(!s.network_matches());
        assert!(s.check_register_preconditions().is_err());
    }

    #[test]
    fn network_change_drops_progress() {
        let s = ready_session();
        let (s, _) = s.network_changed("testnet");
        // same network name, still a fresh signing context
        assert!(s.fingerprint.is_none());
        assert!(s.uri.is_none());
        assert_eq!(s.account.as_deref(), Some("GALICE"));
    }

    #[test]
    fn account_change_requests_refresh() {
        let s = ready_session();
        let (s, effect) = s.account_changed(&["GBOB".to_string()]);
        assert_eq!(effect, SessionEffect::RefreshDocs);
        assert_eq!(s.account.as_deref(), Some("GBOB"));

        let (s, effect) = s.account_changed(&[]);
        assert_eq!(effect, SessionEffect::RefreshDocs);
        assert!(s.account.is_none());
    }

    #[test]
    fn file_selection_invalidates_previous_uri() {
        let s = ready_session();
        let s = s.file_selected(b"a different file");
        assert!(s.uri.is_none());
        assert_eq!(
            s.fingerprint,
            Some(Fingerprint::of_bytes(b"a different file"))
        );
    }

    #[test]
    fn busy_flag_serializes_actions() {
        let s = ready_session();
        let s = s.begin_action().unwrap();
        assert!(matches!(s.begin_action(), Err(DocError::Busy)));
        let s = s.end_action();
        assert!(s.begin_action().is_ok());
    }
}
