//! docstamp-indexer: consumes the registry's `register` events from
//! Soroban RPC and serves a derived, rebuildable read API. The ledger
//! stays the source of truth; this index is reconstruction, not
//! authority.

pub mod api;
pub mod db;
pub mod rpc;
