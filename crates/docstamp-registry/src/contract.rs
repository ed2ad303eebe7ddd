// Copyright 2026 docstamp contributors
// Licensed under the Apache License, Version 2.0

//! Document registry: append-only mapping of content fingerprints to
//! storage URIs, with a per-owner index of registered fingerprints.
//!
//! A fingerprint can be registered at most once; the record is never
//! updated or deleted afterwards. Reads are open to any caller and never
//! trap on unknown keys.

use soroban_sdk::{contract, contractimpl, contracttype, Address, BytesN, Env, String, Vec};

/// Stored per fingerprint. `exists` is false only in the zero value
/// returned for unknown fingerprints.
#[contracttype]
#[derive(Clone, Debug)]
pub struct DocRecord {
    pub uri: String,
    pub exists: bool,
}

/// Published on every successful registration, for off-chain indexing.
#[contracttype]
#[derive(Clone, Debug)]
pub struct RegisterEvent {
    pub fingerprint: BytesN<32>,
    pub uri: String,
    pub owner: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Doc(BytesN<32>),
    UserDocs(Address),
}

const PERSISTENT_TTL: u32 = 535_680; // ~30 days
const PERSISTENT_THRESHOLD: u32 = 267_840; // ~15 days

#[contract]
pub struct DocRegistry;

#[contractimpl]
impl DocRegistry {
    /// Record `fingerprint` → `uri` for `owner`, exactly once.
    ///
    /// The fingerprint is caller-supplied and not validated against any
    /// file content here; computing it correctly is the client's job.
    pub fn register(env: Env, owner: Address, fingerprint: BytesN<32>, uri: String) {
        owner.require_auth();

        if uri.len() == 0 {
            panic!("empty uri");
        }

        let doc_key = DataKey::Doc(fingerprint.clone());
        if env.storage().persistent().has(&doc_key) {
            panic!("document already registered");
        }

        let record = DocRecord {
            uri: uri.clone(),
            exists: true,
        };
        env.storage().persistent().set(&doc_key, &record);
        env.storage()
            .persistent()
            .extend_ttl(&doc_key, PERSISTENT_THRESHOLD, PERSISTENT_TTL);

        let user_key = DataKey::UserDocs(owner.clone());
        let mut owned: Vec<BytesN<32>> = env
            .storage()
            .persistent()
            .get(&user_key)
            .unwrap_or_else(|| Vec::new(&env));
        owned.push_back(fingerprint.clone());
        env.storage().persistent().set(&user_key, &owned);
        env.storage()
            .persistent()
            .extend_ttl(&user_key, PERSISTENT_THRESHOLD, PERSISTENT_TTL);

        env.events().publish(
            ("register",),
            RegisterEvent {
                fingerprint,
                uri,
                owner,
                timestamp: env.ledger().timestamp(),
            },
        );
    }

    /// Whether `fingerprint` has been registered. False for unknown keys.
    pub fn is_registered(env: Env, fingerprint: BytesN<32>) -> bool {
        env.storage().persistent().has(&DataKey::Doc(fingerprint))
    }

    /// Fingerprints registered by `owner`, in submission order. Empty for
    /// an address that has never registered anything.
    pub fn get_user_docs(env: Env, owner: Address) -> Vec<BytesN<32>> {
        env.storage()
            .persistent()
            .get(&DataKey::UserDocs(owner))
            .unwrap_or_else(|| Vec::new(&env))
    }

    /// Full record for `fingerprint`; the zero value `("", false)` for
    /// unknown keys.
    pub fn docs(env: Env, fingerprint: BytesN<32>) -> DocRecord {
        env.storage()
            .persistent()
            .get(&DataKey::Doc(fingerprint))
            .unwrap_or_else(|| DocRecord {
                uri: String::from_str(&env, ""),
                exists: false,
            })
    }
}
