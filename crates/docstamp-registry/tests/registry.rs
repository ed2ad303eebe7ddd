// Copyright 2026 docstamp contributors
// Licensed under the Apache License, Version 2.0

//! Registry contract tests against the in-memory Soroban ledger:
//! register, is_registered, get_user_docs, docs, events.

use docstamp_registry::{DocRegistry, DocRegistryClient, RegisterEvent};
use docstamp_types::Fingerprint;
use soroban_sdk::testutils::{Address as _, Events as _, Ledger as _};
use soroban_sdk::{vec, Address, BytesN, Env, IntoVal, String, Vec};

// ── Helpers ──

fn fp(env: &Env, fill: u8) -> BytesN<32> {
    BytesN::from_array(env, &[fill; 32])
}

fn uri(env: &Env, s: &str) -> String {
    String::from_str(env, s)
}

fn deploy(env: &Env) -> DocRegistryClient<'_> {
    let contract_id = env.register(DocRegistry, ());
    DocRegistryClient::new(env, &contract_id)
}

// ── Tests ──

#[test]
fn register_then_read_back() {
    let env = Env::default();
    let client = deploy(&env);
    let owner = Address::generate(&env);

    env.mock_all_auths();
    client.register(&owner, &fp(&env, 0xAA), &uri(&env, "ipfs://CID1"));

    assert!(client.is_registered(&fp(&env, 0xAA)));
    let record = client.docs(&fp(&env, 0xAA));
    assert_eq!(record.uri, uri(&env, "ipfs://CID1"));
    assert!(record.exists);
}

#[test]
fn unknown_fingerprint_reads_zero_value() {
    let env = Env::default();
    let client = deploy(&env);

    assert!(!client.is_registered(&fp(&env, 0x01)));
    let record = client.docs(&fp(&env, 0x01));
    assert_eq!(record.uri, uri(&env, ""));
    assert!(!record.exists);
}

#[test]
fn user_docs_empty_for_untouched_address() {
    let env = Env::default();
    let client = deploy(&env);
    let stranger = Address::generate(&env);

    assert_eq!(client.get_user_docs(&stranger).len(), 0);
}

#[test]
fn user_docs_preserve_submission_order() {
    let env = Env::default();
    let client = deploy(&env);
    let owner = Address::generate(&env);
    let other = Address::generate(&env);

    env.mock_all_auths();
    client.register(&owner, &fp(&env, 0x01), &uri(&env, "ipfs://one"));
    // interleaved registration by a different owner must not leak into
    // the first owner's index
    client.register(&other, &fp(&env, 0x02), &uri(&env, "ipfs://two"));
    client.register(&owner, &fp(&env, 0x03), &uri(&env, "ipfs://three"));
    client.register(&owner, &fp(&env, 0x04), &uri(&env, "ipfs://four"));

    let owned = client.get_user_docs(&owner);
    let expected: Vec<BytesN<32>> =
        Vec::from_array(&env, [fp(&env, 0x01), fp(&env, 0x03), fp(&env, 0x04)]);
    assert_eq!(owned, expected);

    let other_owned = client.get_user_docs(&other);
    assert_eq!(other_owned, Vec::from_array(&env, [fp(&env, 0x02)]));
}

#[test]
#[should_panic(expected = "document already registered")]
fn duplicate_register_panics() {
    let env = Env::default();
    let client = deploy(&env);
    let owner = Address::generate(&env);

    env.mock_all_auths();
    client.register(&owner, &fp(&env, 0x11), &uri(&env, "ipfs://first"));
    client.register(&owner, &fp(&env, 0x11), &uri(&env, "ipfs://second"));
}

#[test]
fn failed_duplicate_leaves_state_unchanged() {
    let env = Env::default();
    let client = deploy(&env);
    let owner = Address::generate(&env);
    let rival = Address::generate(&env);

    env.mock_all_auths();
    client.register(&owner, &fp(&env, 0x11), &uri(&env, "ipfs://first"));

    // second registration of the same fingerprint, different caller and
    // different uri, must fail without touching the record or either index
    let result = client.try_register(&rival, &fp(&env, 0x11), &uri(&env, "ipfs://second"));
    assert!(result.is_err());

    let record = client.docs(&fp(&env, 0x11));
    assert_eq!(record.uri, uri(&env, "ipfs://first"));
    assert!(record.exists);
    assert_eq!(client.get_user_docs(&owner).len(), 1);
    assert_eq!(client.get_user_docs(&rival).len(), 0);
}

#[test]
#[should_panic(expected = "empty uri")]
fn empty_uri_rejected() {
    let env = Env::default();
    let client = deploy(&env);
    let owner = Address::generate(&env);

    env.mock_all_auths();
    client.register(&owner, &fp(&env, 0x22), &uri(&env, ""));
}

#[test]
#[should_panic]
fn register_requires_owner_auth() {
    let env = Env::default();
    let client = deploy(&env);
    let owner = Address::generate(&env);

    // no mock_all_auths — the owner never signed
    client.register(&owner, &fp(&env, 0x33), &uri(&env, "ipfs://unsigned"));
}

#[test]
fn register_publishes_event_with_timestamp() {
    let env = Env::default();
    env.ledger().with_mut(|li| li.timestamp = 1_690_000_000);
    let contract_id = env.register(DocRegistry, ());
    let client = DocRegistryClient::new(&env, &contract_id);
    let owner = Address::generate(&env);

    env.mock_all_auths();
    client.register(&owner, &fp(&env, 0x44), &uri(&env, "ipfs://evt"));

    let expected = RegisterEvent {
        fingerprint: fp(&env, 0x44),
        uri: uri(&env, "ipfs://evt"),
        owner: owner.clone(),
        timestamp: 1_690_000_000,
    };
    assert_eq!(
        env.events().all(),
        vec![
            &env,
            (
                contract_id.clone(),
                ("register",).into_val(&env),
                expected.into_val(&env),
            ),
        ]
    );
}

/// The full provenance scenario: hash locally, register, read back from
/// every public view, reject the second writer.
#[test]
fn end_to_end_provenance_scenario() {
    let env = Env::default();
    let client = deploy(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    // fingerprint computed off-chain from file bytes
    let digest = Fingerprint::of_bytes(b"quarterly report, final version");
    let fingerprint = BytesN::from_array(&env, digest.as_bytes());

    env.mock_all_auths();
    client.register(&alice, &fingerprint, &uri(&env, "ipfs://CID1"));

    assert!(client.is_registered(&fingerprint));
    let record = client.docs(&fingerprint);
    assert_eq!(record.uri, uri(&env, "ipfs://CID1"));
    assert!(record.exists);
    assert_eq!(
        client.get_user_docs(&alice),
        Vec::from_array(&env, [fingerprint.clone()])
    );

    // bob re-registering alice's document is rejected, state unchanged
    assert!(client
        .try_register(&bob, &fingerprint, &uri(&env, "ipfs://CID2"))
        .is_err());
    assert_eq!(client.docs(&fingerprint).uri, uri(&env, "ipfs://CID1"));
    assert_eq!(client.get_user_docs(&bob).len(), 0);
}
