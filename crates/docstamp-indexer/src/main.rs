use std::sync::Arc;
use std::time::Duration;

use docstamp_indexer::api::{self, AppState, SharedState};
use docstamp_indexer::db::{Db, RegistrationRow};
use docstamp_indexer::rpc;

// ── Config ───────────────────────────────────────────────────────────
const POLL_INTERVAL: Duration = Duration::from_secs(5);

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

#[tokio::main]
async fn main() {
    let rpc_url = env_or("DOCSTAMP_RPC_URL", "https://soroban-testnet.stellar.org:443");
    let contract_id = env_or("DOCSTAMP_CONTRACT_ID", "PLACEHOLDER_CONTRACT_ID");
    let db_path = env_or("DOCSTAMP_DB_PATH", "docstamp-indexer.db");
    let listen_addr = env_or("DOCSTAMP_LISTEN_ADDR", "0.0.0.0:3000");

    eprintln!("docstamp-indexer starting...");
    eprintln!("  contract: {contract_id}");
    eprintln!("  rpc:      {rpc_url}");

    // 1. Open DB + create tables
    let db = Db::open(std::path::Path::new(&db_path)).expect("failed to open db");
    match db.recent(1) {
        Ok(rows) if !rows.is_empty() => eprintln!("resuming existing index"),
        _ => eprintln!("starting with empty index"),
    }

    // 2. Load sync cursor
    let cursor_state = db.load_cursor().expect("failed to load cursor");

    let state: SharedState = Arc::new(AppState { db });

    // 3. Spawn poller
    let poller_state = state.clone();
    let poller_rpc = rpc_url.clone();
    let poller_contract = contract_id.clone();
    tokio::spawn(async move {
        poller_loop(poller_state, cursor_state, &poller_rpc, &poller_contract).await;
    });

    // 4. Start HTTP server
    let router = api::router(state);
    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .expect("failed to bind");
    eprintln!("listening on {listen_addr}");
    axum::serve(listener, router).await.expect("server error");
}

async fn poller_loop(
    state: SharedState,
    initial_cursor: Option<(u64, Option<String>)>,
    rpc_url: &str,
    contract_id: &str,
) {
    let client = reqwest::Client::new();

    let (mut start_ledger, mut cursor) = match initial_cursor {
        Some((ledger, c)) => (ledger, c),
        None => {
            // First run: get latest ledger as starting point
            loop {
                match rpc::get_latest_ledger(&client, rpc_url).await {
                    Ok(seq) => {
                        eprintln!("no cursor, starting from ledger {seq}");
                        break (seq, None);
                    }
                    Err(e) => {
                        eprintln!("failed to get latest ledger: {e}, retrying...");
                        tokio::time::sleep(POLL_INTERVAL).await;
                    }
                }
            }
        }
    };

    loop {
        tokio::time::sleep(POLL_INTERVAL).await;

        let result = match rpc::poll_events(
            &client,
            rpc_url,
            contract_id,
            start_ledger,
            cursor.as_deref(),
        )
        .await
        {
            Ok(r) => r,
            Err(e) => {
                eprintln!("poll error: {e}");
                continue;
            }
        };

        if !result.events.is_empty() {
            for ev in &result.events {
                let row = RegistrationRow {
                    fingerprint: ev.fingerprint,
                    uri: ev.uri.clone(),
                    owner: ev.owner.clone(),
                    registered_at: ev.timestamp,
                    ledger: ev.ledger,
                };
                if let Err(e) = state.db.insert_registration(&row) {
                    eprintln!("db insert error: {e}");
                }
            }
            eprintln!("indexed {} registration events", result.events.len());
        }

        start_ledger = result.latest_ledger;
        cursor = result.cursor.clone();

        // Persist cursor
        if let Err(e) = state.db.save_cursor(start_ledger, cursor.as_deref()) {
            eprintln!("save cursor error: {e}");
        }
    }
}
