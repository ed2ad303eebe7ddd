use std::path::Path;

use anyhow::{Context, Result};
use docstamp_sdk::client::RegistryClient;
use docstamp_sdk::error::DocError;
use docstamp_sdk::pinning::PinningClient;
use docstamp_sdk::session::Session;
use docstamp_sdk::soroban;
use docstamp_sdk::wallet::{self, HistoryEntry, PLACEHOLDER};

use crate::output;

pub async fn run(file: &Path, uri_override: Option<String>) -> Result<()> {
    let mut wallet = wallet::load_wallet()?;
    let bytes =
        std::fs::read(file).with_context(|| format!("cannot read {}", file.display()))?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file")
        .to_string();

    // Assemble the action snapshot the way the UI would: identity and
    // network first, then the locally computed fingerprint.
    let mut session = Session::new(&wallet.network);
    if wallet.stellar_secret != PLACEHOLDER && !wallet.stellar_secret.is_empty() {
        let owner = soroban::get_public_key(&wallet.stellar_secret)
            .await
            .map_err(|e| DocError::Wallet(e.to_string()))?;
        (session, _) = session.account_changed(&[owner]);
    }
    (session, _) = session.network_changed(&wallet.network);
    session = session.file_selected(&bytes);

    // Refuse before any network call unless the only missing piece is
    // the storage URI, which we are about to obtain.
    if let Err(e) = session.check_register_preconditions() {
        let missing_uri = matches!(&e, DocError::Precondition(msg) if msg.starts_with("pin"));
        if !missing_uri {
            return Err(output::fail_with_hint(
                &e.to_string(),
                "see `docstamp config show` for what is configured",
            ));
        }
    }

    session = match uri_override {
        Some(uri) => session.pinned(&uri),
        None => {
            let pb = output::spinner("uploading to pinning service…");
            let result = PinningClient::from_wallet(&wallet)
                .pin_file(&file_name, bytes)
                .await;
            pb.finish_and_clear();
            session.pinned(&result?.uri)
        }
    };

    session.check_register_preconditions()?;
    let session = session.begin_action()?;

    let fingerprint = session
        .fingerprint
        .ok_or(DocError::Precondition("choose a file first"))?;
    let uri = session
        .uri
        .clone()
        .ok_or(DocError::Precondition("pin the file to storage first"))?;

    let pb = output::spinner("submitting registration…");
    let client = RegistryClient::from_wallet(&wallet)?;
    let result = client.register(&fingerprint, &uri).await;
    pb.finish_and_clear();
    let outcome = result?;

    // Ledger truth, not the optimistic local view.
    let mine = client.my_docs().await?;

    wallet::push_history(
        &mut wallet,
        HistoryEntry {
            fingerprint: outcome.fingerprint.clone(),
            when: wallet::now_millis(),
            tx_hash: outcome.tx_result.clone(),
            owner: outcome.owner.clone(),
            uri: outcome.uri.clone(),
        },
    );
    wallet::save_wallet(&wallet)?;
    let _ = session.end_action();

    if output::is_json() {
        output::json_output(serde_json::json!({
            "fingerprint": outcome.fingerprint,
            "uri": outcome.uri,
            "owner": outcome.owner,
            "on_chain_docs": mine.len(),
        }));
    } else {
        output::success("registered");
        output::label("fingerprint", &outcome.fingerprint);
        output::label("uri", &outcome.uri);
        output::label("owner", &outcome.owner);
        output::label("on-chain docs", &mine.len().to_string());
    }
    Ok(())
}
