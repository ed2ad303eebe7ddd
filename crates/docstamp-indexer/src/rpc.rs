use base64::{engine::general_purpose::STANDARD as B64, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use stellar_xdr::curr::{
    AccountId, Limits, PublicKey, ReadXdr, ScAddress, ScVal, WriteXdr,
};

/// A decoded `register` event.
#[derive(Debug, PartialEq, Eq)]
pub struct RegistrationEvent {
    pub fingerprint: [u8; 32],
    pub uri: String,
    /// Strkey form of the submitting address.
    pub owner: String,
    /// Ledger timestamp from the contract (unix seconds).
    pub timestamp: u64,
    pub ledger: u64,
}

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'a str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct GetEventsResult {
    events: Vec<RpcEvent>,
    #[serde(rename = "latestLedger")]
    latest_ledger: String,
}

#[derive(Deserialize)]
struct RpcEvent {
    #[serde(rename = "ledger")]
    ledger: String,
    value: String,
    #[serde(rename = "pagingToken")]
    paging_token: Option<String>,
}

#[derive(Deserialize)]
struct GetLatestLedgerResult {
    sequence: u64,
}

pub struct PollResult {
    pub events: Vec<RegistrationEvent>,
    pub latest_ledger: u64,
    pub cursor: Option<String>,
}

pub async fn get_latest_ledger(client: &Client, rpc_url: &str) -> anyhow::Result<u64> {
    let req = JsonRpcRequest {
        jsonrpc: "2.0",
        id: 1,
        method: "getLatestLedger",
        params: serde_json::json!({}),
    };
    let resp: JsonRpcResponse<GetLatestLedgerResult> =
        client.post(rpc_url).json(&req).send().await?.json().await?;
    match resp.result {
        Some(r) => Ok(r.sequence),
        None => Err(anyhow::anyhow!("getLatestLedger error: {:?}", resp.error)),
    }
}

fn build_topic_filter(contract_id: &str) -> serde_json::Value {
    // Encode Symbol("register") as XDR -> base64
    let topic_xdr = ScVal::Symbol(stellar_xdr::curr::ScSymbol("register".try_into().unwrap()));
    let buf = topic_xdr.to_xdr(Limits::none()).unwrap();
    let topic_b64 = B64.encode(&buf);

    serde_json::json!([{
        "type": "contract",
        "contractIds": [contract_id],
        "topics": [[topic_b64]]
    }])
}

pub async fn poll_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u64,
    cursor: Option<&str>,
) -> anyhow::Result<PollResult> {
    let filters = build_topic_filter(contract_id);

    let mut params = serde_json::json!({
        "filters": filters,
        "pagination": { "limit": 100 }
    });

    if let Some(c) = cursor {
        params["pagination"]["cursor"] = serde_json::json!(c);
    } else {
        params["startLedger"] = serde_json::json!(start_ledger);
    }

    let req = JsonRpcRequest {
        jsonrpc: "2.0",
        id: 1,
        method: "getEvents",
        params,
    };

    let resp: JsonRpcResponse<GetEventsResult> =
        client.post(rpc_url).json(&req).send().await?.json().await?;

    let result = match resp.result {
        Some(r) => r,
        None => return Err(anyhow::anyhow!("getEvents error: {:?}", resp.error)),
    };

    let latest_ledger = result.latest_ledger.parse::<u64>()?;
    let mut events = Vec::new();
    let mut last_cursor = None;

    for ev in &result.events {
        last_cursor = ev.paging_token.clone();
        let ledger = ev.ledger.parse::<u64>()?;
        match parse_register_value(&ev.value, ledger) {
            Ok(re) => events.push(re),
            Err(e) => eprintln!("skip event parse: {e}"),
        }
    }

    Ok(PollResult {
        events,
        latest_ledger,
        cursor: last_cursor,
    })
}

/// Decode a `RegisterEvent` contract struct, which arrives as an
/// `ScVal::Map` keyed by field name.
pub fn parse_register_value(value_b64: &str, ledger: u64) -> anyhow::Result<RegistrationEvent> {
    let xdr_bytes = B64.decode(value_b64)?;
    let sc_val = ScVal::from_xdr(&xdr_bytes, Limits::none())?;

    let map = match sc_val {
        ScVal::Map(Some(map)) => map,
        other => return Err(anyhow::anyhow!("unexpected event value shape: {other:?}")),
    };

    let mut fingerprint = None;
    let mut uri = None;
    let mut owner = None;
    let mut timestamp = None;

    for entry in map.iter() {
        let Some(key) = symbol_name(&entry.key) else {
            continue;
        };
        match key.as_str() {
            "fingerprint" => fingerprint = Some(extract_bytes32(&entry.val, "fingerprint")?),
            "uri" => uri = Some(extract_string(&entry.val, "uri")?),
            "owner" => owner = Some(extract_address(&entry.val)?),
            "timestamp" => timestamp = Some(extract_u64(&entry.val, "timestamp")?),
            _ => {}
        }
    }

    Ok(RegistrationEvent {
        fingerprint: fingerprint.ok_or_else(|| anyhow::anyhow!("event missing fingerprint"))?,
        uri: uri.ok_or_else(|| anyhow::anyhow!("event missing uri"))?,
        owner: owner.ok_or_else(|| anyhow::anyhow!("event missing owner"))?,
        timestamp: timestamp.ok_or_else(|| anyhow::anyhow!("event missing timestamp"))?,
        ledger,
    })
}

fn symbol_name(val: &ScVal) -> Option<String> {
    match val {
        ScVal::Symbol(s) => Some(s.0.to_utf8_string_lossy()),
        _ => None,
    }
}

fn extract_bytes32(val: &ScVal, name: &str) -> anyhow::Result<[u8; 32]> {
    match val {
        ScVal::Bytes(b) => {
            let slice: &[u8] = b.as_ref();
            slice
                .try_into()
                .map_err(|_| anyhow::anyhow!("{name}: expected 32 bytes, got {}", slice.len()))
        }
        _ => Err(anyhow::anyhow!("{name}: expected Bytes, got {val:?}")),
    }
}

fn extract_string(val: &ScVal, name: &str) -> anyhow::Result<String> {
    match val {
        ScVal::String(s) => Ok(s.0.to_utf8_string_lossy()),
        _ => Err(anyhow::anyhow!("{name}: expected String, got {val:?}")),
    }
}

fn extract_u64(val: &ScVal, name: &str) -> anyhow::Result<u64> {
    match val {
        ScVal::U64(n) => Ok(*n),
        _ => Err(anyhow::anyhow!("{name}: expected U64, got {val:?}")),
    }
}

fn extract_address(val: &ScVal) -> anyhow::Result<String> {
    let ScVal::Address(addr) = val else {
        return Err(anyhow::anyhow!("owner: expected Address, got {val:?}"));
    };
    match addr {
        ScAddress::Account(AccountId(PublicKey::PublicKeyTypeEd25519(key))) => {
            Ok(stellar_strkey::ed25519::PublicKey(key.0).to_string())
        }
        ScAddress::Contract(contract) => {
            Ok(stellar_strkey::Contract(contract.0 .0).to_string())
        }
        other => Err(anyhow::anyhow!("owner: unsupported address {other:?}")),
    }
}
