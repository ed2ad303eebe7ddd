use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use docstamp_types::Fingerprint;
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::db::{Db, RegistrationRow};

/// Most rows returned by `/v1/recent`.
const RECENT_LIMIT: usize = 20;

pub struct AppState {
    pub db: Db,
}

pub type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/doc/{fingerprint}", get(get_doc))
        .route("/v1/owner/{owner}", get(get_owner))
        .route("/v1/recent", get(get_recent))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_doc(
    State(state): State<SharedState>,
    Path(fingerprint): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let fp = Fingerprint::from_hex(&fingerprint).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )
    })?;

    match state.db.get_by_fingerprint(fp.as_bytes()) {
        Ok(Some(row)) => Ok(Json(row_json(&row))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "fingerprint not found" })),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

async fn get_owner(
    State(state): State<SharedState>,
    Path(owner): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    match state.db.get_by_owner(&owner) {
        Ok(rows) => {
            let docs: Vec<serde_json::Value> = rows.iter().map(row_json).collect();
            Ok(Json(json!({ "owner": owner, "docs": docs })))
        }
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

async fn get_recent(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    match state.db.recent(RECENT_LIMIT) {
        Ok(rows) => {
            let docs: Vec<serde_json::Value> = rows.iter().map(row_json).collect();
            Ok(Json(json!({ "docs": docs })))
        }
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

fn row_json(row: &RegistrationRow) -> serde_json::Value {
    json!({
        "fingerprint": format!("0x{}", hex::encode(row.fingerprint)),
        "uri": row.uri,
        "owner": row.owner,
        "registered_at": row.registered_at,
        "ledger": row.ledger,
    })
}
