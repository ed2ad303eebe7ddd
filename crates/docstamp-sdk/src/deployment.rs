// Copyright 2026 docstamp contributors
// Licensed under the Apache License, Version 2.0

//! Deployment artifact loader.
//!
//! Deploy tooling writes a JSON file exposing at least
//! `{ "address": "<deployed contract address>" }`; the façade reads it to
//! locate the registry. Extra fields are ignored.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{DocError, DocResult};

#[derive(Deserialize)]
struct Artifact {
    address: String,
}

pub fn load_contract_address(path: &Path) -> DocResult<String> {
    let data = fs::read_to_string(path).map_err(|e| {
        DocError::Config(format!("cannot read artifact {}: {e}", path.display()))
    })?;
    let artifact: Artifact = serde_json::from_str(&data)
        .map_err(|e| DocError::Config(format!("invalid artifact JSON: {e}")))?;
    if artifact.address.is_empty() {
        return Err(DocError::Config("artifact has an empty address".to_string()));
    }
    Ok(artifact.address)
}
