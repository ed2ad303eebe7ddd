// Copyright 2026 docstamp contributors
// Licensed under the Apache License, Version 2.0

//! docstamp-registry: on-chain document provenance registry on Soroban

#![no_std]

mod contract;

pub use contract::*;
