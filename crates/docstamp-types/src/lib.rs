// Copyright 2026 docstamp contributors
// Licensed under the Apache License, Version 2.0

//! docstamp-types: shared types for the docstamp provenance registry

pub mod fingerprint;

pub use fingerprint::{Fingerprint, FingerprintParseError, FINGERPRINT_LEN};
