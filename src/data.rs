// SPDX-License-Identifier: AGPL-3.0-or-later
//! Sample-batch file loading.
//!
//! Batch files are JSON of the form `{ "samples": [ {...}, ... ] }`,
//! where each entry is a raw sample record (metal fields keyed by symbol
//! or element name, optional `unit` label, free metadata). CSV/Excel
//! ingestion lives with the upload collaborators, not here — by the time
//! a batch reaches this crate it is already JSON-shaped.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::water::sample::RawSample;

#[derive(Debug, Deserialize)]
struct SampleFile {
    samples: Vec<RawSample>,
}

/// Load a batch of raw samples from a JSON file.
///
/// Uses streaming `from_reader` to avoid buffering the file as an
/// intermediate string.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened and [`Error::Json`]
/// if deserialization fails.
pub fn load_samples(path: &Path) -> Result<Vec<RawSample>> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let parsed: SampleFile = serde_json::from_reader(reader).map_err(|err| Error::Json {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    Ok(parsed.samples)
}
