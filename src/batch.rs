//! Batch conversion: many values per call, optionally in parallel.
//!
//! # Parallel conversion
//!
//! With the `parallel` feature, [`encode_many`] and [`decode_many`] fan the
//! inputs out over the global Rayon pool.  Every conversion is pure, so the
//! only observable difference is throughput: records always come back in
//! input order, one per input, and a failing line never aborts the batch.
//!
//! # Line input
//!
//! [`read_lines`] turns a text stream into numbered inputs.  Lines are
//! trimmed; blank lines and lines starting with `#` are skipped but still
//! counted, so `line` in a [`BatchRecord`] matches what an editor shows.
//! A line that is not valid UTF-8 becomes a failed record of its own; only
//! real I/O errors abort the read.

use std::io::{self, BufRead};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::{decode, encode_with, CodecError, EncodeOptions};

/// Which way a batch converts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

/// One numbered input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchInput {
    pub line:  usize,
    pub value: String,
    /// Set when the line could not be read as text; `value` then holds a
    /// lossy rendering and no conversion is attempted.
    pub error: Option<String>,
}

impl BatchInput {
    pub fn new(line: usize, value: impl Into<String>) -> Self {
        Self { line, value: value.into(), error: None }
    }
}

/// Outcome of converting one input.  Exactly one of `output` / `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub line:   usize,
    pub input:  String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error:  Option<String>,
}

impl BatchRecord {
    fn convert<F>(input: &BatchInput, convert: &F) -> Self
    where
        F: Fn(&str) -> Result<String, CodecError>,
    {
        let (output, error) = match &input.error {
            Some(e) => (None, Some(e.clone())),
            None => match convert(&input.value) {
                Ok(out) => (Some(out), None),
                Err(e)  => (None, Some(e.to_string())),
            },
        };
        Self { line: input.line, input: input.value.clone(), output, error }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Read numbered inputs from `reader` (1-based line numbers).
pub fn read_lines<R: BufRead>(reader: R) -> io::Result<Vec<BatchInput>> {
    let mut inputs = Vec::new();
    for (i, raw) in reader.split(b'\n').enumerate() {
        let line = i + 1;
        match String::from_utf8(raw?) {
            Ok(text) => {
                let value = text.trim();
                if value.is_empty() || value.starts_with('#') {
                    continue;
                }
                inputs.push(BatchInput::new(line, value));
            }
            Err(e) => {
                let value = String::from_utf8_lossy(e.as_bytes()).trim().to_string();
                debug!(line, "unreadable batch line");
                inputs.push(BatchInput {
                    line,
                    value,
                    error: Some(format!("invalid UTF-8: {}", e.utf8_error())),
                });
            }
        }
    }
    Ok(inputs)
}

/// Number of records that carry an error.
pub fn failed_count(records: &[BatchRecord]) -> usize {
    records.iter().filter(|r| !r.is_ok()).count()
}

/// Encode every input address.
pub fn encode_many(inputs: &[BatchInput], opts: &EncodeOptions) -> Vec<BatchRecord> {
    run(inputs, |s| encode_with(s, opts))
}

/// Decode every input value.
pub fn decode_many(inputs: &[BatchInput]) -> Vec<BatchRecord> {
    run(inputs, decode)
}

/// Convert in `direction`; `opts` only matters when encoding.
pub fn convert_many(
    inputs:    &[BatchInput],
    direction: Direction,
    opts:      &EncodeOptions,
) -> Vec<BatchRecord> {
    match direction {
        Direction::Encode => encode_many(inputs, opts),
        Direction::Decode => decode_many(inputs),
    }
}

fn run<F>(inputs: &[BatchInput], convert: F) -> Vec<BatchRecord>
where
    F: Fn(&str) -> Result<String, CodecError> + Sync,
{
    #[cfg(feature = "parallel")]
    let records: Vec<BatchRecord> = {
        use rayon::prelude::*;

        inputs
            .par_iter()
            .map(|input| BatchRecord::convert(input, &convert))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let records: Vec<BatchRecord> = inputs
        .iter()
        .map(|input| BatchRecord::convert(input, &convert))
        .collect();

    let failed = failed_count(&records);
    debug!(total = records.len(), failed, "batch finished");
    records
}
