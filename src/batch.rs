//! Batch decoding.
//!
//! Decodes many codes independently, one per input line, and writes one
//! JSON object per code. Decodes share nothing, so they run on a rayon pool
//! when more than one thread is configured. Output order always follows
//! input order.

use std::io::Write;

use serde::Serialize;

use crate::protocol::qfcode::{decode, decode_strict, Decoded};
use crate::validate::{validate, RangeWarning};

/// Configuration for batch decoding.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of worker threads. 1 decodes on the calling thread.
    pub threads: usize,
    /// Reject codes with out-of-range values instead of warning.
    pub strict: bool,
    /// Suppress the summary on stderr.
    pub quiet: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            threads: 4,
            strict: false,
            quiet: false,
        }
    }
}

/// Errors that stop a batch before any code is decoded.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to build thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// The outcome of decoding one input line.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRecord {
    /// 1-based line number in the input.
    pub line: usize,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded: Option<Decoded>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RangeWarning>,
}

impl BatchRecord {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Decodes one code into a record.
pub fn decode_record(line: usize, code: &str, strict: bool) -> BatchRecord {
    let result = if strict { decode_strict(code) } else { decode(code) };
    match result {
        Ok(decoded) => BatchRecord {
            line,
            code: code.to_string(),
            warnings: validate(&decoded),
            decoded: Some(decoded),
            error: None,
        },
        Err(e) => BatchRecord {
            line,
            code: code.to_string(),
            decoded: None,
            error: Some(e.to_string()),
            warnings: Vec::new(),
        },
    }
}

/// Decodes every non-empty line of `lines`.
///
/// When `config.threads > 1`, lines are decoded concurrently using rayon.
/// Records come back in input order either way.
pub fn decode_batch<S>(lines: &[S], config: &BatchConfig) -> Result<Vec<BatchRecord>, BatchError>
where
    S: AsRef<str> + Sync,
{
    let work: Vec<(usize, &str)> = lines
        .iter()
        .enumerate()
        .map(|(i, l)| (i + 1, l.as_ref().trim()))
        .filter(|(_, code)| !code.is_empty())
        .collect();

    if config.threads <= 1 {
        return Ok(work
            .iter()
            .map(|&(line, code)| decode_record(line, code, config.strict))
            .collect());
    }

    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    Ok(pool.install(|| {
        work.par_iter()
            .map(|&(line, code)| decode_record(line, code, config.strict))
            .collect()
    }))
}

/// Writes records as JSONL (one JSON object per record, one per line).
pub fn write_jsonl<W: Write>(records: &[BatchRecord], out: &mut W) -> std::io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Counts of batch outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub decoded: usize,
    pub failed: usize,
    pub with_warnings: usize,
    pub record_entries: usize,
}

/// Tallies a finished batch.
pub fn summarize(records: &[BatchRecord]) -> BatchSummary {
    let mut summary = BatchSummary {
        total: records.len(),
        ..Default::default()
    };
    for record in records {
        match &record.decoded {
            Some(decoded) => {
                summary.decoded += 1;
                summary.record_entries += decoded.log.as_ref().map_or(0, |l| l.len());
            }
            None => summary.failed += 1,
        }
        if !record.warnings.is_empty() {
            summary.with_warnings += 1;
        }
    }
    summary
}

/// Prints a summary of batch results to stderr.
pub fn print_summary(records: &[BatchRecord]) {
    let summary = summarize(records);
    eprintln!("=== Batch Summary ===");
    eprintln!("Codes: {}", summary.total);
    eprintln!("Decoded: {}", summary.decoded);
    eprintln!("Failed: {}", summary.failed);
    eprintln!("With warnings: {}", summary.with_warnings);
    eprintln!(
        "Avg record entries/code: {:.1}",
        summary.record_entries as f64 / summary.decoded.max(1) as f64
    );
}
