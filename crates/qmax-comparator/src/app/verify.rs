//! Exhaustive verification
//!
//! Runs the comparator on every operand pair of a small width and checks the
//! answer against `i64::max`.

use crate::app::compare::{ComparatorError, run_comparison};
use crate::config::{ComparatorConfig, EncodingMode, validate_width};
use crate::constants::MAX_EXHAUSTIVE_WIDTH;
use crate::domain::encoding::operand_range;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// A pair the comparator answered incorrectly
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mismatch {
    pub number_1: i64,
    pub number_2: i64,
    pub expected: i64,
    pub found: i64,
}

/// Result of an exhaustive run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationReport {
    pub width: u32,
    pub encoding: EncodingMode,
    pub pairs_checked: u64,
    /// Sorted by operands
    pub mismatches: Vec<Mismatch>,
}

impl VerificationReport {
    pub fn is_ok(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Check every pair of `width`-bit operands
pub fn verify_exhaustive(
    width: u32,
    encoding: EncodingMode,
) -> Result<VerificationReport, ComparatorError> {
    verify_with_progress(width, encoding, |_, _| {})
}

/// Check every pair of `width`-bit operands with a progress callback
///
/// The callback receives `(pairs_done, pairs_total)` after each value of
/// `number_1` and once more at the end. It may be called from any worker
/// thread.
pub fn verify_with_progress<F>(
    width: u32,
    encoding: EncodingMode,
    on_progress: F,
) -> Result<VerificationReport, ComparatorError>
where
    F: Fn(u64, u64) + Sync,
{
    validate_width(width, MAX_EXHAUSTIVE_WIDTH)?;

    let config = ComparatorConfig {
        width,
        encoding,
        seed: Some(0),
        ..ComparatorConfig::default()
    };
    let (min, max) = operand_range(width);
    let row_len = (max - min + 1) as u64;
    let total = row_len * row_len;
    let progress = AtomicU64::new(0);

    debug!(width, ?encoding, total, "starting exhaustive verification");

    let rows: Vec<Vec<Mismatch>> = (min..=max)
        .into_par_iter()
        .map(|number_1| -> Result<Vec<Mismatch>, ComparatorError> {
            let mut mismatches = Vec::new();
            for number_2 in min..=max {
                let found = run_comparison(number_1, number_2, &config)?.larger;
                let expected = number_1.max(number_2);
                if found != expected {
                    mismatches.push(Mismatch {
                        number_1,
                        number_2,
                        expected,
                        found,
                    });
                }
            }
            let done = progress.fetch_add(row_len, Ordering::Relaxed) + row_len;
            on_progress(done, total);
            Ok(mismatches)
        })
        .collect::<Result<_, _>>()?;

    let mismatches: Vec<Mismatch> = rows.into_iter().flatten().collect();
    if !mismatches.is_empty() {
        warn!(width, count = mismatches.len(), "comparator mismatches found");
    }
    on_progress(total, total);

    Ok(VerificationReport {
        width,
        encoding,
        pairs_checked: total,
        mismatches,
    })
}
