// SPDX-License-Identifier: AGPL-3.0-or-later
//! Batch evaluation over many samples.
//!
//! Index computation is a pure function of one sample, so a batch is an
//! embarrassingly parallel map — rayon splits the work, output order
//! matches input order. Rows that fail normalization are reported by
//! index and skipped, the way the analysis service skips malformed rows
//! in an uploaded file instead of aborting the batch.

use rayon::prelude::*;

use crate::error::Error;
use crate::water::indices::{compute_indices, IndexResult, IndexScheme};
use crate::water::sample::{normalize, CanonicalSample, NormalizeParams, RawSample};

/// Normalize a batch of raw records.
///
/// Returns the successfully normalized samples (input order preserved)
/// and the failed rows as (input index, error) pairs.
#[must_use]
pub fn normalize_batch(
    raws: &[RawSample],
    params: &NormalizeParams,
) -> (Vec<CanonicalSample>, Vec<(usize, Error)>) {
    let mut samples = Vec::with_capacity(raws.len());
    let mut failures = Vec::new();
    for (i, raw) in raws.iter().enumerate() {
        match normalize(raw, params) {
            Ok(sample) => samples.push(sample),
            Err(err) => failures.push((i, err)),
        }
    }
    (samples, failures)
}

/// Compute indices for every sample in parallel, preserving order.
#[must_use]
pub fn compute_batch(samples: &[CanonicalSample], scheme: IndexScheme) -> Vec<IndexResult> {
    samples
        .par_iter()
        .map(|sample| compute_indices(sample, scheme))
        .collect()
}

/// Pollution-level counts across a batch, as the dashboard summarizes an
/// upload. Counted from the modern HMPI class; results computed without
/// the modern set are tallied as unclassified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelSummary {
    /// Total results tallied.
    pub samples: usize,
    /// HMPI class Safe.
    pub safe: usize,
    /// HMPI class Moderate.
    pub moderate: usize,
    /// HMPI class Critical.
    pub critical: usize,
    /// Results carrying no modern index set.
    pub unclassified: usize,
}

/// Tally HMPI pollution levels over a batch of results.
#[must_use]
pub fn summarize_levels(results: &[IndexResult]) -> LevelSummary {
    let mut summary = LevelSummary {
        samples: results.len(),
        ..LevelSummary::default()
    };
    for result in results {
        match result.modern.as_ref().map(|m| m.hmpi_class.label) {
            Some("Safe") => summary.safe += 1,
            Some("Moderate") => summary.moderate += 1,
            Some(_) => summary.critical += 1,
            None => summary.unclassified += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::water::standards::{Metal, Unit};

    fn raw(as_ug_l: f64) -> RawSample {
        RawSample::from_concentrations(
            &[(Metal::Arsenic, as_ug_l)],
            Some(Unit::MicrogramsPerLiter),
        )
    }

    #[test]
    fn batch_preserves_input_order() {
        let raws: Vec<RawSample> = (0..50).map(|i| raw(f64::from(i))).collect();
        let (samples, failures) = normalize_batch(&raws, &NormalizeParams::default());
        assert!(failures.is_empty());
        let results = compute_batch(&samples, IndexScheme::Modern);
        assert_eq!(results.len(), 50);
        for (i, result) in results.iter().enumerate() {
            let cf = result.modern.as_ref().unwrap().cf;
            // cf(As) = i/10 for the i-th sample.
            assert!((cf - f64::from(i as u32) / 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn failed_rows_are_reported_and_skipped() {
        let mut raws = vec![raw(5.0), raw(10.0)];
        raws.insert(1, raw(-3.0));
        let (samples, failures) = normalize_batch(&raws, &NormalizeParams::default());
        assert_eq!(samples.len(), 2);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, 1);
        assert!(matches!(
            failures[0].1,
            Error::NegativeConcentration { metal: "As", .. }
        ));
    }

    #[test]
    fn parallel_batch_matches_sequential() {
        let raws: Vec<RawSample> = (0..20).map(|i| raw(f64::from(i) * 7.5)).collect();
        let (samples, _) = normalize_batch(&raws, &NormalizeParams::default());
        let parallel = compute_batch(&samples, IndexScheme::Both);
        for (sample, result) in samples.iter().zip(&parallel) {
            let sequential = compute_indices(sample, IndexScheme::Both);
            let (p, s) = (
                result.modern.as_ref().unwrap(),
                sequential.modern.as_ref().unwrap(),
            );
            assert_eq!(p.hmpi.to_bits(), s.hmpi.to_bits());
            assert_eq!(p.pli.to_bits(), s.pli.to_bits());
            assert_eq!(p.cf.to_bits(), s.cf.to_bits());
        }
    }

    #[test]
    fn level_summary_tallies_hmpi_classes() {
        // cf 0.5 → HMPI 50 Safe; cf 1.5 → 150 Moderate; cf 2.5 → 250 Critical.
        let raws = vec![raw(5.0), raw(15.0), raw(25.0), raw(0.0)];
        let (samples, _) = normalize_batch(&raws, &NormalizeParams::default());
        let results = compute_batch(&samples, IndexScheme::Modern);
        let summary = summarize_levels(&results);
        assert_eq!(summary.samples, 4);
        // The all-zero sample classifies Safe (HMPI 0).
        assert_eq!(summary.safe, 2);
        assert_eq!(summary.moderate, 1);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.unclassified, 0);

        let legacy_only = compute_batch(&samples, IndexScheme::Legacy);
        assert_eq!(summarize_levels(&legacy_only).unclassified, 4);
    }
}
