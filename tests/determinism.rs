// SPDX-License-Identifier: AGPL-3.0-or-later
//! Determinism tests: rerun identical inputs, expect bitwise-identical
//! output via `to_bits()` equality.

use deepspring_barracuda::water::batch::{compute_batch, normalize_batch};
use deepspring_barracuda::water::indices::{
    compute_indices, contamination_factors, legacy_indices, modern_indices, IndexScheme,
};
use deepspring_barracuda::water::sample::{normalize, NormalizeParams, RawSample};
use deepspring_barracuda::water::standards::{Metal, Unit};

fn field_sample() -> RawSample {
    RawSample::from_concentrations(
        &[
            (Metal::Arsenic, 0.024),
            (Metal::Lead, 0.018),
            (Metal::Cadmium, 0.004),
            (Metal::Chromium, 0.09),
            (Metal::Mercury, 0.002),
            (Metal::Nickel, 0.05),
            (Metal::Copper, 0.8),
            (Metal::Zinc, 1.2),
            (Metal::Iron, 0.45),
            (Metal::Manganese, 0.16),
        ],
        Some(Unit::MilligramsPerLiter),
    )
}

#[test]
fn contamination_factors_deterministic_across_runs() {
    let sample = normalize(&field_sample(), &NormalizeParams::default()).unwrap();
    let run1 = contamination_factors(&sample);
    let run2 = contamination_factors(&sample);
    for (a, b) in run1.iter().zip(run2.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn modern_indices_deterministic_across_runs() {
    let sample = normalize(&field_sample(), &NormalizeParams::default()).unwrap();
    let run1 = modern_indices(&sample);
    let run2 = modern_indices(&sample);
    assert_eq!(run1.hmpi.to_bits(), run2.hmpi.to_bits());
    assert_eq!(run1.pli.to_bits(), run2.pli.to_bits());
    assert_eq!(run1.cf.to_bits(), run2.cf.to_bits());
    assert_eq!(run1.hmpi_class.label, run2.hmpi_class.label);
}

#[test]
fn legacy_indices_deterministic_across_runs() {
    let sample = normalize(&field_sample(), &NormalizeParams::default()).unwrap();
    let run1 = legacy_indices(&sample);
    let run2 = legacy_indices(&sample);
    assert_eq!(run1.hpi.to_bits(), run2.hpi.to_bits());
    assert_eq!(run1.hei.to_bits(), run2.hei.to_bits());
    assert_eq!(run1.cd.to_bits(), run2.cd.to_bits());
    assert_eq!(run1.mpi.to_bits(), run2.mpi.to_bits());
    assert_eq!(run1.npi.to_bits(), run2.npi.to_bits());
}

#[test]
fn full_pipeline_deterministic_across_runs() {
    let run = || {
        let sample = normalize(&field_sample(), &NormalizeParams::default()).unwrap();
        compute_indices(&sample, IndexScheme::Both)
    };
    let r1 = run();
    let r2 = run();
    let (m1, m2) = (r1.modern.unwrap(), r2.modern.unwrap());
    assert_eq!(m1.hmpi.to_bits(), m2.hmpi.to_bits());
    assert_eq!(m1.pli.to_bits(), m2.pli.to_bits());
    assert_eq!(m1.cf.to_bits(), m2.cf.to_bits());
    let (l1, l2) = (r1.legacy.unwrap(), r2.legacy.unwrap());
    assert_eq!(l1.hpi.to_bits(), l2.hpi.to_bits());
    assert_eq!(l1.mpi.to_bits(), l2.mpi.to_bits());
    assert_eq!(l1.npi.to_bits(), l2.npi.to_bits());
}

#[test]
fn parallel_batch_deterministic_across_runs() {
    // Thread scheduling must not leak into results or their order.
    let raws: Vec<RawSample> = (0..64)
        .map(|i| {
            RawSample::from_concentrations(
                &[
                    (Metal::Arsenic, f64::from(i % 17) * 1.3),
                    (Metal::Lead, f64::from(i % 7) * 4.1),
                    (Metal::Iron, f64::from(i) * 11.0),
                ],
                Some(Unit::MicrogramsPerLiter),
            )
        })
        .collect();
    let (samples, failures) = normalize_batch(&raws, &NormalizeParams::default());
    assert!(failures.is_empty());

    let run1 = compute_batch(&samples, IndexScheme::Modern);
    let run2 = compute_batch(&samples, IndexScheme::Modern);
    assert_eq!(run1.len(), run2.len());
    for (a, b) in run1.iter().zip(run2.iter()) {
        let (ma, mb) = (a.modern.as_ref().unwrap(), b.modern.as_ref().unwrap());
        assert_eq!(ma.hmpi.to_bits(), mb.hmpi.to_bits());
        assert_eq!(ma.pli.to_bits(), mb.pli.to_bits());
        assert_eq!(ma.cf.to_bits(), mb.cf.to_bits());
    }
}

#[test]
fn serialized_result_deterministic_across_runs() {
    // Export views compare stored JSON against recomputed JSON.
    let sample = normalize(&field_sample(), &NormalizeParams::default()).unwrap();
    let json1 = serde_json::to_string(&compute_indices(&sample, IndexScheme::Both)).unwrap();
    let json2 = serde_json::to_string(&compute_indices(&sample, IndexScheme::Both)).unwrap();
    assert_eq!(json1, json2);
}
