// SPDX-License-Identifier: AGPL-3.0-or-later
//! Sample normalization: raw measurement records → canonical µg/L samples.
//!
//! Raw records arrive from forms, batch uploads, and the analysis service
//! with no tidiness guarantees: metal fields may be absent, blank, strings,
//! or in either mg/L or µg/L. Everything downstream
//! ([`crate::water::indices`]) assumes a fixed-width µg/L concentration
//! array, so all coercion and unit conversion happens here — never inside
//! an aggregator.
//!
//! # Operations
//!
//! 1. **Coercion**: every tracked-metal field becomes a finite non-negative
//!    f64; absent, blank, or non-numeric entries default to 0.
//! 2. **Unit resolution**: caller override, then the record's declared
//!    label, then median-based auto-detection (nonzero median < 0.01 reads
//!    as mg/L). Explicit units are the primary path; the heuristic is a
//!    best-effort fallback for legacy uploads.
//! 3. **Negative policy**: reject (default) or clamp to zero with the
//!    clamped metals recorded. Aggregators never see a negative or
//!    non-finite value.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::water::standards::{permissible_ug_l, Metal, Unit};

/// Nonzero-median cutoff below which a sample reads as mg/L.
///
/// BIS limits span 0.001–5 mg/L; field samples reported in mg/L sit well
/// below 0.01 at the median, while µg/L samples sit well above it.
const MG_L_MEDIAN_CUTOFF: f64 = 0.01;

/// Elevation warning threshold: concentration above 10× the permissible
/// limit (dashboard `validateSampleData`).
const ELEVATED_FACTOR: f64 = 10.0;

/// A raw measurement record, exactly as delivered by a caller.
///
/// Metal concentrations are top-level fields keyed by symbol ("As") or
/// element name ("arsenic"); they land in `fields` together with any
/// unrecognized extras, which are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSample {
    /// Caller-assigned sample id.
    #[serde(default)]
    pub id: String,
    /// Free-text sampling location.
    #[serde(default)]
    pub location: String,
    /// Latitude, decimal degrees.
    #[serde(default)]
    pub lat: Option<f64>,
    /// Longitude, decimal degrees.
    #[serde(default)]
    pub lng: Option<f64>,
    /// Sampling date, free-form.
    #[serde(default)]
    pub date: String,
    /// Declared concentration unit label ("mg/L", "µg/L"), if any.
    #[serde(default)]
    pub unit: Option<String>,
    /// Remaining fields, including the per-metal concentrations.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl RawSample {
    /// Build a record from explicit (metal, value) pairs, for direct
    /// callers and tests. Values must be finite.
    #[must_use]
    pub fn from_concentrations(pairs: &[(Metal, f64)], unit: Option<Unit>) -> Self {
        let mut fields = BTreeMap::new();
        for &(metal, value) in pairs {
            fields.insert(metal.symbol().to_string(), Value::from(value));
        }
        Self {
            unit: unit.map(|u| u.label().to_string()),
            fields,
            ..Self::default()
        }
    }
}

/// What to do with a negative concentration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NegativePolicy {
    /// Fail fast with [`Error::NegativeConcentration`] (default).
    #[default]
    Reject,
    /// Clamp to zero and record the metal on the normalized sample.
    ClampToZero,
}

/// Configuration for sample normalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeParams {
    /// Caller-supplied unit override. Takes precedence over the record's
    /// declared label and over auto-detection. Default: `None`.
    pub unit: Option<Unit>,
    /// Negative-concentration policy. Default: [`NegativePolicy::Reject`].
    pub negative_policy: NegativePolicy,
}

/// A normalized sample: fixed-width µg/L concentrations plus provenance.
#[derive(Debug, Clone)]
pub struct CanonicalSample {
    /// Concentration per tracked metal, µg/L, indexed by [`Metal::index`].
    /// Every entry is finite and ≥ 0.
    pub ug_l: [f64; Metal::COUNT],
    /// Unit the raw values were interpreted in.
    pub unit: Unit,
    /// Whether `unit` came from the median heuristic rather than an
    /// explicit declaration.
    pub unit_detected: bool,
    /// How many tracked metals carried a parseable value (completeness
    /// indicator — a sample of all zeros and a sample with no
    /// measurements both compute to zero indices).
    pub provided: usize,
    /// Metals whose negative values were clamped to zero
    /// (only under [`NegativePolicy::ClampToZero`]).
    pub clamped: Vec<Metal>,
    /// Metals above [`ELEVATED_FACTOR`]× their permissible limit.
    pub elevated: Vec<Metal>,
}

impl CanonicalSample {
    /// Concentration in canonical µg/L.
    #[must_use]
    pub fn concentration_ug_l(&self, metal: Metal) -> f64 {
        self.ug_l[metal.index()]
    }

    /// Concentration on the legacy mg/L basis.
    #[must_use]
    pub fn concentration_mg_l(&self, metal: Metal) -> f64 {
        self.ug_l[metal.index()] / 1000.0
    }

    /// Whether every tracked metal carried a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.provided == Metal::COUNT
    }

    /// Build directly from canonical µg/L values, bypassing coercion.
    ///
    /// # Errors
    ///
    /// Rejects non-finite or negative entries — the aggregator invariant
    /// is enforced on every construction path.
    pub fn from_ug_l(ug_l: [f64; Metal::COUNT]) -> Result<Self> {
        for &metal in Metal::all() {
            let value = ug_l[metal.index()];
            if !value.is_finite() {
                return Err(Error::NonFinite {
                    metal: metal.symbol(),
                });
            }
            if value < 0.0 {
                return Err(Error::NegativeConcentration {
                    metal: metal.symbol(),
                    value,
                });
            }
        }
        let elevated = elevated_metals(&ug_l);
        Ok(Self {
            ug_l,
            unit: Unit::MicrogramsPerLiter,
            unit_detected: false,
            provided: Metal::COUNT,
            clamped: Vec::new(),
            elevated,
        })
    }
}

/// Normalize a raw record into a canonical µg/L sample.
///
/// # Errors
///
/// - [`Error::NonFinite`] when a metal field parses to NaN or ±∞.
/// - [`Error::NegativeConcentration`] under the reject policy.
/// - [`Error::UnknownUnit`] when the record declares an unparseable
///   unit label.
pub fn normalize(raw: &RawSample, params: &NormalizeParams) -> Result<CanonicalSample> {
    // Coerce the tracked-metal fields; None = absent or non-numeric.
    let mut values: [Option<f64>; Metal::COUNT] = [None; Metal::COUNT];
    for (key, value) in &raw.fields {
        let Some(metal) = Metal::from_field(key) else {
            continue;
        };
        let Some(parsed) = coerce(value) else {
            continue;
        };
        if !parsed.is_finite() {
            return Err(Error::NonFinite {
                metal: metal.symbol(),
            });
        }
        values[metal.index()] = Some(parsed);
    }

    // Negative policy, before unit detection looks at the values.
    let mut clamped = Vec::new();
    for &metal in Metal::all() {
        if let Some(v) = values[metal.index()] {
            if v < 0.0 {
                match params.negative_policy {
                    NegativePolicy::Reject => {
                        return Err(Error::NegativeConcentration {
                            metal: metal.symbol(),
                            value: v,
                        });
                    }
                    NegativePolicy::ClampToZero => {
                        values[metal.index()] = Some(0.0);
                        clamped.push(metal);
                    }
                }
            }
        }
    }

    // Unit resolution: caller override > declared label > heuristic.
    let declared = match (params.unit, raw.unit.as_deref()) {
        (Some(unit), _) => Some(unit),
        (None, Some(label)) => Some(
            Unit::from_label(label).ok_or_else(|| Error::UnknownUnit(label.to_string()))?,
        ),
        (None, None) => None,
    };
    let (unit, unit_detected) = match declared {
        Some(unit) => (unit, false),
        None => {
            let positives: Vec<f64> = values.iter().flatten().copied().filter(|&v| v > 0.0).collect();
            (detect_unit(&positives), true)
        }
    };

    // Convert to canonical µg/L; absent metals contribute 0.
    let factor = unit.to_ug_l_factor();
    let mut ug_l = [0.0; Metal::COUNT];
    let mut provided = 0;
    for &metal in Metal::all() {
        if let Some(v) = values[metal.index()] {
            ug_l[metal.index()] = v * factor;
            provided += 1;
        }
    }

    let elevated = elevated_metals(&ug_l);
    Ok(CanonicalSample {
        ug_l,
        unit,
        unit_detected,
        provided,
        clamped,
        elevated,
    })
}

/// Median-based unit heuristic over the nonzero values as supplied.
///
/// Upper median (`sorted[n/2]`) below [`MG_L_MEDIAN_CUTOFF`] reads as
/// mg/L; anything else, including an empty list, reads as µg/L
/// (the analysis-service default).
#[must_use]
pub fn detect_unit(positives: &[f64]) -> Unit {
    if positives.is_empty() {
        return Unit::MicrogramsPerLiter;
    }
    let mut sorted = positives.to_vec();
    sorted.sort_by(f64::total_cmp);
    let median = sorted[sorted.len() / 2];
    if median < MG_L_MEDIAN_CUTOFF {
        Unit::MilligramsPerLiter
    } else {
        Unit::MicrogramsPerLiter
    }
}

/// JS-style lenient coercion: numbers pass through, numeric strings
/// parse, everything else (null, bool, objects, junk text) is absent.
fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse().ok()
            }
        }
        _ => None,
    }
}

fn elevated_metals(ug_l: &[f64; Metal::COUNT]) -> Vec<Metal> {
    Metal::all()
        .iter()
        .copied()
        .filter(|&m| ug_l[m.index()] > ELEVATED_FACTOR * permissible_ug_l(m))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_from_json(v: serde_json::Value) -> RawSample {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn coerces_numbers_strings_and_junk() {
        let raw = raw_from_json(json!({
            "id": "S-1",
            "As": 12.5,
            "Pb": "8",
            "Cd": " 1.5 ",
            "Cr": "",
            "Hg": "not-a-number",
            "Ni": null,
        }));
        let sample = normalize(&raw, &NormalizeParams::default()).unwrap();
        assert_eq!(sample.concentration_ug_l(Metal::Arsenic), 12.5);
        assert_eq!(sample.concentration_ug_l(Metal::Lead), 8.0);
        assert_eq!(sample.concentration_ug_l(Metal::Cadmium), 1.5);
        assert_eq!(sample.concentration_ug_l(Metal::Chromium), 0.0);
        assert_eq!(sample.concentration_ug_l(Metal::Mercury), 0.0);
        assert_eq!(sample.concentration_ug_l(Metal::Zinc), 0.0);
        // Only As, Pb, Cd parsed to numbers.
        assert_eq!(sample.provided, 3);
        assert!(!sample.is_complete());
    }

    #[test]
    fn accepts_service_style_element_names() {
        let raw = raw_from_json(json!({ "arsenic": 24.0, "lead": 18.0 }));
        let sample = normalize(&raw, &NormalizeParams::default()).unwrap();
        assert_eq!(sample.concentration_ug_l(Metal::Arsenic), 24.0);
        assert_eq!(sample.concentration_ug_l(Metal::Lead), 18.0);
    }

    #[test]
    fn caller_unit_overrides_detection() {
        let raw = RawSample::from_concentrations(&[(Metal::Arsenic, 0.1)], None);
        let params = NormalizeParams {
            unit: Some(Unit::MilligramsPerLiter),
            ..NormalizeParams::default()
        };
        let sample = normalize(&raw, &params).unwrap();
        assert_eq!(sample.unit, Unit::MilligramsPerLiter);
        assert!(!sample.unit_detected);
        assert_eq!(sample.concentration_ug_l(Metal::Arsenic), 100.0);
    }

    #[test]
    fn declared_label_is_honored() {
        let raw = raw_from_json(json!({ "unit": "mg/L", "As": 0.024 }));
        let sample = normalize(&raw, &NormalizeParams::default()).unwrap();
        assert_eq!(sample.unit, Unit::MilligramsPerLiter);
        assert!((sample.concentration_ug_l(Metal::Arsenic) - 24.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_declared_label_is_rejected() {
        let raw = raw_from_json(json!({ "unit": "ppb", "As": 5.0 }));
        let err = normalize(&raw, &NormalizeParams::default()).unwrap_err();
        assert!(matches!(err, Error::UnknownUnit(_)));
    }

    #[test]
    fn detects_mg_l_from_low_median() {
        let raw = raw_from_json(json!({
            "As": 0.004, "Pb": 0.003, "Hg": 0.0008, "Cd": 0.002,
        }));
        let sample = normalize(&raw, &NormalizeParams::default()).unwrap();
        assert_eq!(sample.unit, Unit::MilligramsPerLiter);
        assert!(sample.unit_detected);
        assert!((sample.concentration_ug_l(Metal::Arsenic) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn detects_ug_l_from_high_median() {
        let raw = raw_from_json(json!({
            "As": 24.0, "Pb": 18.0, "Cr": 90.0, "Fe": 450.0,
        }));
        let sample = normalize(&raw, &NormalizeParams::default()).unwrap();
        assert_eq!(sample.unit, Unit::MicrogramsPerLiter);
        assert!(sample.unit_detected);
        assert_eq!(sample.concentration_ug_l(Metal::Arsenic), 24.0);
    }

    #[test]
    fn all_zero_sample_defaults_to_ug_l() {
        let raw = raw_from_json(json!({ "As": 0, "Pb": 0 }));
        let sample = normalize(&raw, &NormalizeParams::default()).unwrap();
        assert_eq!(sample.unit, Unit::MicrogramsPerLiter);
        assert!(sample.unit_detected);
    }

    #[test]
    fn upper_median_on_even_count() {
        // sorted: [0.004, 0.008, 0.02, 5.0] → sorted[2] = 0.02 → µg/L.
        assert_eq!(
            detect_unit(&[5.0, 0.004, 0.02, 0.008]),
            Unit::MicrogramsPerLiter
        );
        // sorted: [0.002, 0.004, 0.008, 5.0] → sorted[2] = 0.008 → mg/L.
        assert_eq!(
            detect_unit(&[5.0, 0.002, 0.008, 0.004]),
            Unit::MilligramsPerLiter
        );
    }

    #[test]
    fn negative_is_rejected_by_default() {
        let raw = raw_from_json(json!({ "As": -5.0 }));
        let err = normalize(&raw, &NormalizeParams::default()).unwrap_err();
        match err {
            Error::NegativeConcentration { metal, value } => {
                assert_eq!(metal, "As");
                assert_eq!(value, -5.0);
            }
            other => panic!("expected NegativeConcentration, got {other}"),
        }
    }

    #[test]
    fn negative_clamp_is_recorded() {
        let raw = raw_from_json(json!({ "As": -5.0, "Pb": 8.0 }));
        let params = NormalizeParams {
            negative_policy: NegativePolicy::ClampToZero,
            ..NormalizeParams::default()
        };
        let sample = normalize(&raw, &params).unwrap();
        assert_eq!(sample.concentration_ug_l(Metal::Arsenic), 0.0);
        assert_eq!(sample.concentration_ug_l(Metal::Lead), 8.0);
        assert_eq!(sample.clamped, vec![Metal::Arsenic]);
    }

    #[test]
    fn nan_string_is_rejected() {
        let raw = raw_from_json(json!({ "As": "NaN" }));
        let err = normalize(&raw, &NormalizeParams::default()).unwrap_err();
        assert!(matches!(err, Error::NonFinite { metal: "As" }));
    }

    #[test]
    fn elevated_metals_flagged_above_ten_times_limit() {
        // 150 µg/L arsenic = 15× the 10 µg/L limit; lead exactly at 10×
        // stays unflagged (strict inequality).
        let raw = raw_from_json(json!({ "As": 150.0, "Pb": 100.0 }));
        let sample = normalize(&raw, &NormalizeParams::default()).unwrap();
        assert_eq!(sample.elevated, vec![Metal::Arsenic]);
    }

    #[test]
    fn from_ug_l_enforces_invariants() {
        let mut values = [0.0; Metal::COUNT];
        values[Metal::Arsenic.index()] = 24.0;
        let sample = CanonicalSample::from_ug_l(values).unwrap();
        assert_eq!(sample.concentration_ug_l(Metal::Arsenic), 24.0);
        assert!((sample.concentration_mg_l(Metal::Arsenic) - 0.024).abs() < 1e-15);

        values[Metal::Lead.index()] = -1.0;
        assert!(CanonicalSample::from_ug_l(values).is_err());
        values[Metal::Lead.index()] = f64::NAN;
        assert!(CanonicalSample::from_ug_l(values).is_err());
    }
}
