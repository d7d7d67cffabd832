// SPDX-License-Identifier: AGPL-3.0-or-later
//! Sample normalizer vs dashboard & service behavior.
//!
//! # Provenance
//!
//! | Item            | Value                                               |
//! |-----------------|-----------------------------------------------------|
//! | Baseline (JS)   | dashboard `utils/hmpi.js` `autoDetectUnit`,         |
//! |                 | `validateSampleData`                                |
//! | Baseline (Py)   | service `water_quality_model.py` `detect_unit`,     |
//! |                 | `convert_to_ugL`                                    |
//! | Date            | 2026-07-15                                          |
//!
//! Covers lenient coercion, unit resolution (explicit beats heuristic),
//! the negative-concentration policies, and the completeness and
//! elevation indicators.

use serde_json::json;

use deepspring_barracuda::tolerances;
use deepspring_barracuda::validation::Validator;
use deepspring_barracuda::water::sample::{
    detect_unit, normalize, NegativePolicy, NormalizeParams, RawSample,
};
use deepspring_barracuda::water::standards::{Metal, Unit};

fn raw(value: serde_json::Value) -> RawSample {
    match serde_json::from_value(value) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("fixture deserialization failed: {err}");
            std::process::exit(1);
        }
    }
}

fn main() {
    let mut v = Validator::new("Sample normalizer vs dashboard baseline");

    // ── Section 1: Lenient coercion ─────────────────────────────
    v.section("── Coercion (absent / blank / junk → 0) ──");
    let messy = raw(json!({
        "id": "W-11",
        "unit": "µg/L",
        "As": 12.5,
        "Pb": "8",
        "Cd": " 1.5 ",
        "Cr": "",
        "Hg": "n/a",
        "Ni": null,
    }));
    match normalize(&messy, &NormalizeParams::default()) {
        Ok(sample) => {
            v.check(
                "As (number)",
                sample.concentration_ug_l(Metal::Arsenic),
                12.5,
                tolerances::EXACT,
            );
            v.check(
                "Pb (numeric string)",
                sample.concentration_ug_l(Metal::Lead),
                8.0,
                tolerances::EXACT,
            );
            v.check(
                "Cd (padded string)",
                sample.concentration_ug_l(Metal::Cadmium),
                1.5,
                tolerances::EXACT,
            );
            v.check(
                "Cr (blank)",
                sample.concentration_ug_l(Metal::Chromium),
                0.0,
                tolerances::EXACT,
            );
            v.check(
                "Hg (junk text)",
                sample.concentration_ug_l(Metal::Mercury),
                0.0,
                tolerances::EXACT,
            );
            v.check_count("metals provided", sample.provided, 3);
        }
        Err(err) => {
            eprintln!("unexpected rejection: {err}");
            v.check_count("coercion sample accepted", 0, 1);
        }
    }

    // ── Section 2: Unit resolution ──────────────────────────────
    v.section("── Unit resolution ──");
    v.check_label(
        "low-median heuristic",
        detect_unit(&[0.004, 0.003, 0.0008, 0.002]).label(),
        "mg/L",
    );
    v.check_label(
        "high-median heuristic",
        detect_unit(&[24.0, 18.0, 90.0, 450.0]).label(),
        "µg/L",
    );
    v.check_label(
        "empty defaults to canonical",
        detect_unit(&[]).label(),
        "µg/L",
    );

    // Declared label wins over what the heuristic would say.
    let declared = raw(json!({ "unit": "mg/L", "As": 0.1 }));
    if let Ok(sample) = normalize(&declared, &NormalizeParams::default()) {
        v.check_label("declared unit honored", sample.unit.label(), "mg/L");
        v.check_count("declared ⇒ not heuristic", usize::from(sample.unit_detected), 0);
        v.check(
            "mg/L converted to µg/L",
            sample.concentration_ug_l(Metal::Arsenic),
            100.0,
            tolerances::ANALYTICAL_F64,
        );
    }

    // Caller override beats even the declared label.
    let override_params = NormalizeParams {
        unit: Some(Unit::MicrogramsPerLiter),
        ..NormalizeParams::default()
    };
    let mislabeled = raw(json!({ "unit": "mg/L", "As": 24.0 }));
    if let Ok(sample) = normalize(&mislabeled, &override_params) {
        v.check(
            "caller override (no conversion)",
            sample.concentration_ug_l(Metal::Arsenic),
            24.0,
            tolerances::EXACT,
        );
    }

    // ── Section 3: Negative policy ──────────────────────────────
    v.section("── Negative concentrations ──");
    let negative = raw(json!({ "As": -5.0, "Pb": 8.0 }));
    let rejected = normalize(&negative, &NormalizeParams::default()).is_err();
    v.check_count("reject policy fails fast", usize::from(rejected), 1);

    let clamp_params = NormalizeParams {
        negative_policy: NegativePolicy::ClampToZero,
        ..NormalizeParams::default()
    };
    match normalize(&negative, &clamp_params) {
        Ok(sample) => {
            v.check(
                "clamped to zero",
                sample.concentration_ug_l(Metal::Arsenic),
                0.0,
                tolerances::EXACT,
            );
            v.check_count("clamp recorded", sample.clamped.len(), 1);
            v.check_label(
                "clamped metal",
                sample.clamped[0].symbol(),
                "As",
            );
        }
        Err(err) => {
            eprintln!("unexpected rejection under clamp policy: {err}");
            v.check_count("clamp sample accepted", 0, 1);
        }
    }

    // NaN never reaches the aggregators under either policy.
    let non_finite = raw(json!({ "unit": "µg/L", "Hg": "NaN" }));
    let nan_rejected = normalize(&non_finite, &clamp_params).is_err();
    v.check_count("non-finite rejected", usize::from(nan_rejected), 1);

    // ── Section 4: Elevation warnings ───────────────────────────
    v.section("── Elevation warnings (>10× limit) ──");
    let elevated = raw(json!({ "unit": "µg/L", "As": 150.0, "Pb": 100.0 }));
    if let Ok(sample) = normalize(&elevated, &NormalizeParams::default()) {
        v.check_count("one metal flagged", sample.elevated.len(), 1);
        v.check_label("flagged metal", sample.elevated[0].symbol(), "As");
    }

    v.finish();
}
