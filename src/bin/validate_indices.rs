// SPDX-License-Identifier: AGPL-3.0-or-later
//! Modern index set (HMPI / PLI / CF) vs dashboard & service baseline.
//!
//! # Provenance
//!
//! | Item            | Value                                               |
//! |-----------------|-----------------------------------------------------|
//! | Baseline (JS)   | dashboard `utils/hmpi.js` `computeAllIndices`       |
//! | Baseline (Py)   | service `water_quality_model.py` comprehensive run  |
//! | Sample          | field sample W-07 (Sanganer block), mg/L            |
//! | Date            | 2026-07-14                                          |
//!
//! The Rust engine must agree with both reference implementations to
//! reporting precision (2 decimals) for the same sample and scheme — the
//! cross-implementation identity the dashboard relies on when it falls
//! back to local computation.

use deepspring_barracuda::tolerances;
use deepspring_barracuda::validation::Validator;
use deepspring_barracuda::water::indices::{
    contamination_factors, heavy_metal_pollution_index, modern_indices, pollution_load_index,
    total_cf,
};
use deepspring_barracuda::water::sample::{normalize, NormalizeParams, RawSample};
use deepspring_barracuda::water::standards::{permissible_ug_l, Metal, Unit};

fn main() {
    let mut v = Validator::new("Modern indices vs dashboard baseline");

    // Field sample W-07, declared mg/L.
    let raw = RawSample::from_concentrations(
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
    );
    let sample = match normalize(&raw, &NormalizeParams::default()) {
        Ok(sample) => sample,
        Err(err) => {
            eprintln!("normalization failed: {err}");
            std::process::exit(1);
        }
    };

    // ── Section 1: Contamination factors ────────────────────────
    v.section("── Contamination factors (µg/L basis) ──");
    let factors = contamination_factors(&sample);
    v.check(
        "cf[As]",
        factors[Metal::Arsenic.index()],
        2.4,
        tolerances::ANALYTICAL_F64,
    );
    v.check(
        "cf[Cd]",
        factors[Metal::Cadmium.index()],
        4.0 / 3.0,
        tolerances::ANALYTICAL_F64,
    );
    v.check(
        "cf[Hg]",
        factors[Metal::Mercury.index()],
        2.0,
        tolerances::ANALYTICAL_F64,
    );
    v.check(
        "cf[Zn]",
        factors[Metal::Zinc.index()],
        0.24,
        tolerances::ANALYTICAL_F64,
    );

    // ── Section 2: Index values vs baseline ─────────────────────
    v.section("── Indices vs baseline (W-07) ──");
    let indices = modern_indices(&sample);
    v.check("CF", indices.cf, 15.57, tolerances::BASELINE_2DP);
    v.check("PLI", indices.pli, 1.28, tolerances::BASELINE_2DP);
    v.check("HMPI", indices.hmpi, 188.37, tolerances::BASELINE_2DP);
    v.check_label("HMPI class", indices.hmpi_class.label, "Moderate");
    v.check_label("PLI class", indices.pli_class.label, "Moderate");
    v.check_label("CF class", indices.cf_class.label, "Very High");

    // ── Section 3: Analytic scenarios ───────────────────────────
    v.section("── Analytic scenarios ──");

    // Every metal exactly at its permissible limit.
    let at_limit = RawSample::from_concentrations(
        &Metal::all()
            .iter()
            .map(|&m| (m, permissible_ug_l(m)))
            .collect::<Vec<_>>(),
        Some(Unit::MicrogramsPerLiter),
    );
    if let Ok(limit_sample) = normalize(&at_limit, &NormalizeParams::default()) {
        let limit_factors = contamination_factors(&limit_sample);
        v.check("at-limit CF", total_cf(&limit_factors), 10.0, tolerances::EXACT);
        v.check(
            "at-limit PLI",
            pollution_load_index(&limit_factors),
            1.0,
            tolerances::EXACT,
        );
        v.check(
            "at-limit HMPI",
            heavy_metal_pollution_index(&limit_factors),
            100.0,
            tolerances::EXACT,
        );
        let limit_indices = modern_indices(&limit_sample);
        v.check_label(
            "at-limit HMPI class (boundary)",
            limit_indices.hmpi_class.label,
            "Moderate",
        );
    }

    // Single metal at 10× its limit: 0.1 mg/L arsenic.
    let single = RawSample::from_concentrations(
        &[(Metal::Arsenic, 0.1)],
        Some(Unit::MilligramsPerLiter),
    );
    if let Ok(single_sample) = normalize(&single, &NormalizeParams::default()) {
        let single_indices = modern_indices(&single_sample);
        v.check("single-As CF", single_indices.cf, 10.0, tolerances::EXACT);
        v.check("single-As PLI", single_indices.pli, 10.0, tolerances::EXACT);
        v.check(
            "single-As HMPI",
            single_indices.hmpi,
            1000.0,
            tolerances::EXACT,
        );
        v.check_label(
            "single-As HMPI class",
            single_indices.hmpi_class.label,
            "Critical",
        );
    }

    // All-zero sample degrades to zero, lowest tiers.
    let zero = RawSample::from_concentrations(
        &Metal::all().iter().map(|&m| (m, 0.0)).collect::<Vec<_>>(),
        Some(Unit::MicrogramsPerLiter),
    );
    if let Ok(zero_sample) = normalize(&zero, &NormalizeParams::default()) {
        let zero_indices = modern_indices(&zero_sample);
        v.check("all-zero CF", zero_indices.cf, 0.0, tolerances::EXACT);
        v.check("all-zero PLI", zero_indices.pli, 0.0, tolerances::EXACT);
        v.check("all-zero HMPI", zero_indices.hmpi, 0.0, tolerances::EXACT);
        v.check_label("all-zero HMPI class", zero_indices.hmpi_class.label, "Safe");
    }

    // ── Section 4: Determinism ──────────────────────────────────
    v.section("── Determinism ──");
    let run1 = modern_indices(&sample);
    let run2 = modern_indices(&sample);
    let bitwise = run1.hmpi.to_bits() == run2.hmpi.to_bits()
        && run1.pli.to_bits() == run2.pli.to_bits()
        && run1.cf.to_bits() == run2.cf.to_bits();
    v.check_count("rerun bitwise-identical", usize::from(bitwise), 1);

    v.finish();
}
