// SPDX-License-Identifier: AGPL-3.0-or-later
//! Legacy index set (HPI / HEI / Cd / MPI / NPI) vs dashboard baseline.
//!
//! # Provenance
//!
//! | Item            | Value                                               |
//! |-----------------|-----------------------------------------------------|
//! | Baseline (JS)   | dashboard legacy `utils/hmpi.js` `computeAllIndices`|
//! | Sample          | field sample W-07 (Sanganer block), mg/L            |
//! | Date            | 2026-07-14                                          |
//!
//! Historical results in the sample store were computed under these
//! formulas (every tracked metal contributes, mg/L basis, ideal-relative
//! sub-indices). They must stay reproducible bit-for-bit at reporting
//! precision, and must never be aliased onto the modern HMPI/PLI/CF
//! fields.

use deepspring_barracuda::tolerances;
use deepspring_barracuda::validation::Validator;
use deepspring_barracuda::water::indices::{legacy_indices, modern_indices};
use deepspring_barracuda::water::sample::{normalize, NormalizeParams, RawSample};
use deepspring_barracuda::water::standards::{
    normalized_weights_mg_l, permissible_ug_l, Metal, Unit,
};

fn main() {
    let mut v = Validator::new("Legacy indices vs dashboard baseline");

    // ── Section 1: Weight derivation ────────────────────────────
    v.section("── Normalized mg/L weights ──");
    let weights = normalized_weights_mg_l();
    v.check(
        "Σ weights",
        weights.iter().sum::<f64>(),
        1.0,
        tolerances::ANALYTICAL_F64,
    );
    // 1/0.001 over Σ(1/Sᵢ) = 1000 / 1617.3667…
    v.check(
        "weight[Hg]",
        weights[Metal::Mercury.index()],
        0.618289,
        1e-6,
    );

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

    // ── Section 2: Index values vs baseline ─────────────────────
    v.section("── Indices vs baseline (W-07) ──");
    let legacy = legacy_indices(&sample);
    v.check("HPI", legacy.hpi, 188.37, tolerances::BASELINE_2DP);
    v.check("HEI", legacy.hei, 15.57, tolerances::BASELINE_2DP);
    v.check("Cd", legacy.cd, 6.93, tolerances::BASELINE_2DP);
    v.check("MPI", legacy.mpi, 0.064, tolerances::BASELINE_3DP);
    v.check("NPI", legacy.npi, 2.08, tolerances::BASELINE_2DP);
    v.check_label("HPI class", legacy.hpi_class.label, "Unsuitable");
    v.check_label("HEI class", legacy.hei_class.label, "Medium");
    v.check_label("Cd class", legacy.cd_class.label, "High");

    // ── Section 3: At-limit scenario ────────────────────────────
    v.section("── Every metal at its permissible limit ──");
    let at_limit = RawSample::from_concentrations(
        &Metal::all()
            .iter()
            .map(|&m| (m, permissible_ug_l(m)))
            .collect::<Vec<_>>(),
        Some(Unit::MicrogramsPerLiter),
    );
    if let Ok(limit_sample) = normalize(&at_limit, &NormalizeParams::default()) {
        let limit = legacy_indices(&limit_sample);
        v.check("at-limit HPI", limit.hpi, 100.0, tolerances::EXACT);
        v.check("at-limit HEI", limit.hei, 10.0, tolerances::EXACT);
        v.check_label("at-limit HEI class", limit.hei_class.label, "Medium");
        v.check("at-limit Cd", limit.cd, 0.0, tolerances::EXACT);
        v.check_label("at-limit Cd class", limit.cd_class.label, "Low");
        v.check("at-limit NPI", limit.npi, 1.0, tolerances::EXACT);
        // Geometric mean of the ten mg/L limits.
        v.check("at-limit MPI", limit.mpi, 0.05, tolerances::BASELINE_3DP);
    }

    // ── Section 4: Legacy is not an alias of modern ─────────────
    v.section("── Scheme separation ──");
    // Single measured metal at 2× its limit: the modern HMPI normalizes
    // over the one present metal (→ 200), while the legacy HPI spreads
    // the same exceedance across all ten weights (→ 12.37).
    let single = RawSample::from_concentrations(
        &[(Metal::Lead, 0.02)],
        Some(Unit::MilligramsPerLiter),
    );
    if let Ok(single_sample) = normalize(&single, &NormalizeParams::default()) {
        let modern = modern_indices(&single_sample);
        let legacy_single = legacy_indices(&single_sample);
        v.check("single-Pb HMPI", modern.hmpi, 200.0, tolerances::EXACT);
        v.check(
            "single-Pb HPI",
            legacy_single.hpi,
            12.37,
            tolerances::BASELINE_2DP,
        );
        let distinct = (modern.hmpi - legacy_single.hpi).abs() > 1.0;
        v.check_count("HPI ≠ HMPI under partial coverage", usize::from(distinct), 1);
    }

    // ── Section 5: Determinism ──────────────────────────────────
    v.section("── Determinism ──");
    let run1 = legacy_indices(&sample);
    let run2 = legacy_indices(&sample);
    let bitwise = run1.hpi.to_bits() == run2.hpi.to_bits()
        && run1.hei.to_bits() == run2.hei.to_bits()
        && run1.cd.to_bits() == run2.cd.to_bits()
        && run1.mpi.to_bits() == run2.mpi.to_bits()
        && run1.npi.to_bits() == run2.npi.to_bits();
    v.check_count("rerun bitwise-identical", usize::from(bitwise), 1);

    v.finish();
}
