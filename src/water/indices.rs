// SPDX-License-Identifier: AGPL-3.0-or-later
//! Contamination factors and the pollution index aggregators.
//!
//! Two index schemes coexist and are never aliased onto each other:
//!
//! - **Modern** (µg/L basis): total CF, PLI, HMPI. Metals with zero
//!   contamination are excluded from the PLI geometric mean and the HMPI
//!   weighted average, so an unmeasured metal cannot drag either index
//!   down.
//! - **Legacy** (mg/L basis): HPI, HEI, Cd, MPI, NPI. Every tracked metal
//!   contributes whether measured or not — historical results were
//!   computed under these semantics and must stay reproducible.
//!
//! Scheme selection is explicit ([`IndexScheme`]); the serialized field
//! names (`HMPI`, `PLI`, `CF`, `HPI`, `HEI`, `Cd`, `MPI`, `NPI` and their
//! `_Class` companions) are the export contract and must not change.
//!
//! All aggregators are pure: a fixed standards table and a normalized
//! sample in, finite non-negative scalars out.
//!
//! # References
//!
//! - Tomlinson, D.L. et al. (1980). Problems in the assessment of
//!   heavy-metal levels in estuaries and the formation of a pollution
//!   index. Helgoländer Meeresunters. 33: 566-575. (PLI)
//! - Mohan, S.V. et al. (1996). J. Environ. Sci. Health A 31(2). (HPI)
//! - Edet, A.E., Offiong, O.E. (2002). GeoJournal 57: 295-304. (HEI)
//! - Backman, B. et al. (1998). Environ. Geol. 36: 55-64. (Cd)
//! - Nemerow, N.L. (1974). Scientific Stream Pollution Analysis. (NPI)

use serde::Serialize;

use crate::water::classify::{
    classify_cd, classify_cf, classify_hei, classify_hmpi, classify_hpi, classify_pli,
    Classification,
};
use crate::water::sample::CanonicalSample;
use crate::water::standards::{
    normalized_weights_mg_l, permissible_mg_l, permissible_ug_l, standard, weight_ug_l, Metal,
};

/// Floor applied to each contamination factor inside the PLI product, so
/// a near-zero factor cannot collapse the geometric mean to zero.
pub const PLI_FLOOR: f64 = 1e-4;

/// Floor applied to each concentration inside the MPI product.
pub const MPI_FLOOR: f64 = 1e-9;

/// Round half-away-from-zero at the 2nd decimal (reporting precision for
/// every index except MPI).
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round half-away-from-zero at the 3rd decimal (MPI reporting precision).
#[must_use]
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Per-metal contamination factors: `concentration / permissible`, on the
/// canonical µg/L basis. Zero (or unmeasured) concentration gives 0.
#[must_use]
pub fn contamination_factors(sample: &CanonicalSample) -> [f64; Metal::COUNT] {
    let mut factors = [0.0; Metal::COUNT];
    for &metal in Metal::all() {
        let concentration = sample.concentration_ug_l(metal);
        let limit = permissible_ug_l(metal);
        if concentration > 0.0 && limit > 0.0 {
            factors[metal.index()] = concentration / limit;
        }
    }
    factors
}

// ── Modern scheme (µg/L) ──────────────────────────────────────

/// Total contamination factor: Σ cf over all tracked metals, rounded to
/// 2 decimals. Zero-valued metals contribute 0 to the sum.
#[must_use]
pub fn total_cf(factors: &[f64; Metal::COUNT]) -> f64 {
    round2(factors.iter().sum())
}

/// Pollution Load Index: geometric mean of the contamination factors
/// that are > 0, each floored at [`PLI_FLOOR`]; 0 when no metal
/// qualifies. Rounded to 2 decimals.
#[must_use]
pub fn pollution_load_index(factors: &[f64; Metal::COUNT]) -> f64 {
    let positives: Vec<f64> = factors.iter().copied().filter(|&cf| cf > 0.0).collect();
    if positives.is_empty() {
        return 0.0;
    }
    let product: f64 = positives.iter().map(|&cf| cf.max(PLI_FLOOR)).product();
    #[allow(clippy::cast_precision_loss)]
    let pli = product.powf(1.0 / positives.len() as f64);
    round2(pli)
}

/// Heavy Metal Pollution Index: Σ(Qi·Wi) / ΣWi over the metals with
/// cf > 0, where Qi = cf·100 and Wi = 1/permissible (µg/L); 0 when no
/// metal qualifies. Rounded to 2 decimals.
#[must_use]
pub fn heavy_metal_pollution_index(factors: &[f64; Metal::COUNT]) -> f64 {
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for &metal in Metal::all() {
        let cf = factors[metal.index()];
        if cf > 0.0 {
            let qi = cf * 100.0;
            let weight = weight_ug_l(metal);
            numerator += qi * weight;
            denominator += weight;
        }
    }
    if denominator > 0.0 {
        round2(numerator / denominator)
    } else {
        0.0
    }
}

// ── Legacy scheme (mg/L) ──────────────────────────────────────

/// Legacy HPI: Σ(Wi·Qi)/ΣWi over ALL tracked metals, with
/// Qi = 100·max(0, (measured − ideal)/(limit − ideal)) and normalized
/// inverse-limit weights. Qi is 0 when limit equals ideal. Rounded to
/// 2 decimals.
#[must_use]
pub fn hpi(sample: &CanonicalSample) -> f64 {
    let weights = normalized_weights_mg_l();
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for &metal in Metal::all() {
        let measured = sample.concentration_mg_l(metal);
        let limit = permissible_mg_l(metal);
        let ideal = standard(metal).ideal_ug_l / 1000.0;
        let qi = if limit == ideal {
            0.0
        } else {
            100.0 * ((measured - ideal) / (limit - ideal)).max(0.0)
        };
        let weight = weights[metal.index()];
        numerator += weight * qi;
        denominator += weight;
    }
    if denominator > 0.0 {
        round2(numerator / denominator)
    } else {
        0.0
    }
}

/// Legacy HEI: Σ measured/limit over all tracked metals, rounded to
/// 2 decimals.
#[must_use]
pub fn hei(sample: &CanonicalSample) -> f64 {
    let sum: f64 = Metal::all()
        .iter()
        .map(|&m| sample.concentration_mg_l(m) / permissible_mg_l(m))
        .sum();
    round2(sum)
}

/// Legacy degree of contamination: Σ max(0, measured/limit − 1) over all
/// tracked metals, rounded to 2 decimals.
#[must_use]
pub fn contamination_degree(sample: &CanonicalSample) -> f64 {
    let sum: f64 = Metal::all()
        .iter()
        .map(|&m| (sample.concentration_mg_l(m) / permissible_mg_l(m) - 1.0).max(0.0))
        .sum();
    round2(sum)
}

/// Legacy MPI: geometric mean of all measured concentrations (mg/L),
/// each floored at [`MPI_FLOOR`], rounded to 3 decimals.
#[must_use]
pub fn metal_pollution_index(sample: &CanonicalSample) -> f64 {
    let product: f64 = Metal::all()
        .iter()
        .map(|&m| sample.concentration_mg_l(m).max(MPI_FLOOR))
        .product();
    #[allow(clippy::cast_precision_loss)]
    let mpi = product.powf(1.0 / Metal::COUNT as f64);
    round3(mpi)
}

/// Legacy Nemerow index: sqrt((Pmax² + Pave²)/2) over the
/// measured/limit ratios of all tracked metals, rounded to 2 decimals.
#[must_use]
pub fn nemerow_index(sample: &CanonicalSample) -> f64 {
    let ratios: Vec<f64> = Metal::all()
        .iter()
        .map(|&m| sample.concentration_mg_l(m) / permissible_mg_l(m))
        .collect();
    let p_max = ratios.iter().copied().fold(0.0_f64, f64::max);
    #[allow(clippy::cast_precision_loss)]
    let p_ave = ratios.iter().sum::<f64>() / ratios.len() as f64;
    round2(((p_max * p_max + p_ave * p_ave) / 2.0).sqrt())
}

// ── Result assembly ───────────────────────────────────────────

/// Which formula set to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexScheme {
    /// HMPI / PLI / CF (µg/L basis).
    Modern,
    /// HPI / HEI / Cd / MPI / NPI (mg/L basis).
    Legacy,
    /// Both sets, under their own field names.
    Both,
}

/// Modern index set with classifications. Field names follow the export
/// contract.
#[derive(Debug, Clone, Serialize)]
pub struct ModernIndices {
    /// Heavy Metal Pollution Index.
    #[serde(rename = "HMPI")]
    pub hmpi: f64,
    /// Pollution Load Index.
    #[serde(rename = "PLI")]
    pub pli: f64,
    /// Total contamination factor.
    #[serde(rename = "CF")]
    pub cf: f64,
    /// HMPI classification.
    #[serde(rename = "HMPI_Class")]
    pub hmpi_class: Classification,
    /// PLI classification.
    #[serde(rename = "PLI_Class")]
    pub pli_class: Classification,
    /// CF classification.
    #[serde(rename = "CF_Class")]
    pub cf_class: Classification,
}

/// Legacy index set with classifications. Field names follow the export
/// contract.
#[derive(Debug, Clone, Serialize)]
pub struct LegacyIndices {
    /// Legacy Heavy-metal Pollution Index.
    #[serde(rename = "HPI")]
    pub hpi: f64,
    /// Heavy-metal Evaluation Index.
    #[serde(rename = "HEI")]
    pub hei: f64,
    /// Degree of contamination.
    #[serde(rename = "Cd")]
    pub cd: f64,
    /// Metal Pollution Index.
    #[serde(rename = "MPI")]
    pub mpi: f64,
    /// Nemerow Pollution Index.
    #[serde(rename = "NPI")]
    pub npi: f64,
    /// HPI classification.
    #[serde(rename = "HPI_Class")]
    pub hpi_class: Classification,
    /// HEI classification.
    #[serde(rename = "HEI_Class")]
    pub hei_class: Classification,
    /// Cd classification.
    #[serde(rename = "Cd_Class")]
    pub cd_class: Classification,
}

/// Engine output for one sample: whichever scheme(s) were requested.
#[derive(Debug, Clone, Serialize)]
pub struct IndexResult {
    /// Modern set, when requested.
    #[serde(flatten)]
    pub modern: Option<ModernIndices>,
    /// Legacy set, when requested.
    #[serde(flatten)]
    pub legacy: Option<LegacyIndices>,
}

/// Evaluate the modern scheme for one normalized sample.
#[must_use]
pub fn modern_indices(sample: &CanonicalSample) -> ModernIndices {
    let factors = contamination_factors(sample);
    let hmpi = heavy_metal_pollution_index(&factors);
    let pli = pollution_load_index(&factors);
    let cf = total_cf(&factors);
    ModernIndices {
        hmpi,
        pli,
        cf,
        hmpi_class: classify_hmpi(hmpi),
        pli_class: classify_pli(pli),
        cf_class: classify_cf(cf),
    }
}

/// Evaluate the legacy scheme for one normalized sample.
#[must_use]
pub fn legacy_indices(sample: &CanonicalSample) -> LegacyIndices {
    let hpi_value = hpi(sample);
    let hei_value = hei(sample);
    let cd_value = contamination_degree(sample);
    LegacyIndices {
        hpi: hpi_value,
        hei: hei_value,
        cd: cd_value,
        mpi: metal_pollution_index(sample),
        npi: nemerow_index(sample),
        hpi_class: classify_hpi(hpi_value),
        hei_class: classify_hei(hei_value),
        cd_class: classify_cd(cd_value),
    }
}

/// Evaluate the requested scheme(s) for one normalized sample.
#[must_use]
pub fn compute_indices(sample: &CanonicalSample, scheme: IndexScheme) -> IndexResult {
    let modern = matches!(scheme, IndexScheme::Modern | IndexScheme::Both)
        .then(|| modern_indices(sample));
    let legacy = matches!(scheme, IndexScheme::Legacy | IndexScheme::Both)
        .then(|| legacy_indices(sample));
    IndexResult { modern, legacy }
}
