// SPDX-License-Identifier: AGPL-3.0-or-later
//! Detailed per-metal analysis report.
//!
//! The analysis service returns, alongside the scalar indices, a
//! per-metal breakdown (concentration, permissible limit, contamination
//! factor, level) plus the detected unit and guidance text. Export and
//! history views consume this record by field name.

use serde::Serialize;

use crate::water::classify::classify_cf;
use crate::water::indices::{
    compute_indices, contamination_factors, round3, IndexResult, IndexScheme,
};
use crate::water::recommend::{compliance_status, recommendations};
use crate::water::sample::CanonicalSample;
use crate::water::standards::{permissible_ug_l, Metal};

/// One metal's contribution to the contamination picture.
#[derive(Debug, Clone, Serialize)]
pub struct MetalContribution {
    /// Chemical symbol.
    pub metal: &'static str,
    /// Concentration, canonical µg/L.
    pub concentration_ug_l: f64,
    /// BIS permissible limit, µg/L.
    pub permissible_ug_l: f64,
    /// Contamination factor, rounded to 3 decimals (service precision).
    pub cf: f64,
    /// Per-metal CF tier label.
    pub level: &'static str,
}

/// Full analysis record for one sample.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedReport {
    /// Scalar indices and classifications for the requested scheme(s).
    pub indices: IndexResult,
    /// Per-metal breakdown, in standards-table order.
    pub contributions: Vec<MetalContribution>,
    /// Unit the raw sample was interpreted in ("mg/L" or "µg/L").
    pub unit: &'static str,
    /// Whether the unit came from the median heuristic.
    pub unit_detected: bool,
    /// How many tracked metals carried a value.
    pub metals_provided: usize,
    /// Guidance lines for the modern index set.
    pub recommendations: Vec<&'static str>,
    /// Compliance status line ("Compliant" / "Non-Compliant").
    pub compliance: &'static str,
}

/// Build the detailed report for one normalized sample.
///
/// The recommendation and compliance fields follow the modern scheme;
/// requesting [`IndexScheme::Legacy`] alone still computes the modern set
/// internally for guidance, without exporting it.
#[must_use]
pub fn detailed_report(sample: &CanonicalSample, scheme: IndexScheme) -> DetailedReport {
    let indices = compute_indices(sample, scheme);
    let modern = indices
        .modern
        .clone()
        .unwrap_or_else(|| crate::water::indices::modern_indices(sample));

    let factors = contamination_factors(sample);
    let contributions = Metal::all()
        .iter()
        .map(|&metal| {
            let cf = factors[metal.index()];
            MetalContribution {
                metal: metal.symbol(),
                concentration_ug_l: sample.concentration_ug_l(metal),
                permissible_ug_l: permissible_ug_l(metal),
                cf: round3(cf),
                level: classify_cf(cf).label,
            }
        })
        .collect();

    DetailedReport {
        contributions,
        unit: sample.unit.label(),
        unit_detected: sample.unit_detected,
        metals_provided: sample.provided,
        recommendations: recommendations(&modern).to_vec(),
        compliance: compliance_status(&modern),
        indices,
    }
}
