// SPDX-License-Identifier: AGPL-3.0-or-later
//! Guidance text derived from the modern index set.
//!
//! Three tiers keyed on (HMPI, PLI, CF) jointly, matching the dashboard's
//! recommendation table, plus the analysis service's compliance status
//! line. Text is fixed — the engine emits guidance, the surrounding UI
//! decides presentation.

use crate::water::classify::Severity;
use crate::water::indices::ModernIndices;

/// Recommendation lines for a computed modern index set.
///
/// Tiers are joint: a sample is only "safe" when all three indices sit in
/// their lowest band, and any index in its highest band makes the sample
/// unsafe.
#[must_use]
pub fn recommendations(indices: &ModernIndices) -> &'static [&'static str] {
    if indices.hmpi < 100.0 && indices.pli < 1.0 && indices.cf < 1.0 {
        &[
            "Water is safe for drinking",
            "Regular monitoring recommended",
            "Maintain current water treatment processes",
        ]
    } else if indices.hmpi < 200.0 && indices.pli < 2.0 && indices.cf < 3.0 {
        &[
            "Water requires treatment before consumption",
            "Consider filtration systems",
            "Increase monitoring frequency",
        ]
    } else {
        &[
            "Water is not safe for drinking",
            "Immediate treatment required",
            "Consider alternative water sources",
            "Consult with water quality experts",
        ]
    }
}

/// Regulatory compliance line: compliant iff the HMPI class is Safe.
#[must_use]
pub fn compliance_status(indices: &ModernIndices) -> &'static str {
    if indices.hmpi_class.severity == Severity::Success {
        "Compliant"
    } else {
        "Non-Compliant"
    }
}
