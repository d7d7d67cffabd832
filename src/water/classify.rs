// SPDX-License-Identifier: AGPL-3.0-or-later
//! Threshold classification for every pollution index.
//!
//! Each classifier is a total, monotone lookup over [0, ∞): tier
//! boundaries are closed-open on the lower bound (`value < threshold`
//! selects the lower tier), so a value exactly on a boundary lands in the
//! higher tier. Labels, severities, and descriptions match the dashboard
//! and analysis-service interpretation tables.

use serde::Serialize;

/// UI severity tier behind a classification (dashboard badge color).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Within acceptable limits.
    Success,
    /// Acceptable, worth noting.
    Info,
    /// Needs attention.
    Warning,
    /// Unsafe.
    Danger,
}

impl Severity {
    /// Badge label as the dashboard renders it.
    #[must_use]
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// Qualitative classification of one index value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Tier label ("Safe", "Moderate", …).
    pub label: &'static str,
    /// Severity tier for UI coloring.
    pub severity: Severity,
    /// Short human-readable description.
    pub description: &'static str,
}

const fn class(
    label: &'static str,
    severity: Severity,
    description: &'static str,
) -> Classification {
    Classification {
        label,
        severity,
        description,
    }
}

/// HMPI tiers: <100 Safe · <200 Moderate · ≥200 Critical.
#[must_use]
pub fn classify_hmpi(hmpi: f64) -> Classification {
    if hmpi < 100.0 {
        class("Safe", Severity::Success, "Suitable for drinking purposes")
    } else if hmpi < 200.0 {
        class(
            "Moderate",
            Severity::Warning,
            "Requires treatment before consumption",
        )
    } else {
        class("Critical", Severity::Danger, "Not suitable for drinking")
    }
}

/// PLI tiers: <1 Low · <2 Moderate · <5 High · ≥5 Very High.
#[must_use]
pub fn classify_pli(pli: f64) -> Classification {
    if pli < 1.0 {
        class(
            "Low",
            Severity::Success,
            "Baseline level - suitable for drinking",
        )
    } else if pli < 2.0 {
        class(
            "Moderate",
            Severity::Warning,
            "Moderate level of contamination",
        )
    } else if pli < 5.0 {
        class("High", Severity::Danger, "High level of contamination")
    } else {
        class(
            "Very High",
            Severity::Danger,
            "Very high contamination level",
        )
    }
}

/// Total-CF tiers: <1 Low · <3 Moderate · <6 Considerable · ≥6 Very High.
#[must_use]
pub fn classify_cf(cf: f64) -> Classification {
    if cf < 1.0 {
        class("Low", Severity::Success, "Within acceptable limits")
    } else if cf < 3.0 {
        class(
            "Moderate",
            Severity::Warning,
            "Moderate contamination level",
        )
    } else if cf < 6.0 {
        class(
            "Considerable",
            Severity::Danger,
            "Considerable contamination level",
        )
    } else {
        class(
            "Very High",
            Severity::Danger,
            "Very high contamination level",
        )
    }
}

/// Legacy HPI tiers: <25 Excellent · <50 Good · <75 Poor · ≥75 Unsuitable.
#[must_use]
pub fn classify_hpi(hpi: f64) -> Classification {
    if hpi < 25.0 {
        class(
            "Excellent",
            Severity::Success,
            "Excellent quality for drinking",
        )
    } else if hpi < 50.0 {
        class("Good", Severity::Info, "Acceptable quality")
    } else if hpi < 75.0 {
        class("Poor", Severity::Warning, "Poor quality - treatment advised")
    } else {
        class("Unsuitable", Severity::Danger, "Unsuitable for drinking")
    }
}

/// Legacy HEI tiers: <10 Low · ≤20 Medium · >20 High.
#[must_use]
pub fn classify_hei(hei: f64) -> Classification {
    if hei < 10.0 {
        class("Low", Severity::Success, "Low overall metal load")
    } else if hei <= 20.0 {
        class("Medium", Severity::Warning, "Moderate overall metal load")
    } else {
        class("High", Severity::Danger, "High overall metal load")
    }
}

/// Legacy contamination-degree tiers: <1 Low · ≤3 Medium · >3 High.
#[must_use]
pub fn classify_cd(cd: f64) -> Classification {
    if cd < 1.0 {
        class("Low", Severity::Success, "Low degree of contamination")
    } else if cd <= 3.0 {
        class("Medium", Severity::Warning, "Moderate degree of contamination")
    } else {
        class("High", Severity::Danger, "High degree of contamination")
    }
}
