// SPDX-License-Identifier: AGPL-3.0-or-later
//! Centralized validation tolerances with numerical justification.
//!
//! Every tolerance threshold used in validation binaries and integration
//! tests is defined here with documentation of its origin. No ad-hoc magic
//! numbers.
//!
//! # Tolerance categories
//!
//! | Category | Basis | Example |
//! |----------|-------|---------|
//! | Exact | IEEE 754 f64 | 0.0 for classification boundaries |
//! | Machine | f64 arithmetic | 1e-12 for ratio sums |
//! | Geometric | `powf`/`ln` accumulation | 1e-9 for PLI, MPI |
//! | Baseline | values reported at 2/3 decimals | 0.005 vs dashboard output |

// ═══════════════════════════════════════════════════════════════════
// Machine-precision tolerances (IEEE 754 f64)
// ═══════════════════════════════════════════════════════════════════

/// Operations that must be exact (counts, classification labels, rounding).
pub const EXACT: f64 = 0.0;

/// Simple arithmetic chains (contamination factors, weighted sums).
///
/// f64 has ~15.9 significant digits; 1e-12 allows 3 digits of
/// accumulated rounding across a 10-metal reduction.
pub const ANALYTICAL_F64: f64 = 1e-12;

/// Summation-order independence of the total contamination factor.
///
/// Ten non-negative terms below 1e3 each; reordering perturbs the sum
/// by at most a few ULP. 1e-9 is conservative.
pub const CF_ADDITIVITY: f64 = 1e-9;

/// Geometric-mean pipelines (PLI, MPI): `product → powf(1/n)`.
///
/// `powf` is correctly rounded to within a few ULP but the product
/// accumulates one rounding per factor. 1e-9 covers 10 factors.
pub const GEOMETRIC_F64: f64 = 1e-9;

// ═══════════════════════════════════════════════════════════════════
// Baseline comparison tolerances (dashboard / analysis service)
// ═══════════════════════════════════════════════════════════════════

/// Indices the baseline reports rounded to 2 decimals (HMPI, PLI, CF,
/// HPI, HEI, Cd, NPI).
///
/// Both sides round half-away-from-zero at the 2nd decimal, so agreement
/// is exact in principle; 0.005 (half a reporting unit) absorbs any
/// divergence in the unrounded f64 path.
pub const BASELINE_2DP: f64 = 0.005;

/// Indices the baseline reports rounded to 3 decimals (MPI, per-metal
/// cf values in the detailed report).
pub const BASELINE_3DP: f64 = 0.0005;
