// SPDX-License-Identifier: AGPL-3.0-or-later

#![forbid(unsafe_code)]

//! deepSpring BarraCUDA — Groundwater Quality Computational Pipelines
//!
//! Rust implementations of the groundwater heavy-metal pollution index
//! pipeline:
//! - BIS standards table and inverse-limit weight derivation
//! - Per-metal contamination factors (CF) from µg/L concentrations
//! - Modern index set: HMPI / PLI / total CF with threshold classification
//! - Legacy index set: HPI / HEI / Cd / MPI / NPI (mg/L basis, kept for
//!   historical results)
//! - Sample normalization: lenient coercion, mg/L vs µg/L detection,
//!   negative-value policy
//!
//! Each module mirrors a stage of the dashboard/analysis-service pipeline,
//! validated against the JS/Python baseline before replacing it.
//!
//! ## Validation binaries
//!   - `validate_indices` — modern HMPI/PLI/CF vs dashboard baseline
//!   - `validate_legacy_indices` — HPI/HEI/Cd/MPI/NPI vs dashboard baseline
//!   - `validate_normalizer` — unit detection, coercion, negative policy

pub mod data;
pub mod error;
pub mod tolerances;
pub mod validation;
pub mod water;
