//! # u-labanalysis
//!
//! Measurement analysis for introductory physics experiments: representative
//! values with an order-of-magnitude uncertainty, per-experiment derivation
//! models, and percent error against a theoretical prediction.
//!
//! This crate is the computational core only. Data entry, page layout, and
//! rich rendering of results belong to the caller; results carry the numbers
//! and a plain-text derivation trace.
//!
//! ## Modules
//!
//! - [`measurement`] — Unset-row filtering and the non-empty [`MeasurementSet`](measurement::MeasurementSet)
//! - [`uncertainty`] — Representative value and uncertainty (plain or conservative rounding)
//! - [`model`] — Inclined-plane gravity, rotational energy conservation, simple pendulum
//! - [`error_analysis`] — Percent error with degenerate-prediction detection
//! - [`analysis`] — Per-run value object, JSON configuration, end-to-end pipeline
//! - [`error`] — Error taxonomy
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every run is a pure function of its configuration and readings
//! - **Typed failures**: empty input, degenerate predictions, and bad
//!   configuration are reported as [`AnalysisError`](error::AnalysisError), never panics
//! - **Explicit rounding**: conservative vs. plain uncertainty rounding is a
//!   per-experiment [`RoundingMode`](uncertainty::RoundingMode)

pub mod analysis;
pub mod error;
pub mod error_analysis;
pub mod measurement;
pub mod model;
pub mod uncertainty;
