//! Compiled-in tables for the literal-data figures.
//!
//! These values are transcribed from the paper's meta-analysis and never
//! change at runtime; figures that consume measured data load it from CSV
//! via [`crate::io::ingest`] instead.

pub mod levels;

pub use levels::{competency_levels, cost_points, taxonomy_levels, OPTIMAL_COST_INDEX};
