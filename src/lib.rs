//! `arc-figures` library crate.
//!
//! The binary (`arcfig`) is a thin wrapper around this library so that:
//!
//! - derivation and layout logic is testable without spawning processes
//! - the five figure generators share one ingest/stats/render toolkit
//! - code stays easy to navigate as the paper's figure set grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod figures;
pub mod io;
pub mod layout;
pub mod math;
pub mod report;
pub mod stats;
