//! Deterministic geometry for the diagram figures.
//!
//! Layout is a pure function of index position and tuned spacing constants;
//! the constants are calibrated for the record counts these figures actually
//! have and are not expected to generalize to arbitrary N.

pub mod bars;
pub mod offsets;
pub mod pyramid;

pub use bars::{bar_offset, bar_rect};
pub use offsets::LabelOffsets;
pub use pyramid::{LevelBox, StackSpec};
