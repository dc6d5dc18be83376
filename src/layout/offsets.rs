//! Sparse label-offset overrides for collision avoidance.
//!
//! Labels default to one tuned offset; the handful of indices whose labels
//! would collide with a neighbor carry explicit exceptions. This is a static
//! lookup table, not a collision solver, which keeps the tuned output
//! auditable in one place.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct LabelOffsets {
    default: (f64, f64),
    overrides: HashMap<usize, (f64, f64)>,
}

impl LabelOffsets {
    pub fn new(default: (f64, f64)) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, index: usize, offset: (f64, f64)) -> Self {
        self.overrides.insert(index, offset);
        self
    }

    /// Offset `(dx, dy)` for the label at `index`.
    pub fn get(&self, index: usize) -> (f64, f64) {
        self.overrides.get(&index).copied().unwrap_or(self.default)
    }

    /// Whether `index` carries an explicit exception.
    pub fn is_override(&self, index: usize) -> bool {
        self.overrides.contains_key(&index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_applies_everywhere_except_overrides() {
        let offsets = LabelOffsets::new((0.0, 0.03)).with_override(4, (3000.0, -0.03));

        assert_eq!(offsets.get(0), (0.0, 0.03));
        assert_eq!(offsets.get(3), (0.0, 0.03));
        assert_eq!(offsets.get(4), (3000.0, -0.03));
        assert!(offsets.is_override(4));
        assert!(!offsets.is_override(5));
    }
}
