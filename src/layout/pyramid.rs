//! Vertically stacked box layout (taxonomy pyramid, competency ladder).

/// A resolved axis-aligned box in figure coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelBox {
    pub x_left: f64,
    pub y_bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl LevelBox {
    pub fn x_right(&self) -> f64 {
        self.x_left + self.width
    }

    pub fn y_top(&self) -> f64 {
        self.y_bottom + self.height
    }

    pub fn x_center(&self) -> f64 {
        self.x_left + self.width / 2.0
    }

    pub fn y_center(&self) -> f64 {
        self.y_bottom + self.height / 2.0
    }
}

/// A vertical stack of boxes: level `i` (0 = bottom) sits at
/// `y = base_y + i*step` with width `w_max - i*w_delta`, centered on
/// `center_x`. With `w_delta = 0` this degenerates to a plain ladder.
#[derive(Debug, Clone, Copy)]
pub struct StackSpec {
    pub center_x: f64,
    pub base_y: f64,
    pub step: f64,
    pub box_height: f64,
    pub w_max: f64,
    pub w_delta: f64,
}

impl StackSpec {
    pub fn level_box(&self, i: usize) -> LevelBox {
        let width = self.w_max - self.w_delta * i as f64;
        LevelBox {
            x_left: self.center_x - width / 2.0,
            y_bottom: self.base_y + self.step * i as f64,
            width,
            height: self.box_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy_spec() -> StackSpec {
        StackSpec {
            center_x: 5.0,
            base_y: 2.0,
            step: 1.8,
            box_height: 1.6,
            w_max: 8.0,
            w_delta: 1.0,
        }
    }

    #[test]
    fn pyramid_narrows_going_up() {
        let spec = taxonomy_spec();
        let widths: Vec<f64> = (0..5).map(|i| spec.level_box(i).width).collect();
        assert_eq!(widths, vec![8.0, 7.0, 6.0, 5.0, 4.0]);

        let ys: Vec<f64> = (0..5).map(|i| spec.level_box(i).y_bottom).collect();
        for (y, expected) in ys.iter().zip([2.0, 3.8, 5.6, 7.4, 9.2]) {
            assert!((y - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn every_level_shares_the_center_axis() {
        let spec = taxonomy_spec();
        for i in 0..5 {
            assert!((spec.level_box(i).x_center() - 5.0).abs() < 1e-12);
        }
    }

    #[test]
    fn layout_is_bit_identical_across_runs() {
        let spec = taxonomy_spec();
        for i in 0..5 {
            assert_eq!(spec.level_box(i), spec.level_box(i));
        }
    }

    #[test]
    fn boxes_do_not_overlap_vertically() {
        let spec = taxonomy_spec();
        for i in 0..4 {
            assert!(spec.level_box(i).y_top() <= spec.level_box(i + 1).y_bottom + 1e-12);
        }
    }
}
