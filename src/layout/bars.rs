//! Grouped-bar placement.

/// Horizontal offset of sub-series `k` (of `n_series`) from its group center.
///
/// Sub-series are packed symmetrically: for three series of width 0.25 the
/// offsets are -0.25, 0, +0.25.
pub fn bar_offset(k: usize, n_series: usize, bar_width: f64) -> f64 {
    (k as f64 - (n_series as f64 - 1.0) / 2.0) * bar_width
}

/// Corner coordinates of one vertical bar rising from the baseline.
pub fn bar_rect(center_x: f64, bar_width: f64, value: f64) -> [(f64, f64); 2] {
    [
        (center_x - bar_width / 2.0, 0.0),
        (center_x + bar_width / 2.0, value),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_series_pack_symmetrically() {
        assert!((bar_offset(0, 3, 0.25) + 0.25).abs() < 1e-12);
        assert!(bar_offset(1, 3, 0.25).abs() < 1e-12);
        assert!((bar_offset(2, 3, 0.25) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn adjacent_bars_touch_but_do_not_overlap() {
        let w = 0.25;
        for k in 0..2 {
            let right = bar_offset(k, 3, w) + w / 2.0;
            let left = bar_offset(k + 1, 3, w) - w / 2.0;
            assert!((right - left).abs() < 1e-12);
        }
    }

    #[test]
    fn bar_rect_spans_width_and_height() {
        let [lo, hi] = bar_rect(4.0, 0.5, 3.0);
        assert_eq!(lo, (3.75, 0.0));
        assert_eq!(hi, (4.25, 3.0));
    }
}
