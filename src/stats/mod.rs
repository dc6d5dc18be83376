//! Pure derivation helpers shared by the figure pipelines.
//!
//! Everything here is a deterministic function of its inputs; the renderers
//! never mutate source data, they only consume these derived series.

pub mod quantile;
pub mod rolling;

pub use quantile::{pareto_indices, quantile, ParetoThresholds};
pub use rolling::rolling_mean;

/// Multiply every value by `k` (fraction→percent is `rescale(v, 100.0)`).
pub fn rescale(values: &[f64], k: f64) -> Vec<f64> {
    values.iter().map(|v| v * k).collect()
}

/// Arithmetic mean; `None` on an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Efficiency ratio: effect size per $1000 invested.
///
/// The dataset guarantees positive costs; a non-positive cost means the
/// caller fed us something degenerate, so we refuse rather than divide.
pub fn impact_per_1000(effect: f64, cost: f64) -> Option<f64> {
    if cost <= 0.0 {
        return None;
    }
    Some(effect / cost * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescale_fraction_to_percent() {
        let out = rescale(&[0.25, 0.5, 1.0], 100.0);
        assert_eq!(out, vec![25.0, 50.0, 100.0]);
    }

    #[test]
    fn mean_empty_is_none() {
        assert!(mean(&[]).is_none());
        assert!((mean(&[1.0, 2.0, 3.0]).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn impact_matches_paper_values() {
        // Industrial-grade: d=0.94 at $40,000.
        let v = impact_per_1000(0.94, 40000.0).unwrap();
        assert!((v - 0.0235).abs() < 1e-10);

        // Remote lab: d=0.89 at $1,500 -> 0.5933 to 4 decimals.
        let v = impact_per_1000(0.89, 1500.0).unwrap();
        assert!(((v * 1e4).round() / 1e4 - 0.5933).abs() < 1e-12);
    }

    #[test]
    fn impact_rejects_non_positive_cost() {
        assert!(impact_per_1000(0.5, 0.0).is_none());
        assert!(impact_per_1000(0.5, -1.0).is_none());
    }

    #[test]
    fn impact_is_scale_invariant() {
        for k in [0.5, 2.0, 1000.0] {
            let a = impact_per_1000(0.73, 12000.0).unwrap();
            let b = impact_per_1000(0.73 * k, 12000.0 * k).unwrap();
            assert!((a - b).abs() < 1e-12);
        }
    }
}
