//! Quantiles and the Pareto-region filter for the trade-off panel.

/// Linear-interpolation quantile (the pandas/numpy default).
///
/// `q` is clamped to `[0, 1]`. Returns `None` on an empty slice or when any
/// value is non-finite (sorting NaNs would silently misplace the cut).
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Quantile cuts defining the Pareto-optimal region of the trade-off space:
/// top-quartile throughput, bottom-quartile workload, top-quartile safety.
#[derive(Debug, Clone, Copy)]
pub struct ParetoThresholds {
    pub throughput: f64,
    pub workload: f64,
    pub safety: f64,
}

impl ParetoThresholds {
    /// Compute the 75th/25th/75th percentile cuts from the three series.
    ///
    /// All three series must be non-empty and the same length.
    pub fn from_series(throughput: &[f64], workload: &[f64], safety: &[f64]) -> Option<Self> {
        Some(Self {
            throughput: quantile(throughput, 0.75)?,
            workload: quantile(workload, 0.25)?,
            safety: quantile(safety, 0.75)?,
        })
    }
}

/// Indices of records inside the Pareto region, in input order.
///
/// Membership means all three inequalities hold simultaneously; evaluation
/// order is irrelevant.
pub fn pareto_indices(
    throughput: &[f64],
    workload: &[f64],
    safety: &[f64],
    cuts: &ParetoThresholds,
) -> Vec<usize> {
    (0..throughput.len())
        .filter(|&i| {
            throughput[i] >= cuts.throughput
                && workload[i] <= cuts.workload
                && safety[i] >= cuts.safety
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_interpolates_linearly() {
        let xs = vec![1.0, 2.0, 3.0, 4.0];
        // pos = 0.75 * 3 = 2.25 -> 3 + 0.25 * (4 - 3)
        assert!((quantile(&xs, 0.75).unwrap() - 3.25).abs() < 1e-12);
        assert!((quantile(&xs, 0.0).unwrap() - 1.0).abs() < 1e-12);
        assert!((quantile(&xs, 1.0).unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn quantile_handles_unsorted_input() {
        let xs = vec![9.0, 1.0, 5.0];
        assert!((quantile(&xs, 0.5).unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn quantile_empty_and_nan_are_none() {
        assert!(quantile(&[], 0.5).is_none());
        assert!(quantile(&[1.0, f64::NAN], 0.5).is_none());
    }

    #[test]
    fn pareto_membership_matches_brute_force() {
        let thr: Vec<f64> = (0..40).map(|i| 5.0 + (i % 7) as f64 * 0.2).collect();
        let wl: Vec<f64> = (0..40).map(|i| 80.0 - (i % 5) as f64 * 1.5).collect();
        let sf: Vec<f64> = (0..40).map(|i| 90.0 + (i % 9) as f64).collect();

        let cuts = ParetoThresholds::from_series(&thr, &wl, &sf).unwrap();
        let selected = pareto_indices(&thr, &wl, &sf, &cuts);

        for i in 0..thr.len() {
            let member = thr[i] >= cuts.throughput && wl[i] <= cuts.workload && sf[i] >= cuts.safety;
            assert_eq!(selected.contains(&i), member, "index {i}");
        }
        // Order preserved.
        for pair in selected.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
