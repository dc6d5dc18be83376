//! Trailing-window moving average.

/// Rolling mean with window `w` over an ordered sequence.
///
/// Output has the same length as the input. Index `i < w-1` has no full
/// trailing window and yields `None` (a gap in the plotted line, not an
/// error); index `i >= w-1` yields the mean of the `w` values ending at `i`.
///
/// A zero window never has a defined value.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    if window == 0 {
        return vec![None; n];
    }

    let mut out = Vec::with_capacity(n);
    let mut sum = 0.0;
    for i in 0..n {
        sum += values[i];
        if i >= window {
            sum -= values[i - window];
        }
        if i + 1 >= window {
            out.push(Some(sum / window as f64));
        } else {
            out.push(None);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_sequence_stays_constant() {
        let xs = vec![7.5; 50];
        let out = rolling_mean(&xs, 20);
        assert_eq!(out.len(), 50);
        for (i, v) in out.iter().enumerate() {
            if i < 19 {
                assert!(v.is_none());
            } else {
                assert!((v.unwrap() - 7.5).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn increasing_sequence_gives_increasing_means() {
        let xs: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let out = rolling_mean(&xs, 5);
        let defined: Vec<f64> = out.iter().flatten().copied().collect();
        assert_eq!(defined.len(), 36);
        for pair in defined.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn order_sensitivity() {
        let xs = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let mut rev = xs.clone();
        rev.reverse();
        assert_ne!(rolling_mean(&xs, 3), rolling_mean(&rev, 3));
    }

    #[test]
    fn window_larger_than_input_is_all_gaps() {
        let out = rolling_mean(&[1.0, 2.0], 3);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn zero_window_is_all_gaps() {
        assert_eq!(rolling_mean(&[1.0, 2.0], 0), vec![None, None]);
    }
}
