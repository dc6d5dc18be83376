//! Polynomial least-squares fit and evaluation.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;
use crate::math::ols::solve_least_squares;

/// A fitted polynomial, coefficients stored lowest degree first.
#[derive(Debug, Clone)]
pub struct PolyFit {
    pub coeffs: Vec<f64>,
}

impl PolyFit {
    /// Horner evaluation.
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }

    /// Sample the polynomial on `n` evenly spaced points over `[x0, x1]`.
    pub fn sample(&self, x0: f64, x1: f64, n: usize) -> Vec<(f64, f64)> {
        linspace(x0, x1, n)
            .into_iter()
            .map(|x| (x, self.eval(x)))
            .collect()
    }
}

/// Fit a degree-`degree` polynomial to `(x, y)` pairs by least squares.
///
/// Deterministic for identical inputs. Fails when the system is
/// underdetermined (fewer points than `degree + 1`) or unsolvable.
pub fn fit(points: &[(f64, f64)], degree: usize) -> Result<PolyFit, AppError> {
    let n = points.len();
    let cols = degree + 1;
    if n < cols {
        return Err(AppError::computation(format!(
            "Cannot fit a degree-{degree} polynomial to {n} points (need at least {cols})."
        )));
    }

    let mut design = DMatrix::zeros(n, cols);
    for (i, &(x, _)) in points.iter().enumerate() {
        let mut pow = 1.0;
        for j in 0..cols {
            design[(i, j)] = pow;
            pow *= x;
        }
    }
    let y = DVector::from_iterator(n, points.iter().map(|&(_, y)| y));

    let beta = solve_least_squares(&design, &y).ok_or_else(|| {
        AppError::computation("Polynomial fit failed: design matrix is too ill-conditioned.")
    })?;

    Ok(PolyFit {
        coeffs: beta.iter().copied().collect(),
    })
}

/// `n` evenly spaced values from `x0` to `x1` inclusive.
pub fn linspace(x0: f64, x1: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![x0],
        _ => {
            let step = (x1 - x0) / (n - 1) as f64;
            (0..n).map(|i| x0 + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_quadratic() {
        // y = 1 - 2x + 0.5x^2
        let pts: Vec<(f64, f64)> = (0..6)
            .map(|i| {
                let x = i as f64;
                (x, 1.0 - 2.0 * x + 0.5 * x * x)
            })
            .collect();

        let fit = fit(&pts, 2).unwrap();
        assert!((fit.coeffs[0] - 1.0).abs() < 1e-8);
        assert!((fit.coeffs[1] + 2.0).abs() < 1e-8);
        assert!((fit.coeffs[2] - 0.5).abs() < 1e-8);
        assert!((fit.eval(10.0) - (1.0 - 20.0 + 50.0)).abs() < 1e-6);
    }

    #[test]
    fn underdetermined_fit_is_an_error() {
        let pts = vec![(0.0, 1.0), (1.0, 2.0)];
        let err = fit(&pts, 2).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn fit_is_deterministic() {
        let pts = vec![
            (500.0, 0.59),
            (800.0, 0.64),
            (3500.0, 0.68),
            (12000.0, 0.73),
            (40000.0, 0.94),
        ];
        let a = fit(&pts, 2).unwrap();
        let b = fit(&pts, 2).unwrap();
        assert_eq!(a.coeffs, b.coeffs);
    }

    #[test]
    fn linspace_endpoints() {
        let xs = linspace(2.0, 4.0, 5);
        assert_eq!(xs.len(), 5);
        assert!((xs[0] - 2.0).abs() < 1e-12);
        assert!((xs[4] - 4.0).abs() < 1e-12);
        assert!((xs[2] - 3.0).abs() < 1e-12);
    }
}
