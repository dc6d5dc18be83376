//! Least squares solver.
//!
//! The trend fit is a tiny linear regression (a handful of points, three
//! coefficients), but the Vandermonde design matrix over raw dollar costs is
//! badly scaled, so we solve via SVD rather than QR:
//!
//! - SVD handles tall (rows > columns) systems, which is exactly our shape.
//! - Progressively looser tolerances keep near-collinear columns solvable
//!   without accepting garbage coefficients.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn overdetermined_system_minimizes_residual() {
        // y = 1 + x with one off point; solution stays close to the line.
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0, 4.5]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[1] - 1.0).abs() < 0.2);
    }
}
