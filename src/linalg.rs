//! Eigen-decomposition based generalized inverse for symmetric matrices.

use log::debug;
use nalgebra::DMatrix;

/// Eigenvalues with magnitude at or below this value are treated as zero
/// and excluded from inversion.
pub const DEFAULT_EIGENVALUE_THRESHOLD: f64 = 1e-10;

/// Generalized (Moore-Penrose style) inverse of a symmetric matrix.
///
/// Eigen-decomposes `a`, inverts every eigenvalue whose magnitude exceeds
/// `eigenvalue_threshold`, maps the rest to zero, and reassembles. The result
/// is symmetric, an exact inverse for well-conditioned full-rank input, and
/// the pseudo-inverse on the non-null subspace otherwise. Near-zero
/// eigenvalues are the expected, designed-for case when redundant internal
/// coordinates outnumber the true degrees of freedom; they are logged, never
/// an error.
pub fn generalized_inverse(a: &DMatrix<f64>, eigenvalue_threshold: f64) -> DMatrix<f64> {
    let d = a.nrows();
    let eigen = a.clone().symmetric_eigen();

    let mut inv_diag = DMatrix::zeros(d, d);
    let mut null_dim = 0usize;
    for i in 0..d {
        let lambda = eigen.eigenvalues[i];
        if lambda.abs() > eigenvalue_threshold {
            inv_diag[(i, i)] = 1.0 / lambda;
        } else {
            null_dim += 1;
        }
    }
    if null_dim > 0 {
        debug!(
            "generalized inverse: {} of {} eigenvalues below threshold {:e}",
            null_dim, d, eigenvalue_threshold
        );
    }

    let v = &eigen.eigenvectors;
    v * inv_diag * v.transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_abs_diff(a: &DMatrix<f64>, b: &DMatrix<f64>) -> f64 {
        (a - b).iter().fold(0.0f64, |m, x| m.max(x.abs()))
    }

    #[test]
    fn test_full_rank_exact_inverse() {
        let a = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 0.5, 1.0, 3.0, 0.2, 0.5, 0.2, 2.0]);
        let inv = generalized_inverse(&a, DEFAULT_EIGENVALUE_THRESHOLD);
        let identity = DMatrix::identity(3, 3);
        assert!(max_abs_diff(&(&a * &inv), &identity) < 1e-12);
        assert!(max_abs_diff(&inv, &inv.transpose()) < 1e-12, "result symmetric");
    }

    #[test]
    fn test_singular_matrix_pseudo_inverse() {
        // Rank-1 matrix with eigenvalues {2, 0}; pseudo-inverse is A / 4.
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        let inv = generalized_inverse(&a, DEFAULT_EIGENVALUE_THRESHOLD);
        let expected = &a * 0.25;
        assert!(max_abs_diff(&inv, &expected) < 1e-12);
    }

    #[test]
    fn test_double_application_recovers_input() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        let twice = generalized_inverse(
            &generalized_inverse(&a, DEFAULT_EIGENVALUE_THRESHOLD),
            DEFAULT_EIGENVALUE_THRESHOLD,
        );
        assert!(max_abs_diff(&twice, &a) < 1e-12);
    }
}
