//! Gradient transformation between Cartesian and internal coordinates.
//!
//! With `B` the Wilson B-matrix and `G = B * B^T`, the Cartesian gradient
//! `g_x` maps to the internal-coordinate gradient
//!
//! ```text
//! g_q = G^+ * B * g_x
//! ```
//!
//! where `G^+` is the eigen-truncated generalized inverse of
//! [`crate::linalg`]. The identity weighting matrix is used throughout; for
//! energy-derivative transforms the choice of weighting is irrelevant.
//!
//! The reverse map `g_x' = B^T * g_q` recovers `g_x` exactly only when the
//! original gradient lies in the row space of `B` (true for physical
//! gradients when the coordinates span the full internal degrees of
//! freedom); otherwise it yields the projection of `g_x` onto that row
//! space, which is expected behavior, not an error.

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

use crate::linalg::generalized_inverse;

/// Error type for gradient transforms.
#[derive(Error, Debug)]
pub enum TransformError {
    /// Gradient vector length inconsistent with the B-matrix
    #[error("gradient length mismatch: expected {expected} components, got {actual}")]
    GradientLength {
        /// Length required by the B-matrix
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },
}

/// Transform a Cartesian gradient (length `3N`) to the internal-coordinate
/// gradient (length `b.nrows()`).
///
/// `eigenvalue_threshold` controls the null-space cutoff of the generalized
/// inverse; use [`crate::linalg::DEFAULT_EIGENVALUE_THRESHOLD`] unless there
/// is a reason not to. A singular `G` from redundant coordinates is handled
/// by the eigenvalue truncation and does not abort the transform.
pub fn internal_gradient(
    b: &DMatrix<f64>,
    cartesian_gradient: &DVector<f64>,
    eigenvalue_threshold: f64,
) -> Result<DVector<f64>, TransformError> {
    if cartesian_gradient.len() != b.ncols() {
        return Err(TransformError::GradientLength {
            expected: b.ncols(),
            actual: cartesian_gradient.len(),
        });
    }
    let g = b * b.transpose();
    let g_inv = generalized_inverse(&g, eigenvalue_threshold);
    Ok(g_inv * (b * cartesian_gradient))
}

/// Map an internal-coordinate gradient (length `b.nrows()`) back to
/// Cartesian space as `B^T * g_q`.
///
/// This is exact recovery only for gradients in the row space of `B`;
/// otherwise it is the row-space projection.
pub fn cartesian_gradient(
    b: &DMatrix<f64>,
    internal_gradient: &DVector<f64>,
) -> Result<DVector<f64>, TransformError> {
    if internal_gradient.len() != b.nrows() {
        return Err(TransformError::GradientLength {
            expected: b.nrows(),
            actual: internal_gradient.len(),
        });
    }
    Ok(b.transpose() * internal_gradient)
}
