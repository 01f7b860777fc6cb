//! Wilson B-matrix assembly.
//!
//! The B-matrix stacks one derivative row per internal coordinate: entry
//! `(p, 3a + c)` is the partial derivative of coordinate `p`'s value with
//! respect to Cartesian component `c` of atom `a`. It is recomputed fresh
//! at every geometry where a gradient transform is needed and never cached
//! across geometries.

use nalgebra::DMatrix;

use crate::catalog::CoordinateCatalog;
use crate::coords::CoordinateError;
use crate::geometry::Geometry;

/// Build the B-matrix for `catalog` at `geometry`.
///
/// The result has `catalog.len()` rows and `3 * geometry.num_atoms` columns,
/// rows in catalog order. Each row is sparse in effect: only the 6, 9, or 12
/// columns of the coordinate's own atoms are nonzero.
///
/// Fails when any coordinate in the catalog is degenerate at this geometry
/// or references an atom outside the geometry.
pub fn build_b_matrix(
    catalog: &CoordinateCatalog,
    geometry: &Geometry,
) -> Result<DMatrix<f64>, CoordinateError> {
    let mut b = DMatrix::zeros(catalog.len(), geometry.num_atoms * 3);
    for (p, coord) in catalog.iter().enumerate() {
        let row = coord.b_row(geometry)?;
        b.set_row(p, &row.transpose());
    }
    Ok(b)
}
