//! Automatic generation of the redundant internal coordinate catalog.
//!
//! The builder walks the bond connectivity and enumerates stretches, bends,
//! and dihedrals, deduplicated under each coordinate's own equivalence rule.
//! Candidates whose geometry is numerically degenerate (collinear bend arms,
//! dihedrals over a collinear inner bend) are skipped; a degenerate stretch
//! cannot sensibly be skipped and surfaces as an error.
//!
//! Linear and near-linear bends that would need two orthogonal bend
//! coordinates are not handled; dihedrals traversing such bends are simply
//! dropped by the degeneracy check. Callers needing full coverage of linear
//! chains must supply their own coordinates.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::connectivity::Connectivity;
use crate::coords::{CoordinateError, InternalCoordinate};
use crate::geometry::Geometry;

/// Options controlling catalog generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogOptions {
    /// Whether to enumerate dihedral coordinates in addition to stretches
    /// and bends.
    pub include_dihedrals: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            include_dihedrals: true,
        }
    }
}

/// An insertion-ordered, duplicate-free sequence of internal coordinates.
///
/// Built once per optimization run from the connectivity relation and held
/// fixed afterwards; the coordinate *values* change with the geometry, the
/// *set* does not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateCatalog {
    coords: Vec<InternalCoordinate>,
}

impl CoordinateCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enumerate stretches, bends, and (optionally) dihedrals from the bond
    /// connectivity at `geometry`.
    ///
    /// Degenerate bend and dihedral candidates are skipped with a debug log;
    /// a degenerate stretch is an error.
    pub fn build(
        geometry: &Geometry,
        connectivity: &Connectivity,
        options: &CatalogOptions,
    ) -> Result<Self, CoordinateError> {
        let n = connectivity.num_atoms();
        let mut catalog = Self::new();

        // Stretches: every bonded pair.
        for (i, j) in connectivity.bond_pairs() {
            let stre = InternalCoordinate::stretch(i, j);
            // A zero-length bond makes the whole coordinate set ill-defined.
            stre.b_row(geometry)?;
            catalog.push(stre);
        }

        // Bends: bonded paths i-j-k with the vertex in the middle.
        for i in 0..n {
            for j in 0..n {
                if !connectivity.bonded(i, j) {
                    continue;
                }
                for k in (i + 1)..n {
                    if k == j || !connectivity.bonded(j, k) {
                        continue;
                    }
                    let bend = InternalCoordinate::bend(i, j, k);
                    match bend.b_row(geometry) {
                        Ok(_) => {
                            catalog.push(bend);
                        }
                        Err(CoordinateError::Degenerate { .. }) => {
                            debug!("skipping degenerate {}", bend);
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        // Dihedrals: bonded chains a-b-c-d with distinct atoms.
        if options.include_dihedrals {
            for b in 0..n {
                for c in (b + 1)..n {
                    if !connectivity.bonded(b, c) {
                        continue;
                    }
                    for a in 0..n {
                        if a == b || a == c || !connectivity.bonded(a, b) {
                            continue;
                        }
                        for d in 0..n {
                            if d == a || d == b || d == c || !connectivity.bonded(c, d) {
                                continue;
                            }
                            let dih = InternalCoordinate::dihedral(a, b, c, d);
                            match dih.b_row(geometry) {
                                Ok(_) => {
                                    catalog.push(dih);
                                }
                                Err(CoordinateError::Degenerate { .. }) => {
                                    debug!("skipping degenerate {}", dih);
                                }
                                Err(e) => return Err(e),
                            }
                        }
                    }
                }
            }
        }

        debug!("catalog holds {} internal coordinates", catalog.len());
        Ok(catalog)
    }

    /// Append `coord` unless an equivalent coordinate is already present.
    /// Returns whether the coordinate was inserted.
    pub fn push(&mut self, coord: InternalCoordinate) -> bool {
        if self.coords.contains(&coord) {
            return false;
        }
        self.coords.push(coord);
        true
    }

    /// Whether an equivalent coordinate is already present.
    pub fn contains(&self, coord: &InternalCoordinate) -> bool {
        self.coords.contains(coord)
    }

    /// Number of coordinates.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Iterate over the coordinates in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, InternalCoordinate> {
        self.coords.iter()
    }

    /// Scalar values of all coordinates at `geometry`, in catalog order.
    pub fn values(&self, geometry: &Geometry) -> Result<Vec<f64>, CoordinateError> {
        self.coords.iter().map(|c| c.value(geometry)).collect()
    }
}

impl<'a> IntoIterator for &'a CoordinateCatalog {
    type Item = &'a InternalCoordinate;
    type IntoIter = std::slice::Iter<'a, InternalCoordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
