//! Bond connectivity detection from interatomic distances.
//!
//! Two atoms are considered bonded when their distance falls below a scaled
//! sum of tabulated covalent radii. The scale factor defaults to 1.3 and is
//! deliberately permissive; raising it can force connectivity across weakly
//! bound fragments (supermolecule systems). This module does not guarantee
//! the resulting bond graph is connected — that check belongs to the caller.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::elements;
use crate::geometry::Geometry;

/// Error type for connectivity detection.
#[derive(Error, Debug)]
pub enum ConnectivityError {
    /// No tabulated covalent radius for an element in the geometry
    #[error("no covalent radius tabulated for element Z={z} (atom {atom})")]
    MissingRadius {
        /// Zero-based atom index
        atom: usize,
        /// Atomic number without a table entry
        z: u32,
    },
}

/// Options controlling bond detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectivityOptions {
    /// Scale factor applied to the covalent-radius sum. Atoms i and j are
    /// bonded when `R(i,j) < scale * (rcov_i + rcov_j)`.
    pub scale: f64,
}

impl Default for ConnectivityOptions {
    fn default() -> Self {
        Self { scale: 1.3 }
    }
}

/// Symmetric boolean bond adjacency for N atoms, diagonal false.
///
/// Derived data: recompute whenever the geometry changes meaningfully.
/// No staleness tracking is performed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connectivity {
    num_atoms: usize,
    bonded: Vec<bool>,
}

impl Connectivity {
    /// Detect bonds in `geometry` using the covalent-radius criterion.
    ///
    /// Fails when an element has no tabulated covalent radius.
    pub fn detect(
        geometry: &Geometry,
        options: &ConnectivityOptions,
    ) -> Result<Self, ConnectivityError> {
        let n = geometry.num_atoms;
        let radii = geometry
            .atomic_numbers
            .iter()
            .enumerate()
            .map(|(atom, &z)| {
                elements::covalent_radius(z).ok_or(ConnectivityError::MissingRadius { atom, z })
            })
            .collect::<Result<Vec<f64>, ConnectivityError>>()?;

        let mut bonded = vec![false; n * n];
        let mut num_bonds = 0usize;
        for i in 0..n {
            for j in (i + 1)..n {
                let r = geometry.distance(i, j);
                if r < options.scale * (radii[i] + radii[j]) {
                    bonded[i * n + j] = true;
                    bonded[j * n + i] = true;
                    num_bonds += 1;
                }
            }
        }
        debug!("detected {} bonds among {} atoms", num_bonds, n);

        Ok(Self {
            num_atoms: n,
            bonded,
        })
    }

    /// Number of atoms the relation covers.
    pub fn num_atoms(&self) -> usize {
        self.num_atoms
    }

    /// Whether atoms `i` and `j` are bonded. Self-bonds are always false.
    pub fn bonded(&self, i: usize, j: usize) -> bool {
        self.bonded[i * self.num_atoms + j]
    }

    /// All bonded pairs `(i, j)` with `i < j`, in lexicographic order.
    pub fn bond_pairs(&self) -> Vec<(usize, usize)> {
        let n = self.num_atoms;
        let mut pairs = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.bonded(i, j) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> Geometry {
        Geometry::new(
            vec![8, 1, 1],
            vec![0.0, 0.0, 0.0, 1.43, 1.11, 0.0, -1.43, 1.11, 0.0],
        )
        .unwrap()
    }

    #[test]
    fn test_water_bonds() {
        let conn = Connectivity::detect(&water(), &ConnectivityOptions::default()).unwrap();
        assert!(conn.bonded(0, 1));
        assert!(conn.bonded(1, 0));
        assert!(conn.bonded(0, 2));
        // The two hydrogens are too far apart to bond
        assert!(!conn.bonded(1, 2));
        assert!(!conn.bonded(0, 0));
        assert_eq!(conn.bond_pairs(), vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn test_scale_factor_extends_bonding() {
        // Stretched H2 not bonded at the default scale
        let geometry = Geometry::new(vec![1, 1], vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0]).unwrap();
        let default = Connectivity::detect(&geometry, &ConnectivityOptions::default()).unwrap();
        assert!(!default.bonded(0, 1));

        let loose = Connectivity::detect(&geometry, &ConnectivityOptions { scale: 2.0 }).unwrap();
        assert!(loose.bonded(0, 1));
    }

    #[test]
    fn test_missing_radius() {
        // Z=100 is past the end of the radius table
        let geometry = Geometry::new(vec![100], vec![0.0, 0.0, 0.0]).unwrap();
        let result = Connectivity::detect(&geometry, &ConnectivityOptions::default());
        assert!(matches!(
            result,
            Err(ConnectivityError::MissingRadius { atom: 0, z: 100 })
        ));
    }
}
