//! Internal coordinate definitions with values and analytic B-matrix rows.
//!
//! An [`InternalCoordinate`] is a tagged variant over stretches, bends, and
//! dihedrals, identified solely by its atom-index tuple. Each variant knows
//! how to compute its scalar value at a geometry and its row of the Wilson
//! B-matrix (partial derivatives of the value with respect to every Cartesian
//! component). Rows are zero outside the 6, 9, or 12 columns belonging to the
//! coordinate's own atoms.
//!
//! Analytic derivative formulas are used throughout: unit bond vectors for
//! stretches, the Wilson bend formulas, and the Blondel-Karplus torsion
//! gradients (*J. Comput. Chem.* **1996**, 17, 1132-1141). Degenerate
//! geometries (zero bond length, collinear bend arms) report
//! [`CoordinateError::Degenerate`] instead of emitting NaN or Inf.

use nalgebra::{DVector, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::geometry::Geometry;

/// Length and sine cutoff below which a coordinate is treated as degenerate.
const DEGENERACY_CUTOFF: f64 = 1e-10;

/// Error type for coordinate evaluation.
#[derive(Error, Debug)]
pub enum CoordinateError {
    /// Coordinate geometry is numerically degenerate (coincident or
    /// collinear atoms) and its value or derivative is ill-defined
    #[error("degenerate geometry for {coordinate}: {reason}")]
    Degenerate {
        /// Human-readable coordinate label, e.g. `BEND(1,2,3)`
        coordinate: String,
        /// What made the coordinate ill-defined
        reason: String,
    },
    /// Atom index outside the geometry
    #[error("atom index {index} out of range for {num_atoms} atoms")]
    AtomOutOfRange {
        /// Offending zero-based index
        index: usize,
        /// Atom count of the geometry
        num_atoms: usize,
    },
    /// The same atom appears twice in one coordinate
    #[error("repeated atom index {index} in {coordinate}")]
    RepeatedAtom {
        /// Human-readable coordinate label
        coordinate: String,
        /// The repeated zero-based index
        index: usize,
    },
}

/// A single internal coordinate, tagged by kind.
///
/// Atom indices are zero-based. Equality and hashing operate on the
/// canonical form produced by the constructors:
///
/// - stretch: unordered pair, stored with `i < j`;
/// - bend: vertex `j` fixed, outer atoms stored with `i < k`;
/// - dihedral: `(i,j,k,l)` and its reversal `(l,k,j,i)` describe the same
///   torsion (the signed value is invariant under full reversal), stored
///   with `j < k`.
///
/// [`fmt::Display`] renders 1-based atom labels, e.g. `STRE(1,2)`,
/// matching the usual quantum-chemistry output convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InternalCoordinate {
    /// Bond length between atoms `i` and `j`
    Stretch {
        /// First atom
        i: usize,
        /// Second atom
        j: usize,
    },
    /// Bond angle at vertex `j` between arms `j-i` and `j-k`
    Bend {
        /// First outer atom
        i: usize,
        /// Vertex atom
        j: usize,
        /// Second outer atom
        k: usize,
    },
    /// Signed torsion angle of the chain `i-j-k-l`
    Dihedral {
        /// First atom of the chain
        i: usize,
        /// Second atom (first inner)
        j: usize,
        /// Third atom (second inner)
        k: usize,
        /// Fourth atom of the chain
        l: usize,
    },
}

impl InternalCoordinate {
    /// Canonical stretch between atoms `i` and `j`.
    pub fn stretch(i: usize, j: usize) -> Self {
        let (i, j) = if i <= j { (i, j) } else { (j, i) };
        Self::Stretch { i, j }
    }

    /// Canonical bend with vertex `j` and outer atoms `i`, `k`.
    pub fn bend(i: usize, j: usize, k: usize) -> Self {
        let (i, k) = if i <= k { (i, k) } else { (k, i) };
        Self::Bend { i, j, k }
    }

    /// Canonical dihedral for the chain `i-j-k-l` (reversal-invariant).
    pub fn dihedral(i: usize, j: usize, k: usize, l: usize) -> Self {
        if j <= k {
            Self::Dihedral { i, j, k, l }
        } else {
            Self::Dihedral {
                i: l,
                j: k,
                k: j,
                l: i,
            }
        }
    }

    /// Zero-based indices of the atoms this coordinate involves, in
    /// definition order.
    pub fn atoms(&self) -> Vec<usize> {
        match *self {
            Self::Stretch { i, j } => vec![i, j],
            Self::Bend { i, j, k } => vec![i, j, k],
            Self::Dihedral { i, j, k, l } => vec![i, j, k, l],
        }
    }

    /// Check that all atom indices are distinct and within the geometry.
    pub fn validate(&self, num_atoms: usize) -> Result<(), CoordinateError> {
        let atoms = self.atoms();
        for (pos, &a) in atoms.iter().enumerate() {
            if a >= num_atoms {
                return Err(CoordinateError::AtomOutOfRange {
                    index: a,
                    num_atoms,
                });
            }
            if atoms[..pos].contains(&a) {
                return Err(CoordinateError::RepeatedAtom {
                    coordinate: self.to_string(),
                    index: a,
                });
            }
        }
        Ok(())
    }

    /// Scalar value of the coordinate at `geometry`.
    ///
    /// Stretches return the bond length in Bohr. Bends return the vertex
    /// angle in `[0, pi]` radians. Dihedrals return the signed torsion in
    /// `(-pi, pi]` radians, computed via the cross-product/`atan2`
    /// construction so there is no branch discontinuity away from ±pi.
    pub fn value(&self, geometry: &Geometry) -> Result<f64, CoordinateError> {
        self.validate(geometry.num_atoms)?;
        match *self {
            Self::Stretch { i, j } => Ok(geometry.distance(i, j)),
            Self::Bend { i, j, k } => {
                let (un, vn, _, _) = self.bend_arms(geometry, i, j, k)?;
                Ok(un.dot(&vn).clamp(-1.0, 1.0).acos())
            }
            Self::Dihedral { i, j, k, l } => {
                let (_, b2, _, m, n) = self.dihedral_frame(geometry, i, j, k, l)?;
                let sin_term = m.cross(&n).dot(&b2) / b2.norm();
                Ok(sin_term.atan2(m.dot(&n)))
            }
        }
    }

    /// B-matrix row: partial derivatives of the value with respect to all
    /// `3 * num_atoms` Cartesian components, zero outside this coordinate's
    /// atoms.
    pub fn b_row(&self, geometry: &Geometry) -> Result<DVector<f64>, CoordinateError> {
        self.validate(geometry.num_atoms)?;
        let mut row = DVector::zeros(geometry.num_atoms * 3);
        match *self {
            Self::Stretch { i, j } => {
                let d = geometry.atom(j) - geometry.atom(i);
                let r = d.norm();
                if r < DEGENERACY_CUTOFF {
                    return Err(self.degenerate("zero bond length"));
                }
                let u = d / r;
                set_atom_block(&mut row, i, &(-u));
                set_atom_block(&mut row, j, &u);
            }
            Self::Bend { i, j, k } => {
                let (un, vn, ru, rv) = self.bend_arms(geometry, i, j, k)?;
                let cos = un.dot(&vn).clamp(-1.0, 1.0);
                let sin = (1.0 - cos * cos).sqrt();
                if sin < DEGENERACY_CUTOFF {
                    return Err(self.degenerate("collinear bend arms"));
                }
                let di = (un * cos - vn) / (ru * sin);
                let dk = (vn * cos - un) / (rv * sin);
                set_atom_block(&mut row, i, &di);
                set_atom_block(&mut row, k, &dk);
                set_atom_block(&mut row, j, &(-(di + dk)));
            }
            Self::Dihedral { i, j, k, l } => {
                let (b1, b2, b3, m, n) = self.dihedral_frame(geometry, i, j, k, l)?;
                let lb2 = b2.norm();
                let m2 = m.norm_squared();
                let n2 = n.norm_squared();
                let di = m * (-lb2 / m2);
                let dl = n * (lb2 / n2);
                let mj = m * (b1.dot(&b2) / (m2 * lb2));
                let nj = n * (b2.dot(&b3) / (n2 * lb2));
                let dj = m * (lb2 / m2) + mj + nj;
                let dk = -nj - mj - n * (lb2 / n2);
                set_atom_block(&mut row, i, &di);
                set_atom_block(&mut row, j, &dj);
                set_atom_block(&mut row, k, &dk);
                set_atom_block(&mut row, l, &dl);
            }
        }
        Ok(row)
    }

    fn degenerate(&self, reason: &str) -> CoordinateError {
        CoordinateError::Degenerate {
            coordinate: self.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Normalized bend arms `j->i` and `j->k` plus their lengths.
    fn bend_arms(
        &self,
        geometry: &Geometry,
        i: usize,
        j: usize,
        k: usize,
    ) -> Result<(Vector3<f64>, Vector3<f64>, f64, f64), CoordinateError> {
        let u = geometry.atom(i) - geometry.atom(j);
        let v = geometry.atom(k) - geometry.atom(j);
        let ru = u.norm();
        let rv = v.norm();
        if ru < DEGENERACY_CUTOFF || rv < DEGENERACY_CUTOFF {
            return Err(self.degenerate("zero-length bend arm"));
        }
        Ok((u / ru, v / rv, ru, rv))
    }

    /// Bond vectors `b1, b2, b3` along the chain and the plane normals
    /// `m = b1 x b2`, `n = b2 x b3`.
    #[allow(clippy::type_complexity)]
    fn dihedral_frame(
        &self,
        geometry: &Geometry,
        i: usize,
        j: usize,
        k: usize,
        l: usize,
    ) -> Result<
        (
            Vector3<f64>,
            Vector3<f64>,
            Vector3<f64>,
            Vector3<f64>,
            Vector3<f64>,
        ),
        CoordinateError,
    > {
        let b1 = geometry.atom(j) - geometry.atom(i);
        let b2 = geometry.atom(k) - geometry.atom(j);
        let b3 = geometry.atom(l) - geometry.atom(k);
        if b2.norm() < DEGENERACY_CUTOFF {
            return Err(self.degenerate("zero-length central bond"));
        }
        let m = b1.cross(&b2);
        let n = b2.cross(&b3);
        if m.norm() < DEGENERACY_CUTOFF || n.norm() < DEGENERACY_CUTOFF {
            return Err(self.degenerate("collinear inner bend"));
        }
        Ok((b1, b2, b3, m, n))
    }
}

/// Write a 3-vector into the columns of atom `atom` within a flat row.
fn set_atom_block(row: &mut DVector<f64>, atom: usize, v: &Vector3<f64>) {
    let base = atom * 3;
    row[base] = v.x;
    row[base + 1] = v.y;
    row[base + 2] = v.z;
}

impl fmt::Display for InternalCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Stretch { i, j } => write!(f, "STRE({},{})", i + 1, j + 1),
            Self::Bend { i, j, k } => write!(f, "BEND({},{},{})", i + 1, j + 1, k + 1),
            Self::Dihedral { i, j, k, l } => {
                write!(f, "DIHEDRAL({},{},{},{})", i + 1, j + 1, k + 1, l + 1)
            }
        }
    }
}
