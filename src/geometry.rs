//! Core molecular geometry data structures.
//!
//! This module provides the fundamental data type for representing molecular
//! geometries in internal-coordinate analysis:
//!
//! - [`Geometry`]: atomic numbers plus Cartesian coordinates for N atoms
//!
//! All coordinates are in Bohr. The coordinate array uses a flat layout
//! `[x1, y1, z1, x2, y2, z2, ...]`, which allows direct use with nalgebra
//! for the matrix operations required by the B-matrix machinery.

use nalgebra::{DVector, Vector3};
use thiserror::Error;

use crate::elements;

/// Bohr radius in Angstrom; CODATA value used throughout the crate.
pub const BOHR_TO_ANGSTROM: f64 = 0.52917720859;
/// Inverse of [`BOHR_TO_ANGSTROM`].
pub const ANGSTROM_TO_BOHR: f64 = 1.0 / BOHR_TO_ANGSTROM;

/// Convert a flat coordinate vector from Angstrom to Bohr.
pub fn angstrom_to_bohr(coords: &DVector<f64>) -> DVector<f64> {
    coords * ANGSTROM_TO_BOHR
}

/// Convert a flat coordinate vector from Bohr to Angstrom.
pub fn bohr_to_angstrom(coords: &DVector<f64>) -> DVector<f64> {
    coords * BOHR_TO_ANGSTROM
}

/// Error type for geometry construction.
#[derive(Error, Debug)]
pub enum GeometryError {
    /// Coordinate vector length does not match the atom count
    #[error(
        "coordinate length mismatch: expected {expected} components for {atoms} atoms, got {actual}"
    )]
    CoordinateLength {
        /// Number of atoms supplied
        atoms: usize,
        /// Expected coordinate count (3 per atom)
        expected: usize,
        /// Actual coordinate count supplied
        actual: usize,
    },
    /// Atomic number must be a positive integer
    #[error("invalid atomic number {z} for atom {atom}")]
    InvalidAtomicNumber {
        /// Zero-based atom index
        atom: usize,
        /// Offending atomic number
        z: u32,
    },
    /// Element symbol not found in the element table
    #[error("unknown element symbol '{0}'")]
    UnknownElement(String),
}

/// A molecular geometry: atomic numbers and Cartesian positions.
///
/// # Coordinate System
///
/// - Units: Bohr (a0)
/// - Frame: Cartesian (x, y, z), arbitrary origin
/// - Storage: flat `DVector<f64>` of length `3 * num_atoms`
///
/// The geometry is read-only from this crate's perspective; an external
/// optimizer owns it and mutates positions between steps. Derived data
/// (connectivity, B-matrix) is recomputed from the current coordinates on
/// demand and never cached here.
///
/// # Examples
///
/// ```
/// use redint::geometry::Geometry;
///
/// // A water molecule, coordinates in Bohr
/// let geometry = Geometry::new(
///     vec![8, 1, 1],
///     vec![
///         0.0, 0.0, 0.0,
///         1.43, 1.11, 0.0,
///         -1.43, 1.11, 0.0,
///     ],
/// )
/// .unwrap();
/// assert_eq!(geometry.num_atoms, 3);
/// ```
#[derive(Debug, Clone)]
pub struct Geometry {
    /// Atomic number of each atom, in order
    pub atomic_numbers: Vec<u32>,
    /// Flat Cartesian coordinates `[x1, y1, z1, ...]` in Bohr
    pub coords: DVector<f64>,
    /// Number of atoms
    pub num_atoms: usize,
}

impl Geometry {
    /// Create a `Geometry` from atomic numbers and a flat coordinate vector.
    ///
    /// Fails when `coords.len() != 3 * atomic_numbers.len()` or when any
    /// atomic number is zero.
    pub fn new(atomic_numbers: Vec<u32>, coords: Vec<f64>) -> Result<Self, GeometryError> {
        let num_atoms = atomic_numbers.len();
        if coords.len() != num_atoms * 3 {
            return Err(GeometryError::CoordinateLength {
                atoms: num_atoms,
                expected: num_atoms * 3,
                actual: coords.len(),
            });
        }
        if let Some((atom, &z)) = atomic_numbers.iter().enumerate().find(|(_, &z)| z == 0) {
            return Err(GeometryError::InvalidAtomicNumber { atom, z });
        }
        Ok(Self {
            atomic_numbers,
            coords: DVector::from_vec(coords),
            num_atoms,
        })
    }

    /// Create a `Geometry` from element symbols (e.g. `["O", "H", "H"]`).
    pub fn from_symbols(symbols: &[&str], coords: Vec<f64>) -> Result<Self, GeometryError> {
        let atomic_numbers = symbols
            .iter()
            .map(|s| {
                elements::atomic_number(s)
                    .ok_or_else(|| GeometryError::UnknownElement(s.to_string()))
            })
            .collect::<Result<Vec<u32>, GeometryError>>()?;
        Self::new(atomic_numbers, coords)
    }

    /// Cartesian position of atom `atom_idx` (zero-based) as a 3-vector.
    pub fn atom(&self, atom_idx: usize) -> Vector3<f64> {
        let i = atom_idx * 3;
        Vector3::new(self.coords[i], self.coords[i + 1], self.coords[i + 2])
    }

    /// Euclidean distance between atoms `a` and `b` in Bohr.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        (self.atom(b) - self.atom(a)).norm()
    }
}
