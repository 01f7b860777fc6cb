#![deny(missing_docs)]

//! redint - Redundant Internal Coordinates and B-Matrix Gradient Transforms
//!
//! redint is a small, pure computation library for the internal-coordinate
//! machinery used in molecular geometry optimization: bond-connectivity
//! detection from covalent radii, automatic generation of stretch/bend/
//! dihedral coordinates, construction of the Wilson B-matrix, and the
//! generalized-inverse transformation between Cartesian and
//! internal-coordinate gradients.
//!
//! # Overview
//!
//! Cartesian coordinates are convenient for energy evaluation but poorly
//! suited to optimization steps; chemically meaningful internal coordinates
//! (bond lengths, angles, torsions) decouple the soft and stiff directions
//! of a potential energy surface. Because a molecule with N atoms has only
//! 3N - 6 internal degrees of freedom while a full stretch/bend/dihedral
//! catalog is usually larger, the coordinate set is *redundant* and the
//! metric `G = B * B^T` is singular; the gradient transform therefore uses
//! an eigenvalue-truncated generalized inverse.
//!
//! # Pipeline
//!
//! ```text
//! Geometry -> Connectivity -> CoordinateCatalog -> B-matrix -> gradient transform
//! ```
//!
//! An external electronic-structure engine owns the geometry and supplies
//! the Cartesian gradient; this crate performs no energy evaluation, no
//! input parsing, and no I/O. Every operation is a pure, single-threaded
//! function over its arguments with no state retained between calls.
//!
//! # Quick Start
//!
//! ```
//! use nalgebra::DVector;
//! use redint::bmatrix::build_b_matrix;
//! use redint::catalog::{CatalogOptions, CoordinateCatalog};
//! use redint::connectivity::{Connectivity, ConnectivityOptions};
//! use redint::geometry::Geometry;
//! use redint::linalg::DEFAULT_EIGENVALUE_THRESHOLD;
//! use redint::transform::internal_gradient;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Water, coordinates in Bohr
//!     let geometry = Geometry::new(
//!         vec![8, 1, 1],
//!         vec![0.0, 0.0, 0.0, 1.43, 1.11, 0.0, -1.43, 1.11, 0.0],
//!     )?;
//!
//!     let connectivity = Connectivity::detect(&geometry, &ConnectivityOptions::default())?;
//!     let catalog = CoordinateCatalog::build(&geometry, &connectivity, &CatalogOptions::default())?;
//!     for (coord, value) in catalog.iter().zip(catalog.values(&geometry)?) {
//!         println!("{} = {:.6}", coord, value);
//!     }
//!
//!     let b = build_b_matrix(&catalog, &geometry)?;
//!     let gx = DVector::zeros(9); // supplied by an external gradient evaluator
//!     let gq = internal_gradient(&b, &gx, DEFAULT_EIGENVALUE_THRESHOLD)?;
//!     assert_eq!(gq.len(), catalog.len());
//!     Ok(())
//! }
//! ```
//!
//! # Conventions
//!
//! - Lengths in Bohr, angles in radians; conversion helpers live in
//!   [`geometry`].
//! - Atom indices are zero-based in the API; `Display` output uses 1-based
//!   labels (`STRE(1,2)`) following quantum-chemistry printing convention.
//! - The covalent-radius scale factor (default 1.3) and the eigenvalue
//!   cutoff (default 1e-10) are caller-tunable parameters.
//!
//! # Out of Scope
//!
//! Wavefunctions and energies, linear/near-linear bend special cases and
//! out-of-plane coordinates, Hessian transformations, and any user
//! interface. Connectedness of the detected bond graph is the caller's
//! concern; raising the radius scale factor can force connectivity for
//! multi-fragment systems.
//!
//! # Modules
//!
//! - [`geometry`] - Atomic numbers plus Cartesian coordinates
//! - [`elements`] - Covalent radius and symbol tables
//! - [`connectivity`] - Bond detection from scaled covalent radii
//! - [`coords`] - Internal coordinate values and analytic B-matrix rows
//! - [`catalog`] - Automatic, deduplicated coordinate generation
//! - [`bmatrix`] - B-matrix assembly
//! - [`linalg`] - Eigen-truncated generalized inverse
//! - [`transform`] - Cartesian/internal gradient transforms
//!
//! # References
//!
//! - Wilson, Decius, Cross. *Molecular Vibrations*. McGraw-Hill, 1955.
//! - Pulay, P.; Fogarasi, G. *J. Chem. Phys.* **1992**, 96, 2856-2860.
//! - Blondel, A.; Karplus, M. *J. Comput. Chem.* **1996**, 17, 1132-1141.
//! - Cordero, B. et al. *Dalton Trans.* **2008**, 2832-2838.

pub mod bmatrix;
pub mod catalog;
pub mod connectivity;
pub mod coords;
/// Covalent radius and element symbol tables
pub mod elements;
pub mod geometry;
/// Generalized inverse via symmetric eigen-decomposition
pub mod linalg;
pub mod transform;

pub use bmatrix::build_b_matrix;
pub use catalog::{CatalogOptions, CoordinateCatalog};
pub use connectivity::{Connectivity, ConnectivityOptions};
pub use coords::InternalCoordinate;
pub use geometry::Geometry;
pub use linalg::{generalized_inverse, DEFAULT_EIGENVALUE_THRESHOLD};
pub use transform::{cartesian_gradient, internal_gradient};
