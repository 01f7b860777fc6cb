//! Element data tables: covalent radii and symbol lookups.
//!
//! The covalent radii are the single-bond values of Cordero et al.,
//! *Dalton Trans.* **2008**, 2832-2838, tabulated in Angstrom and exposed
//! in Bohr. Coverage runs H through Xe; heavier elements return `None`
//! and must be handled by the caller.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::geometry::ANGSTROM_TO_BOHR;

/// Single-bond covalent radii in Angstrom, indexed by atomic number.
/// Index 0 is a placeholder so that `RADII[z]` indexes directly.
const COVALENT_RADII_ANGSTROM: [f64; 55] = [
    0.00, // placeholder
    0.31, // H
    0.28, // He
    1.28, // Li
    0.96, // Be
    0.84, // B
    0.76, // C
    0.71, // N
    0.66, // O
    0.57, // F
    0.58, // Ne
    1.66, // Na
    1.41, // Mg
    1.21, // Al
    1.11, // Si
    1.07, // P
    1.05, // S
    1.02, // Cl
    1.06, // Ar
    2.03, // K
    1.76, // Ca
    1.70, // Sc
    1.60, // Ti
    1.53, // V
    1.39, // Cr
    1.39, // Mn
    1.32, // Fe
    1.26, // Co
    1.24, // Ni
    1.32, // Cu
    1.22, // Zn
    1.22, // Ga
    1.20, // Ge
    1.19, // As
    1.20, // Se
    1.20, // Br
    1.16, // Kr
    2.20, // Rb
    1.95, // Sr
    1.90, // Y
    1.75, // Zr
    1.64, // Nb
    1.54, // Mo
    1.47, // Tc
    1.46, // Ru
    1.42, // Rh
    1.39, // Pd
    1.45, // Ag
    1.44, // Cd
    1.42, // In
    1.39, // Sn
    1.39, // Sb
    1.38, // Te
    1.39, // I
    1.40, // Xe
];

/// Element symbols indexed by atomic number (index 0 is a placeholder).
const SYMBOLS: [&str; 55] = [
    "", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S",
    "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge",
    "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe",
];

lazy_static! {
    static ref SYMBOL_TO_Z: HashMap<&'static str, u32> = {
        let mut map = HashMap::new();
        for (z, symbol) in SYMBOLS.iter().enumerate().skip(1) {
            map.insert(*symbol, z as u32);
        }
        map
    };
}

/// Tabulated single-bond covalent radius in Bohr for atomic number `z`,
/// or `None` when the element is outside the table.
pub fn covalent_radius(z: u32) -> Option<f64> {
    if z == 0 {
        return None;
    }
    COVALENT_RADII_ANGSTROM
        .get(z as usize)
        .map(|r| r * ANGSTROM_TO_BOHR)
}

/// Atomic number for an element symbol (case-sensitive, e.g. `"Cl"`).
pub fn atomic_number(symbol: &str) -> Option<u32> {
    SYMBOL_TO_Z.get(symbol).copied()
}

/// Element symbol for an atomic number, or `None` when outside the table.
pub fn symbol(z: u32) -> Option<&'static str> {
    if z == 0 {
        return None;
    }
    SYMBOLS.get(z as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_lookup() {
        let r = covalent_radius(1).unwrap();
        assert!((r - 0.31 / 0.52917720859).abs() < 1e-12);
        assert!(covalent_radius(0).is_none());
        assert!(covalent_radius(120).is_none());
    }

    #[test]
    fn test_symbol_round_trip() {
        assert_eq!(atomic_number("C"), Some(6));
        assert_eq!(symbol(6), Some("C"));
        assert_eq!(atomic_number("Zz"), None);
        assert_eq!(symbol(0), None);
    }
}
