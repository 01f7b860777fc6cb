// Integration tests for the B-matrix gradient transform and the
// generalized inverse under coordinate redundancy
use nalgebra::DVector;
use redint::bmatrix::build_b_matrix;
use redint::catalog::{CatalogOptions, CoordinateCatalog};
use redint::connectivity::{Connectivity, ConnectivityOptions};
use redint::geometry::Geometry;
use redint::linalg::DEFAULT_EIGENVALUE_THRESHOLD;
use redint::transform::{cartesian_gradient, internal_gradient, TransformError};

fn build(geometry: &Geometry) -> CoordinateCatalog {
    let _ = env_logger::builder().is_test(true).try_init();
    let conn = Connectivity::detect(geometry, &ConnectivityOptions::default()).unwrap();
    CoordinateCatalog::build(geometry, &conn, &CatalogOptions::default()).unwrap()
}

fn water() -> Geometry {
    Geometry::new(
        vec![8, 1, 1],
        vec![0.0, 0.0, 0.0, 1.43, 1.11, 0.0, -1.43, 1.11, 0.0],
    )
    .unwrap()
}

fn hcch() -> Geometry {
    Geometry::new(
        vec![1, 6, 6, 1],
        vec![
            0.1, 2.0, 0.3, 0.0, 0.0, 0.0, 2.9, 0.2, -0.1, 3.1, -0.5, 2.0,
        ],
    )
    .unwrap()
}

fn ammonium() -> Geometry {
    let t = 1.93_f64 / 3.0_f64.sqrt();
    Geometry::new(
        vec![7, 1, 1, 1, 1],
        vec![
            0.0, 0.0, 0.0,
            t, t, t,
            t, -t, -t,
            -t, t, -t,
            -t, -t, t,
        ],
    )
    .unwrap()
}

/// Send a row-space Cartesian gradient through g_q = G+ B g_x and back via
/// g_x' = B^T g_q; recovery must be exact to tolerance for a non-redundant
/// coordinate set.
fn assert_round_trip(geometry: &Geometry, seed_internal: &[f64]) {
    let catalog = build(geometry);
    let b = build_b_matrix(&catalog, geometry).unwrap();
    assert_eq!(seed_internal.len(), catalog.len());

    // Physical gradients are free of net force and torque, i.e. they lie in
    // the row space of B; construct one explicitly.
    let gx = b.transpose() * DVector::from_column_slice(seed_internal);

    let gq = internal_gradient(&b, &gx, DEFAULT_EIGENVALUE_THRESHOLD).unwrap();
    let gx_back = cartesian_gradient(&b, &gq).unwrap();

    for c in 0..gx.len() {
        assert!(
            (gx_back[c] - gx[c]).abs() < 1e-8,
            "round trip component {}: expected {}, got {}",
            c,
            gx[c],
            gx_back[c]
        );
    }
}

#[test]
fn test_water_round_trip() {
    // Water: 2 stretches + 1 bend = 3 coordinates = 3N - 6, non-redundant.
    assert_round_trip(&water(), &[0.1, -0.2, 0.3]);
}

#[test]
fn test_hcch_round_trip() {
    // Skewed HCCH chain: 6 coordinates, 6 internal degrees of freedom.
    assert_round_trip(&hcch(), &[0.1, -0.2, 0.3, 0.05, -0.15, 0.25]);
}

#[test]
fn test_ammonium_single_null_eigenvalue() {
    let geometry = ammonium();
    let catalog = build(&geometry);
    assert_eq!(catalog.len(), 10);

    let b = build_b_matrix(&catalog, &geometry).unwrap();
    let g = &b * b.transpose();
    let eigen = g.symmetric_eigen();
    let null_count = eigen
        .eigenvalues
        .iter()
        .filter(|l| l.abs() < DEFAULT_EIGENVALUE_THRESHOLD)
        .count();
    assert_eq!(
        null_count, 1,
        "10 redundant coordinates over 9 degrees of freedom leave one null eigenvalue"
    );
}

#[test]
fn test_ammonium_gradient_is_finite() {
    let geometry = ammonium();
    let catalog = build(&geometry);
    let b = build_b_matrix(&catalog, &geometry).unwrap();

    // An arbitrary row-space gradient on the redundant set.
    let seed = DVector::from_fn(catalog.len(), |i, _| 0.05 * (i as f64 + 1.0));
    let gx = b.transpose() * seed;

    let gq = internal_gradient(&b, &gx, DEFAULT_EIGENVALUE_THRESHOLD).unwrap();
    assert_eq!(gq.len(), catalog.len());
    assert!(gq.iter().all(|x| x.is_finite()), "redundancy must not poison the transform");

    // The back-transform reproduces the Cartesian gradient even though the
    // internal representation is not unique.
    let gx_back = cartesian_gradient(&b, &gq).unwrap();
    for c in 0..gx.len() {
        assert!((gx_back[c] - gx[c]).abs() < 1e-8);
    }
}

#[test]
fn test_out_of_row_space_gradient_projects() {
    // A pure translation of the diatomic has no internal component; the
    // round trip yields the row-space projection, zero.
    let geometry = Geometry::new(vec![1, 1], vec![0.0, 0.0, 0.0, 0.8, 0.0, 0.0]).unwrap();
    let catalog = build(&geometry);
    let b = build_b_matrix(&catalog, &geometry).unwrap();

    let translation = DVector::from_vec(vec![0.2, 0.0, 0.0, 0.2, 0.0, 0.0]);
    let gq = internal_gradient(&b, &translation, DEFAULT_EIGENVALUE_THRESHOLD).unwrap();
    assert!(gq[0].abs() < 1e-12);

    let projected = cartesian_gradient(&b, &gq).unwrap();
    assert!(projected.iter().all(|x| x.abs() < 1e-12));
}

#[test]
fn test_gradient_length_mismatch_fails_fast() {
    let geometry = water();
    let catalog = build(&geometry);
    let b = build_b_matrix(&catalog, &geometry).unwrap();

    let wrong = DVector::from_vec(vec![0.0; 7]);
    let result = internal_gradient(&b, &wrong, DEFAULT_EIGENVALUE_THRESHOLD);
    match result {
        Err(TransformError::GradientLength { expected, actual }) => {
            assert_eq!(expected, 9);
            assert_eq!(actual, 7);
        }
        other => panic!("expected GradientLength error, got {:?}", other),
    }
}
