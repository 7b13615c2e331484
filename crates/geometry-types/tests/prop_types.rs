// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Property-Based Tests (proptest) for geometry-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for geometry-types using proptest.
//!
//! Covers: Grid1D construction invariants, face_to_cell averaging,
//! configuration serialization roundtrip.

use geometry_types::config::{CircularGeometryConfig, GeometryConfig, SimulationConfig};
use geometry_types::grid::{face_to_cell, Grid1D};
use ndarray::Array1;
use proptest::prelude::*;

// ── Grid1D Construction Invariants ───────────────────────────────────

proptest! {
    /// Array lengths match the cell count.
    #[test]
    fn grid_lengths_match(nx in 1usize..512, dx in 1e-4f64..10.0) {
        let grid = Grid1D::new(nx, dx).unwrap();

        prop_assert_eq!(grid.nx, nx);
        prop_assert_eq!(grid.face_centers.len(), nx + 1);
        prop_assert_eq!(grid.cell_centers.len(), nx);
    }

    /// Every cell center is exactly the midpoint of its two faces.
    #[test]
    fn grid_cells_are_midpoints(nx in 1usize..256, dx in 1e-4f64..10.0) {
        let grid = Grid1D::new(nx, dx).unwrap();
        for i in 0..nx {
            let mid = 0.5 * (grid.face_centers[i] + grid.face_centers[i + 1]);
            prop_assert_eq!(grid.cell_centers[i], mid,
                "cell {} = {} is not the face midpoint {}", i, grid.cell_centers[i], mid);
        }
    }

    /// Faces and cells are strictly increasing.
    #[test]
    fn grid_monotone(nx in 2usize..256, dx in 1e-4f64..10.0) {
        let grid = Grid1D::new(nx, dx).unwrap();
        for i in 1..=nx {
            prop_assert!(grid.face_centers[i] > grid.face_centers[i - 1],
                "faces not monotone at {}", i);
        }
        for i in 1..nx {
            prop_assert!(grid.cell_centers[i] > grid.cell_centers[i - 1],
                "cells not monotone at {}", i);
        }
    }

    /// Boundary faces sit at 0 and nx·dx, spacing is uniform.
    #[test]
    fn grid_boundary_and_spacing(nx in 1usize..256, dx in 1e-3f64..10.0) {
        let grid = Grid1D::new(nx, dx).unwrap();
        let extent = nx as f64 * dx;

        prop_assert_eq!(grid.face_centers[0], 0.0);
        prop_assert!((grid.face_centers[nx] - extent).abs() < 1e-12 * extent.max(1.0));
        prop_assert!((grid.cell_centers[0] - 0.5 * dx).abs() < 1e-12 * extent.max(1.0));
        for i in 1..=nx {
            let delta = grid.face_centers[i] - grid.face_centers[i - 1];
            prop_assert!((delta - dx).abs() < 1e-9 * dx.max(1.0),
                "Non-uniform spacing at {}: delta={}, dx={}", i, delta, dx);
        }
    }

    /// Non-positive spacing is always rejected.
    #[test]
    fn grid_rejects_non_positive_dx(nx in 1usize..64, dx in -10.0f64..=0.0) {
        prop_assert!(Grid1D::new(nx, dx).is_err());
    }
}

// ── face_to_cell Properties ──────────────────────────────────────────

proptest! {
    /// Linear face profiles map onto the same line evaluated at cell centers.
    #[test]
    fn face_to_cell_linear_exact(
        nx in 1usize..128,
        a in -100.0f64..100.0,
        b in -100.0f64..100.0,
    ) {
        let grid = Grid1D::new(nx, 1.0 / nx as f64).unwrap();
        let face = grid.face_centers.mapv(|x| a + b * x);
        let cell = face_to_cell(face.view());

        prop_assert_eq!(cell.len(), nx);
        for i in 0..nx {
            let expected = a + b * grid.cell_centers[i];
            prop_assert!((cell[i] - expected).abs() < 1e-10,
                "cell[{}] = {}, expected {}", i, cell[i], expected);
        }
    }

    /// Averaging never leaves the bracket of the neighbouring faces.
    #[test]
    fn face_to_cell_bounded(values in prop::collection::vec(-1e3f64..1e3, 2..64)) {
        let face = Array1::from(values);
        let cell = face_to_cell(face.view());
        for i in 0..cell.len() {
            let lo = face[i].min(face[i + 1]);
            let hi = face[i].max(face[i + 1]);
            prop_assert!(cell[i] >= lo && cell[i] <= hi);
        }
    }
}

// ── Config Roundtrip ─────────────────────────────────────────────────

proptest! {
    /// Circular geometry configs survive JSON serialization.
    #[test]
    fn circular_config_roundtrip(
        nr in 1usize..200,
        kappa in 1.0f64..2.5,
        rmaj in 1.0f64..10.0,
        hires_fac in 1usize..8,
    ) {
        let cfg = SimulationConfig {
            runtime: Default::default(),
            geometry: GeometryConfig::Circular(CircularGeometryConfig {
                nr,
                kappa,
                rmaj,
                rmin: 0.3 * rmaj,
                b0: 5.3,
                hires_fac,
            }),
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back = SimulationConfig::from_json_str(&json).unwrap();
        let GeometryConfig::Circular(circ) = back.geometry else {
            return Err(TestCaseError::fail("geometry type changed in roundtrip"));
        };
        prop_assert_eq!(circ.nr, nr);
        prop_assert_eq!(circ.hires_fac, hires_fac);
        prop_assert!((circ.kappa - kappa).abs() < 1e-12);
        prop_assert!((circ.rmaj - rmaj).abs() < 1e-12);
    }
}
