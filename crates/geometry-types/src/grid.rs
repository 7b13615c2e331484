// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Radial Grid
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Uniform 1-D finite-volume mesh: `nx` cells bounded by `nx + 1` faces.

use crate::error::{GeometryError, GeometryResult};
use ndarray::{s, Array1, ArrayView1};

/// 1-D grid of cells with faces.
///
/// Faces sit at `0, dx, …, nx·dx`; cell centers are the face midpoints
/// `dx/2, 3dx/2, …, (nx - 1/2)·dx`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid1D {
    pub nx: usize,
    pub dx: f64,
    pub face_centers: Array1<f64>, // [nx + 1]
    pub cell_centers: Array1<f64>, // [nx]
}

impl Grid1D {
    /// Build the mesh. `nx == 0` or a non-positive / non-finite `dx` is a
    /// caller error and is rejected rather than clamped.
    pub fn new(nx: usize, dx: f64) -> GeometryResult<Self> {
        if nx == 0 || !dx.is_finite() || dx <= 0.0 {
            return Err(GeometryError::InvalidGrid { nx, dx });
        }
        let face_centers = Array1::linspace(0.0, nx as f64 * dx, nx + 1);
        let cell_centers = face_to_cell(face_centers.view());
        Ok(Grid1D {
            nx,
            dx,
            face_centers,
            cell_centers,
        })
    }

    /// Coordinate of the outermost face.
    pub fn extent(&self) -> f64 {
        self.face_centers[self.nx]
    }
}

/// Cell values from face values by linear interpolation between
/// neighbouring faces: `cell[i] = (face[i] + face[i + 1]) / 2`.
pub fn face_to_cell(face: ArrayView1<f64>) -> Array1<f64> {
    if face.len() < 2 {
        return Array1::zeros(0);
    }
    (&face.slice(s![..-1]) + &face.slice(s![1..])) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_lengths() {
        let grid = Grid1D::new(25, 0.04).unwrap();
        assert_eq!(grid.nx, 25);
        assert_eq!(grid.face_centers.len(), 26);
        assert_eq!(grid.cell_centers.len(), 25);
    }

    #[test]
    fn test_grid_endpoints() {
        let grid = Grid1D::new(10, 0.1).unwrap();
        assert_eq!(grid.face_centers[0], 0.0);
        assert!((grid.extent() - 1.0).abs() < 1e-12);
        assert!((grid.cell_centers[0] - 0.05).abs() < 1e-12);
        assert!((grid.cell_centers[9] - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_cells_are_face_midpoints() {
        let grid = Grid1D::new(7, 0.3).unwrap();
        for i in 0..grid.nx {
            assert_eq!(
                grid.cell_centers[i],
                0.5 * (grid.face_centers[i] + grid.face_centers[i + 1])
            );
        }
    }

    #[test]
    fn test_single_cell() {
        let grid = Grid1D::new(1, 2.0).unwrap();
        assert_eq!(grid.face_centers.to_vec(), vec![0.0, 2.0]);
        assert_eq!(grid.cell_centers.to_vec(), vec![1.0]);
    }

    #[test]
    fn test_rejects_zero_cells() {
        assert!(matches!(
            Grid1D::new(0, 0.1),
            Err(GeometryError::InvalidGrid { nx: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_bad_spacing() {
        assert!(Grid1D::new(5, 0.0).is_err());
        assert!(Grid1D::new(5, -0.1).is_err());
        assert!(Grid1D::new(5, f64::NAN).is_err());
        assert!(Grid1D::new(5, f64::INFINITY).is_err());
    }

    #[test]
    fn test_face_to_cell_linear_profile() {
        let grid = Grid1D::new(12, 0.25).unwrap();
        let face = grid.face_centers.mapv(|x| 3.0 - 2.0 * x);
        let cell = face_to_cell(face.view());
        assert_eq!(cell.len(), grid.nx);
        for (i, &x) in grid.cell_centers.iter().enumerate() {
            assert!((cell[i] - (3.0 - 2.0 * x)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_face_to_cell_short_input() {
        assert_eq!(face_to_cell(Array1::from(vec![1.0]).view()).len(), 0);
        assert_eq!(face_to_cell(Array1::<f64>::zeros(0).view()).len(), 0);
    }
}
