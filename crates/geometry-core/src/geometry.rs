// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Geometry Records
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Magnetic geometry consumed by the radial transport solver.
//!
//! Array suffixes follow one convention throughout: no suffix is the cell
//! grid `[nx]`, `_face` is the face grid `[nx + 1]`, `_hires` is the
//! refined grid `[nx * hires_fac]`. Index 0 of every face array sits on the
//! magnetic axis.

use geometry_types::grid::{face_to_cell, Grid1D};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Which builder produced a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryType {
    Circular,
    Chease,
}

impl GeometryType {
    /// Stable integer code: 0 circular, 1 CHEASE.
    pub fn as_code(self) -> u8 {
        match self {
            GeometryType::Circular => 0,
            GeometryType::Chease => 1,
        }
    }
}

/// Fields shared by every geometry variant.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub geometry_type: GeometryType,
    /// Cell width in the normalized radial coordinate.
    pub dr_norm: f64,
    /// Cell width [m].
    pub dr: f64,
    pub mesh: Grid1D,
    /// Radius denormalization constant [m].
    pub rmax: f64,
    pub r_face_norm: Array1<f64>,
    pub r_norm: Array1<f64>,
    pub r_face: Array1<f64>,
    pub r: Array1<f64>,
    /// Major radius [m].
    pub rmaj: f64,
    /// Minor radius [m].
    pub rmin: f64,
    /// On-axis toroidal field [T].
    pub b0: f64,
    pub volume: Array1<f64>,
    pub volume_face: Array1<f64>,
    pub area: Array1<f64>,
    pub area_face: Array1<f64>,
    /// dV/dρ.
    pub vpr: Array1<f64>,
    pub vpr_face: Array1<f64>,
    /// dS/dρ.
    pub spr_cell: Array1<f64>,
    pub spr_face: Array1<f64>,
    /// Average triangularity.
    pub delta_face: Array1<f64>,
    /// <∇V>
    pub g0: Array1<f64>,
    pub g0_face: Array1<f64>,
    /// <(∇V)²>
    pub g1: Array1<f64>,
    pub g1_face: Array1<f64>,
    /// <(∇V)²/R²>
    pub g2: Array1<f64>,
    pub g2_face: Array1<f64>,
    /// <1/R²>
    pub g3: Array1<f64>,
    pub g3_face: Array1<f64>,
    pub g2g3_over_rho: Array1<f64>,
    pub g2g3_over_rho_face: Array1<f64>,
    pub g2g3_over_rho_hires: Array1<f64>,
    pub g0_over_vpr_face: Array1<f64>,
    pub g1_over_vpr: Array1<f64>,
    pub g1_over_vpr_face: Array1<f64>,
    pub g1_over_vpr2: Array1<f64>,
    pub g1_over_vpr2_face: Array1<f64>,
    /// F / (Rmaj·B0), the normalized toroidal-field flux function.
    pub j: Array1<f64>,
    pub j_face: Array1<f64>,
    pub j_hires: Array1<f64>,
    /// F = R·B_φ [T·m].
    pub f: Array1<f64>,
    pub f_face: Array1<f64>,
    /// Inboard midplane major radius [m].
    pub r_in: Array1<f64>,
    pub r_in_face: Array1<f64>,
    /// Outboard midplane major radius [m].
    pub r_out: Array1<f64>,
    pub r_out_face: Array1<f64>,
    pub volume_hires: Array1<f64>,
    pub area_hires: Array1<f64>,
    pub spr_hires: Array1<f64>,
    pub r_hires_norm: Array1<f64>,
    pub r_hires: Array1<f64>,
    pub vpr_hires: Array1<f64>,
}

impl Geometry {
    /// Number of radial cells.
    pub fn nx(&self) -> usize {
        self.mesh.nx
    }

    pub fn hires_len(&self) -> usize {
        self.r_hires.len()
    }

    /// Cell values of a face profile on this geometry's mesh.
    pub fn face_to_cell(&self, face: &Array1<f64>) -> Array1<f64> {
        face_to_cell(face.view())
    }
}

/// Analytic circular geometry with a linearly ramped elongation.
/// Intended for testing and demonstration runs.
#[derive(Debug, Clone)]
pub struct CircularAnalyticalGeometry {
    pub geometry: Geometry,
    pub kappa: Array1<f64>,
    pub kappa_face: Array1<f64>,
    pub kappa_hires: Array1<f64>,
}

/// Geometry derived from a numerical equilibrium.
#[derive(Debug, Clone)]
pub struct StandardGeometry {
    pub geometry: Geometry,
    /// Poloidal flux from the equilibrium [Wb].
    pub psi: Array1<f64>,
    /// Poloidal flux reconstructed from the current profile [Wb].
    pub psi_from_ip: Array1<f64>,
    /// Total toroidal current density [A/m²].
    pub jtot: Array1<f64>,
    pub jtot_face: Array1<f64>,
    pub delta_upper_face: Array1<f64>,
    pub delta_lower_face: Array1<f64>,
}

impl AsRef<Geometry> for CircularAnalyticalGeometry {
    fn as_ref(&self) -> &Geometry {
        &self.geometry
    }
}

impl AsRef<Geometry> for StandardGeometry {
    fn as_ref(&self) -> &Geometry {
        &self.geometry
    }
}

/// Either geometry variant, dispatched by tag.
#[derive(Debug, Clone)]
pub enum AnyGeometry {
    Circular(CircularAnalyticalGeometry),
    Standard(StandardGeometry),
}

impl AnyGeometry {
    pub fn geometry(&self) -> &Geometry {
        match self {
            AnyGeometry::Circular(g) => &g.geometry,
            AnyGeometry::Standard(g) => &g.geometry,
        }
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry().geometry_type
    }

    pub fn as_circular(&self) -> Option<&CircularAnalyticalGeometry> {
        match self {
            AnyGeometry::Circular(g) => Some(g),
            AnyGeometry::Standard(_) => None,
        }
    }

    pub fn as_standard(&self) -> Option<&StandardGeometry> {
        match self {
            AnyGeometry::Standard(g) => Some(g),
            AnyGeometry::Circular(_) => None,
        }
    }
}

impl AsRef<Geometry> for AnyGeometry {
    fn as_ref(&self) -> &Geometry {
        self.geometry()
    }
}

impl From<CircularAnalyticalGeometry> for AnyGeometry {
    fn from(g: CircularAnalyticalGeometry) -> Self {
        AnyGeometry::Circular(g)
    }
}

impl From<StandardGeometry> for AnyGeometry {
    fn from(g: StandardGeometry) -> Self {
        AnyGeometry::Standard(g)
    }
}

/// Plasma current the caller's configuration should adopt so that it stays
/// consistent with the equilibrium a geometry was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentUpdate {
    /// Total plasma current [MA].
    pub ip_ma: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circular::build_circular_geometry;
    use geometry_types::config::CircularGeometryConfig;

    #[test]
    fn test_geometry_type_codes() {
        assert_eq!(GeometryType::Circular.as_code(), 0);
        assert_eq!(GeometryType::Chease.as_code(), 1);
    }

    #[test]
    fn test_any_geometry_dispatch() {
        let circ = build_circular_geometry(&CircularGeometryConfig::default()).unwrap();
        let any = AnyGeometry::from(circ);
        assert_eq!(any.geometry_type(), GeometryType::Circular);
        assert!(any.as_circular().is_some());
        assert!(any.as_standard().is_none());
        assert_eq!(any.geometry().nx(), 25);
        assert_eq!(any.as_ref().hires_len(), 100);
    }

    #[test]
    fn test_face_to_cell_on_mesh() {
        let geo = build_circular_geometry(&CircularGeometryConfig::default()).unwrap();
        let g = &geo.geometry;
        let cell = g.face_to_cell(&g.r_face);
        assert_eq!(cell.len(), g.nx());
        for i in 0..g.nx() {
            assert!((cell[i] - g.r[i]).abs() < 1e-12);
        }
    }
}
