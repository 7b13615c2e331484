// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Circular Analytic Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Ad-hoc circular geometry from five scalars.
//!
//! Assumes r/Rmin equals the normalized toroidal flux coordinate and that
//! flux surfaces are concentric circles stretched by an elongation that
//! ramps linearly from 1 on axis to `kappa` at the edge:
//!   κ(ρ) = 1 + ρ (κ_edge − 1)
//!   V = 2π² R₀ r² κ,   A = π r² κ
//! V' and S' are the exact derivatives of these expressions with respect to
//! r, including the elongation ramp term.
//!
//! `g3 = <1/R²>` for a circle of radius r is 1/(R₀² (1 − (r/R₀)²)^{3/2}),
//! which diverges as r → R₀. Inputs must satisfy Rmin < Rmaj; this is the
//! model's validity domain and is only warned about.

use crate::geometry::{CircularAnalyticalGeometry, Geometry, GeometryType};
use geometry_math::axis::ratio_with_axis_limit;
use geometry_types::config::CircularGeometryConfig;
use geometry_types::error::GeometryResult;
use geometry_types::grid::Grid1D;
use ndarray::{Array1, Zip};
use std::f64::consts::PI;

/// Shape profiles of the elongated torus on one radial grid.
struct TorusShape {
    kappa: Array1<f64>,
    volume: Array1<f64>,
    area: Array1<f64>,
    vpr: Array1<f64>,
    spr: Array1<f64>,
}

fn torus_shape(r_norm: &Array1<f64>, rmax: f64, rmaj: f64, kappa_edge: f64) -> TorusShape {
    let ramp = (kappa_edge - 1.0) / rmax;
    let kappa = r_norm.mapv(|x| 1.0 + x * (kappa_edge - 1.0));
    let r = r_norm * rmax;

    let volume = Zip::from(&r)
        .and(&kappa)
        .map_collect(|&r, &k| 2.0 * PI * PI * rmaj * r * r * k);
    let area = Zip::from(&r)
        .and(&kappa)
        .map_collect(|&r, &k| PI * r * r * k);
    let vpr = Zip::from(&r)
        .and(&kappa)
        .and(&volume)
        .map_collect(|&r, &k, &v| 4.0 * PI * PI * rmaj * r * k + v / k * ramp);
    let spr = Zip::from(&r)
        .and(&kappa)
        .and(&area)
        .map_collect(|&r, &k, &a| 2.0 * PI * r * k + a / k * ramp);

    TorusShape {
        kappa,
        volume,
        area,
        vpr,
        spr,
    }
}

fn g2_circular(r: &Array1<f64>) -> Array1<f64> {
    r.mapv(|r| 16.0 * PI.powi(4) * r * r)
}

fn g3_circular(r: &Array1<f64>, rmaj: f64) -> Array1<f64> {
    r.mapv(|r| 1.0 / (rmaj * rmaj * (1.0 - (r / rmaj).powi(2)).powf(1.5)))
}

/// Build a [`CircularAnalyticalGeometry`].
pub fn build_circular_geometry(
    config: &CircularGeometryConfig,
) -> GeometryResult<CircularAnalyticalGeometry> {
    config.validate()?;
    if config.rmin >= config.rmaj {
        log::warn!(
            "circular geometry: Rmin={} >= Rmaj={} is outside the model validity domain; \
             g3 will be non-finite",
            config.rmin,
            config.rmaj
        );
    }

    let nr = config.nr;
    let rmaj = config.rmaj;
    let b0 = config.b0;
    let kappa_edge = config.kappa;

    // Slab uniform mesh on the unit interval.
    let dr_norm = 1.0 / nr as f64;
    let mesh = Grid1D::new(nr, dr_norm)?;
    let rmax = config.rmin;

    let r_face_norm = mesh.face_centers.clone();
    let r_norm = mesh.cell_centers.clone();
    let dr = dr_norm * rmax;
    let r_face = &r_face_norm * rmax;
    let r = &r_norm * rmax;

    let cell = torus_shape(&r_norm, rmax, rmaj, kappa_edge);
    let face = torus_shape(&r_face_norm, rmax, rmaj, kappa_edge);

    // Refined grid for psi <-> current manipulations.
    let r_hires_norm = Array1::linspace(0.0, 1.0, nr * config.hires_fac);
    let r_hires = &r_hires_norm * rmax;
    let hires = torus_shape(&r_hires_norm, rmax, rmaj, kappa_edge);

    let delta_face = Array1::zeros(nr + 1);

    let g0 = cell.vpr.clone();
    let g0_face = face.vpr.clone();
    let g1 = cell.vpr.mapv(|v| v * v);
    let g1_face = face.vpr.mapv(|v| v * v);
    let g2 = g2_circular(&r);
    let g2_face = g2_circular(&r_face);
    let g3 = g3_circular(&r, rmaj);
    let g3_face = g3_circular(&r_face, rmaj);

    let g2g3_over_rho = &g2 * &g3 / &r;
    let g2g3_over_rho_face =
        ratio_with_axis_limit((&g2_face * &g3_face).view(), r_face.view(), 0.0);
    let g2g3_hires = &g2_circular(&r_hires) * &g3_circular(&r_hires, rmaj);
    let g2g3_over_rho_hires = ratio_with_axis_limit(g2g3_hires.view(), r_hires.view(), 0.0);

    // Constant-q simplification: J = R B / (R₀ B₀) = 1, F = R₀ B₀.
    let j = Array1::ones(nr);
    let j_face = Array1::ones(nr + 1);
    let j_hires = Array1::ones(r_hires.len());
    let f = Array1::from_elem(nr, rmaj * b0);
    let f_face = Array1::from_elem(nr + 1, rmaj * b0);

    let r_out = r.mapv(|r| rmaj + r);
    let r_out_face = r_face.mapv(|r| rmaj + r);
    let r_in = r.mapv(|r| rmaj - r);
    let r_in_face = r_face.mapv(|r| rmaj - r);

    let vpr2 = cell.vpr.mapv(|v| v * v);
    let vpr2_face = face.vpr.mapv(|v| v * v);
    let g1_over_vpr = &g1 / &cell.vpr;
    let g1_over_vpr2 = &g1 / &vpr2;
    let g0_over_vpr_face = ratio_with_axis_limit(g0_face.view(), face.vpr.view(), 1.0);
    let g1_over_vpr_face = ratio_with_axis_limit(g1_face.view(), face.vpr.view(), 0.0);
    let g1_over_vpr2_face = ratio_with_axis_limit(g1_face.view(), vpr2_face.view(), 1.0);

    log::debug!(
        "circular geometry: nr={nr}, hires={}, Rmaj={rmaj}, Rmin={rmax}, B0={b0}, kappa={kappa_edge}",
        r_hires.len()
    );

    Ok(CircularAnalyticalGeometry {
        geometry: Geometry {
            geometry_type: GeometryType::Circular,
            dr_norm,
            dr,
            mesh,
            rmax,
            r_face_norm,
            r_norm,
            r_face,
            r,
            rmaj,
            rmin: rmax,
            b0,
            volume: cell.volume,
            volume_face: face.volume,
            area: cell.area,
            area_face: face.area,
            vpr: cell.vpr,
            vpr_face: face.vpr,
            spr_cell: cell.spr,
            spr_face: face.spr,
            delta_face,
            g0,
            g0_face,
            g1,
            g1_face,
            g2,
            g2_face,
            g3,
            g3_face,
            g2g3_over_rho,
            g2g3_over_rho_face,
            g2g3_over_rho_hires,
            g0_over_vpr_face,
            g1_over_vpr,
            g1_over_vpr_face,
            g1_over_vpr2,
            g1_over_vpr2_face,
            j,
            j_face,
            j_hires,
            f,
            f_face,
            r_in,
            r_in_face,
            r_out,
            r_out_face,
            volume_hires: hires.volume,
            area_hires: hires.area,
            spr_hires: hires.spr,
            r_hires_norm,
            r_hires,
            vpr_hires: hires.vpr,
        },
        kappa: cell.kappa,
        kappa_face: face.kappa,
        kappa_hires: hires.kappa,
    })
}
