// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Equilibrium-Derived Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Standard geometry from flux-surface-averaged equilibrium profiles.
//!
//! All input profiles live on the equilibrium's normalized toroidal flux
//! coordinate `rhon`. The builder
//!   1. combines the flux-surface integrals into metric coefficients g0..g3,
//!   2. reconstructs a poloidal flux consistent with the current profile,
//!   3. either rescales that flux to a requested plasma current or reports
//!      the equilibrium current back to the caller,
//!   4. differentiates volume, area and current,
//!   5. maps everything onto the solver's cell, face and hires grids.

use crate::geometry::{CurrentUpdate, Geometry, GeometryType, StandardGeometry};
use geometry_math::axis::ratio_with_axis_limit;
use geometry_math::integrate::cumulative_trapezoid;
use geometry_math::interp::{check_strictly_increasing, gradient, interp1d};
use geometry_types::constants::{AMPERES_PER_MA, MU0};
use geometry_types::error::{GeometryError, GeometryResult};
use geometry_types::grid::Grid1D;
use ndarray::{Array1, ArrayView1};
use std::f64::consts::PI;

/// Unnormalized equilibrium profiles, all sampled on `rhon`.
#[derive(Debug, Clone)]
pub struct StandardGeometryIntermediates {
    /// Major radius [m].
    pub rmaj: f64,
    /// Minor radius [m].
    pub rmin: f64,
    /// On-axis toroidal field [T].
    pub b: f64,
    /// Poloidal flux [Wb].
    pub psi: Array1<f64>,
    /// Enclosed plasma current [A].
    pub ip: Array1<f64>,
    /// Toroidal flux radius sqrt(Φ/πB₀) [m].
    pub rho: Array1<f64>,
    /// Normalized toroidal flux coordinate, strictly increasing.
    pub rhon: Array1<f64>,
    /// Inboard midplane major radius [m].
    pub r_in: Array1<f64>,
    /// Outboard midplane major radius [m].
    pub r_out: Array1<f64>,
    /// Toroidal-field flux function R·B_φ [T·m].
    pub rbphi: Array1<f64>,
    /// ∫ J dχ, the flux-surface Jacobian integral.
    pub int_jdchi: Array1<f64>,
    /// <1/R²>
    pub flux_norm_1_over_r2: Array1<f64>,
    /// <Bp²>
    pub flux_norm_bp2: Array1<f64>,
    /// <|∇ψ|>
    pub flux_norm_dpsi: Array1<f64>,
    /// <|∇ψ|²>
    pub flux_norm_dpsi2: Array1<f64>,
    pub delta_upper_face: Array1<f64>,
    pub delta_lower_face: Array1<f64>,
    /// Enclosed volume [m³].
    pub volume: Array1<f64>,
    /// Enclosed poloidal cross-section area [m²].
    pub area: Array1<f64>,
}

impl StandardGeometryIntermediates {
    fn named_profiles(&self) -> [(&'static str, &Array1<f64>); 16] {
        [
            ("psi", &self.psi),
            ("Ip", &self.ip),
            ("rho", &self.rho),
            ("rhon", &self.rhon),
            ("Rin", &self.r_in),
            ("Rout", &self.r_out),
            ("RBPhi", &self.rbphi),
            ("int_Jdchi", &self.int_jdchi),
            ("flux_norm_1_over_R2", &self.flux_norm_1_over_r2),
            ("flux_norm_Bp2", &self.flux_norm_bp2),
            ("flux_norm_dpsi", &self.flux_norm_dpsi),
            ("flux_norm_dpsi2", &self.flux_norm_dpsi2),
            ("delta_upper_face", &self.delta_upper_face),
            ("delta_lower_face", &self.delta_lower_face),
            ("volume", &self.volume),
            ("area", &self.area),
        ]
    }

    /// Shape and content checks. Profiles with mismatched lengths or a
    /// non-increasing abscissa are rejected, never coerced.
    pub fn validate(&self) -> GeometryResult<()> {
        for (name, value) in [("Rmaj", self.rmaj), ("Rmin", self.rmin), ("B0", self.b)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GeometryError::PhysicsViolation(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }

        let n = self.rhon.len();
        if n < 2 {
            return Err(GeometryError::PhysicsViolation(format!(
                "equilibrium profiles need at least 2 radial samples, got {n}"
            )));
        }
        for (name, profile) in self.named_profiles() {
            if profile.len() != n {
                return Err(GeometryError::ProfileLengthMismatch {
                    name: name.to_string(),
                    expected: n,
                    actual: profile.len(),
                });
            }
            if let Some(idx) = profile.iter().position(|v| !v.is_finite()) {
                return Err(GeometryError::PhysicsViolation(format!(
                    "profile '{name}' has a non-finite value at index {idx}"
                )));
            }
        }

        check_strictly_increasing("rhon", self.rhon.view())?;
        check_strictly_increasing("rho", self.rho.view())?;
        check_strictly_increasing("volume", self.volume.view())?;

        if self.r_in[0] <= 0.0 {
            return Err(GeometryError::PhysicsViolation(format!(
                "on-axis Rin must be > 0, got {}",
                self.r_in[0]
            )));
        }
        Ok(())
    }
}

/// Piecewise-linear remapping from `rhon` onto the solver grids.
struct Remap<'a> {
    rhon: ArrayView1<'a, f64>,
    cell: ArrayView1<'a, f64>,
    face: ArrayView1<'a, f64>,
    hires: ArrayView1<'a, f64>,
}

impl Remap<'_> {
    fn cell(&self, fp: &Array1<f64>) -> GeometryResult<Array1<f64>> {
        interp1d(self.cell, self.rhon, fp.view())
    }

    fn face(&self, fp: &Array1<f64>) -> GeometryResult<Array1<f64>> {
        interp1d(self.face, self.rhon, fp.view())
    }

    fn hires(&self, fp: &Array1<f64>) -> GeometryResult<Array1<f64>> {
        interp1d(self.hires, self.rhon, fp.view())
    }
}

/// Slope dψ/dρ implied by the enclosed current:
///   dψ/dρ = 16 μ₀ π⁴ Ip / (g2g3/ρ · R₀ · F)
/// Zero on axis by symmetry.
fn flux_slope_from_current(
    ip: &Array1<f64>,
    g2g3_over_rho: &Array1<f64>,
    rmaj: f64,
    rbphi: &Array1<f64>,
) -> Array1<f64> {
    let num = ip * (16.0 * MU0 * PI.powi(4));
    let den = g2g3_over_rho * rbphi * rmaj;
    ratio_with_axis_limit(num.view(), den.view(), 0.0)
}

/// Build a [`StandardGeometry`] on an `nr`-cell grid.
///
/// With `config_ip` [MA] the reconstructed flux and current density are
/// rescaled so the edge current equals `config_ip`, and no update is
/// returned. Without it the equilibrium edge current is returned as a
/// [`CurrentUpdate`] for the caller to adopt.
pub fn build_standard_geometry(
    inputs: &StandardGeometryIntermediates,
    nr: usize,
    hires_fac: usize,
    config_ip: Option<f64>,
) -> GeometryResult<(StandardGeometry, Option<CurrentUpdate>)> {
    if nr < 1 || hires_fac < 1 {
        return Err(GeometryError::ConfigError(format!(
            "nr and hires_fac must be >= 1, got nr={nr}, hires_fac={hires_fac}"
        )));
    }
    inputs.validate()?;

    let n = inputs.rhon.len();
    let last = n - 1;
    let rmaj = inputs.rmaj;
    let b = inputs.b;
    let rho = &inputs.rho;
    let rhon = &inputs.rhon;
    let ip = &inputs.ip;

    if rhon[0] != 0.0 {
        log::warn!(
            "standard geometry: rhon starts at {} instead of the magnetic axis",
            rhon[0]
        );
    }

    // Flux surface integrals of the geometry quantities.
    let c1 = &inputs.int_jdchi;
    let c2 = &inputs.flux_norm_1_over_r2 * c1;
    let c3 = &inputs.flux_norm_bp2 * c1;
    let c4 = &inputs.flux_norm_dpsi2 * c1;

    let g0 = &inputs.flux_norm_dpsi * c1; // <∇V>
    let g1 = c1 * &c4; // <(∇V)²>
    let g2 = c1 * &c3; // <(∇V)²/R²>
    let r_in_axis = inputs.r_in[0];
    let g3 = ratio_with_axis_limit(c2.view(), c1.view(), 1.0 / (r_in_axis * r_in_axis)); // <1/R²>
    let g2g3_over_rho = ratio_with_axis_limit((&g2 * &g3).view(), rho.view(), 0.0);

    // Flux consistent with the current profile. Equilibrium psi often has
    // noisy second derivatives, so the solver may prefer this one.
    let dpsidrho = flux_slope_from_current(ip, &g2g3_over_rho, rmaj, &inputs.rbphi);
    let mut psi_from_ip = cumulative_trapezoid(dpsidrho.view(), rho.view());
    // Edge point from the current-consistent slope, not the trapezoid.
    psi_from_ip[last] = psi_from_ip[last - 1] + dpsidrho[last] * (rho[last] - rho[last - 1]);

    let (ip_scale_factor, current_update) = match config_ip {
        Some(target_ma) => {
            if !target_ma.is_finite() {
                return Err(GeometryError::ConfigError(format!(
                    "target plasma current must be finite, got {target_ma}"
                )));
            }
            if ip[last] == 0.0 {
                return Err(GeometryError::PhysicsViolation(
                    "equilibrium edge current is zero; cannot rescale to target Ip".to_string(),
                ));
            }
            let scale = target_ma * AMPERES_PER_MA / ip[last];
            log::info!(
                "standard geometry: rescaling psi to Ip={target_ma} MA (scale factor {scale:.6})"
            );
            (scale, None)
        }
        None => {
            let ip_ma = ip[last] / AMPERES_PER_MA;
            log::info!("standard geometry: adopting equilibrium Ip={ip_ma} MA");
            (1.0, Some(CurrentUpdate { ip_ma }))
        }
    };
    psi_from_ip *= ip_scale_factor;

    // dV/dρ, dS/dρ. The one-sided difference is meaningless at the
    // coordinate-singular axis, so index 0 is pinned to zero.
    let mut vpr = gradient(inputs.volume.view(), rho.view())?;
    let mut spr = gradient(inputs.area.view(), rho.view())?;
    vpr[0] = 0.0;
    spr[0] = 0.0;

    let jtot = gradient(ip.view(), inputs.volume.view())? * (2.0 * PI * rmaj * ip_scale_factor);

    // Solver grid in rho_tor_norm, denormalized by the edge toroidal radius.
    let dr_norm = rhon[last] / nr as f64;
    let mesh = Grid1D::new(nr, dr_norm)?;
    let rmax = rho[last];
    let r_face_norm = mesh.face_centers.clone();
    let r_norm = mesh.cell_centers.clone();
    let dr = dr_norm * rmax;
    let r_face = &r_face_norm * rmax;
    let r = &r_norm * rmax;

    let r_hires_norm = Array1::linspace(0.0, 1.0, nr * hires_fac);
    let r_hires = &r_hires_norm * rmax;

    let remap = Remap {
        rhon: rhon.view(),
        cell: r_norm.view(),
        face: r_face_norm.view(),
        hires: r_hires_norm.view(),
    };

    let vpr_face = remap.face(&vpr)?;
    let vpr_hires = remap.hires(&vpr)?;
    let vpr_cell = remap.cell(&vpr)?;

    let spr_face = remap.face(&spr)?;
    let spr_cell = remap.cell(&spr)?;
    let spr_hires = remap.hires(&spr)?;

    let delta_upper_face = remap.face(&inputs.delta_upper_face)?;
    let delta_lower_face = remap.face(&inputs.delta_lower_face)?;
    let delta_face = (&delta_upper_face + &delta_lower_face) * 0.5;

    let f_face = remap.face(&inputs.rbphi)?;
    let f_hires = remap.hires(&inputs.rbphi)?;
    let f = remap.cell(&inputs.rbphi)?;
    let j = &f / (rmaj * b);
    let j_face = &f_face / (rmaj * b);
    let j_hires = &f_hires / (rmaj * b);

    let psi = remap.cell(&inputs.psi)?;
    let psi_from_ip = remap.cell(&psi_from_ip)?;

    let jtot_face = remap.face(&jtot)?;
    let jtot_cell = remap.cell(&jtot)?;

    let r_in_face = remap.face(&inputs.r_in)?;
    let r_in = remap.cell(&inputs.r_in)?;
    let r_out_face = remap.face(&inputs.r_out)?;
    let r_out = remap.cell(&inputs.r_out)?;

    let g0_face = remap.face(&g0)?;
    let g0_cell = remap.cell(&g0)?;
    let g1_face = remap.face(&g1)?;
    let g1_cell = remap.cell(&g1)?;
    let g2_face = remap.face(&g2)?;
    let g2_cell = remap.cell(&g2)?;
    let g3_face = remap.face(&g3)?;
    let g3_cell = remap.cell(&g3)?;

    let g2g3_over_rho_face = remap.face(&g2g3_over_rho)?;
    let g2g3_over_rho_hires = remap.hires(&g2g3_over_rho)?;
    let g2g3_over_rho_cell = remap.cell(&g2g3_over_rho)?;

    let volume_face = remap.face(&inputs.volume)?;
    let volume_hires = remap.hires(&inputs.volume)?;
    let volume = remap.cell(&inputs.volume)?;

    let area_face = remap.face(&inputs.area)?;
    let area_hires = remap.hires(&inputs.area)?;
    let area = remap.cell(&inputs.area)?;

    // Repeated terms of the transport equations.
    let vpr2_face = vpr_face.mapv(|v| v * v);
    let g0_over_vpr_face = ratio_with_axis_limit(g0_face.view(), vpr_face.view(), 1.0);
    let g1_over_vpr = &g1_cell / &vpr_cell;
    let g1_over_vpr2 = &g1_cell / &vpr_cell.mapv(|v| v * v);
    let g1_over_vpr_face = ratio_with_axis_limit(g1_face.view(), vpr_face.view(), 0.0);
    let g1_over_vpr2_face = ratio_with_axis_limit(g1_face.view(), vpr2_face.view(), 1.0);

    log::debug!(
        "standard geometry: {n} native samples -> nr={nr}, hires={}, rmax={rmax:.4} m",
        r_hires.len()
    );

    let geometry = Geometry {
        geometry_type: GeometryType::Chease,
        dr_norm,
        dr,
        mesh,
        rmax,
        r_face_norm,
        r_norm,
        r_face,
        r,
        rmaj,
        rmin: inputs.rmin,
        b0: b,
        volume,
        volume_face,
        area,
        area_face,
        vpr: vpr_cell,
        vpr_face,
        spr_cell,
        spr_face,
        delta_face,
        g0: g0_cell,
        g0_face,
        g1: g1_cell,
        g1_face,
        g2: g2_cell,
        g2_face,
        g3: g3_cell,
        g3_face,
        g2g3_over_rho: g2g3_over_rho_cell,
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
        volume_hires,
        area_hires,
        spr_hires,
        r_hires_norm,
        r_hires,
        vpr_hires,
    };

    Ok((
        StandardGeometry {
            geometry,
            psi,
            psi_from_ip,
            jtot: jtot_cell,
            jtot_face,
            delta_upper_face,
            delta_lower_face,
        },
        current_update,
    ))
}
