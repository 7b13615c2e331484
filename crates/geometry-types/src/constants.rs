// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Geometry Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::f64::consts::PI;

/// Vacuum permeability (H/m), exact pre-2019 SI definition 4π·10⁻⁷.
/// CHEASE normalizes currents with this value, so it must not be swapped
/// for the CODATA 2018 measurement.
pub const MU0: f64 = 4.0e-7 * PI;

/// Amperes per megaampere. Plasma currents in configuration are in MA.
pub const AMPERES_PER_MA: f64 = 1.0e6;

/// Environment variable consulted (at the application edge) for the
/// equilibrium-file directory.
pub const GEOMETRY_DIR_ENV: &str = "SCPN_GEOMETRY_DIR";

/// Fallback directory for equilibrium files.
pub const DEFAULT_GEOMETRY_DIR: &str = "data/third_party/geo";

/// ITER hybrid scenario equilibrium shipped with the reference data set.
pub const DEFAULT_GEOMETRY_FILE: &str = "ITER_hybrid_citrin_equil_cheasedata.mat2cols";
