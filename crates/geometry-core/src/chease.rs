// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — CHEASE Equilibrium Interface
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! File-backed entrypoint for CHEASE equilibria.
//!
//! CHEASE `mat2cols` output is a whitespace-separated column table: one
//! header row of labels (optionally led by a `%` comment marker) followed
//! by numeric rows, one per flux surface. Quantities are normalized with
//! the reference major radius and on-axis field and are unnormalized here
//! before the standard builder runs.

use crate::geometry::{CurrentUpdate, StandardGeometry};
use crate::standard::{build_standard_geometry, StandardGeometryIntermediates};
use geometry_types::config::{CheaseGeometryConfig, RuntimeParams};
use geometry_types::constants::{DEFAULT_GEOMETRY_DIR, GEOMETRY_DIR_ENV, MU0};
use geometry_types::error::{GeometryError, GeometryResult};
use ndarray::Array1;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

pub const PSI_LABEL: &str = "PSIchease=psi/2pi";
pub const IP_LABEL: &str = "Ipprofile";
pub const RHO_TOR_LABEL: &str = "RHO_TOR=sqrt(Phi/pi/B0)";
pub const RHO_TOR_NORM_LABEL: &str = "RHO_TOR_NORM";
pub const R_INBOARD_LABEL: &str = "R_INBOARD";
pub const R_OUTBOARD_LABEL: &str = "R_OUTBOARD";
pub const RBPHI_LABEL: &str = "T=RBphi";
pub const INT_JDCHI_LABEL: &str = "Int(Rdlp/|grad(psi)|)=Int(Jdchi)";
pub const ONE_OVER_R2_LABEL: &str = "<1/R**2>";
pub const BP2_LABEL: &str = "<Bp**2>";
pub const DPSI_LABEL: &str = "<|grad(psi)|>";
pub const DPSI2_LABEL: &str = "<|grad(psi)|**2>";
pub const DELTA_UPPER_LABEL: &str = "delta_upper";
pub const DELTA_LOWER_LABEL: &str = "delta_bottom";
pub const VOLUME_LABEL: &str = "VOLUMEprofile";
pub const AREA_LABEL: &str = "areaprofile";

/// Raw CHEASE columns keyed by header label.
#[derive(Debug, Clone, Default)]
pub struct CheaseData {
    labels: Vec<String>,
    columns: HashMap<String, Array1<f64>>,
}

impl CheaseData {
    pub fn from_file(path: &Path) -> GeometryResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(text: &str) -> GeometryResult<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (_, header) = lines.next().ok_or_else(|| GeometryError::Parse {
            line: 1,
            message: "empty CHEASE file".to_string(),
        })?;
        let header = header.strip_prefix('%').unwrap_or(header);
        let labels: Vec<String> = header.split_whitespace().map(str::to_string).collect();
        if labels.is_empty() {
            return Err(GeometryError::Parse {
                line: 1,
                message: "header row has no labels".to_string(),
            });
        }
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(GeometryError::Parse {
                    line: 1,
                    message: format!("duplicate column label '{label}'"),
                });
            }
        }

        let mut values: Vec<Vec<f64>> = vec![Vec::new(); labels.len()];
        for (line_no, line) in lines {
            if line.starts_with('%') || line.starts_with('#') {
                continue;
            }
            let mut count = 0;
            for (col, token) in line.split_whitespace().enumerate() {
                if col >= labels.len() {
                    count = col + 1;
                    continue;
                }
                let v = token.parse::<f64>().map_err(|e| GeometryError::Parse {
                    line: line_no,
                    message: format!("column '{}': cannot parse '{token}': {e}", labels[col]),
                })?;
                values[col].push(v);
                count = col + 1;
            }
            if count != labels.len() {
                return Err(GeometryError::Parse {
                    line: line_no,
                    message: format!("expected {} columns, found {count}", labels.len()),
                });
            }
        }

        let columns = labels
            .iter()
            .cloned()
            .zip(values.into_iter().map(Array1::from))
            .collect();
        Ok(CheaseData { labels, columns })
    }

    /// Column labels in file order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of flux surfaces (rows).
    pub fn len(&self) -> usize {
        self.labels
            .first()
            .and_then(|l| self.columns.get(l))
            .map_or(0, |c| c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, label: &str) -> GeometryResult<&Array1<f64>> {
        self.columns
            .get(label)
            .ok_or_else(|| GeometryError::MissingField(label.to_string()))
    }
}

/// Equilibrium directory: explicit argument, then the injected override
/// (normally [`geometry_dir_from_env`]), then [`DEFAULT_GEOMETRY_DIR`].
pub fn resolve_geometry_dir(explicit: Option<&Path>, env_override: Option<&Path>) -> PathBuf {
    explicit
        .or(env_override)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_GEOMETRY_DIR))
}

/// Read the directory override from the process environment. Call once at
/// the application edge and pass the result down.
pub fn geometry_dir_from_env() -> Option<PathBuf> {
    std::env::var_os(GEOMETRY_DIR_ENV).map(PathBuf::from)
}

/// Convert normalized CHEASE columns to physical units using `rmaj` [m]
/// and `b0` [T] as reference scales.
pub fn unnormalize_chease(
    data: &CheaseData,
    rmaj: f64,
    rmin: f64,
    b0: f64,
) -> GeometryResult<StandardGeometryIntermediates> {
    let psi_unnorm = rmaj * rmaj * b0 * 2.0 * PI;
    Ok(StandardGeometryIntermediates {
        rmaj,
        rmin,
        b: b0,
        psi: data.get(PSI_LABEL)? * psi_unnorm,
        ip: data.get(IP_LABEL)? * (rmaj * b0 / MU0),
        rho: data.get(RHO_TOR_LABEL)? * rmaj,
        rhon: data.get(RHO_TOR_NORM_LABEL)?.clone(),
        r_in: data.get(R_INBOARD_LABEL)? * rmaj,
        r_out: data.get(R_OUTBOARD_LABEL)? * rmaj,
        rbphi: data.get(RBPHI_LABEL)? * (rmaj * b0),
        int_jdchi: data.get(INT_JDCHI_LABEL)? * (rmaj / b0),
        flux_norm_1_over_r2: data.get(ONE_OVER_R2_LABEL)? / (rmaj * rmaj),
        flux_norm_bp2: data.get(BP2_LABEL)? * (b0 * b0 * 4.0 * PI * PI),
        flux_norm_dpsi: data.get(DPSI_LABEL)? * (rmaj * b0 * 2.0 * PI),
        flux_norm_dpsi2: data.get(DPSI2_LABEL)? * ((rmaj * b0).powi(2) * 4.0 * PI * PI),
        delta_upper_face: data.get(DELTA_UPPER_LABEL)?.clone(),
        delta_lower_face: data.get(DELTA_LOWER_LABEL)?.clone(),
        volume: data.get(VOLUME_LABEL)? * rmaj.powi(3),
        area: data.get(AREA_LABEL)? * (rmaj * rmaj),
    })
}

/// Build a [`StandardGeometry`] from a CHEASE file.
///
/// The target current is taken from `runtime` when
/// `config.ip_from_parameters` is set; otherwise the equilibrium current is
/// returned as a [`CurrentUpdate`]. `runtime` is never modified here; apply
/// the update with [`RuntimeParams::apply_current_update`].
pub fn build_geometry_from_chease(
    config: &CheaseGeometryConfig,
    runtime: &RuntimeParams,
    env_dir: Option<&Path>,
) -> GeometryResult<(StandardGeometry, Option<CurrentUpdate>)> {
    config.validate()?;
    let dir = resolve_geometry_dir(config.geometry_dir.as_deref(), env_dir);
    let path = dir.join(&config.geometry_file);
    log::debug!("loading CHEASE equilibrium from {}", path.display());

    let data = CheaseData::from_file(&path)?;
    let inputs = unnormalize_chease(&data, config.rmaj, config.rmin, config.b0)?;
    let config_ip = config
        .ip_from_parameters
        .then_some(runtime.profile_conditions.ip);
    build_standard_geometry(&inputs, config.nr, config.hires_fac, config_ip)
}
