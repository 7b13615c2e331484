// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Geometry Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::DEFAULT_GEOMETRY_FILE;
use crate::error::{GeometryError, GeometryResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level simulation configuration as far as geometry is concerned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub runtime: RuntimeParams,
    pub geometry: GeometryConfig,
}

impl SimulationConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> GeometryResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> GeometryResult<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.geometry.validate()?;
        config.runtime.validate()?;
        Ok(config)
    }
}

/// Runtime parameters shared with the transport solver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeParams {
    #[serde(default)]
    pub profile_conditions: ProfileConditions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConditions {
    /// Total plasma current [MA].
    #[serde(rename = "Ip", default = "default_ip")]
    pub ip: f64,
}

fn default_ip() -> f64 {
    15.0
}

impl Default for ProfileConditions {
    fn default() -> Self {
        ProfileConditions { ip: default_ip() }
    }
}

impl RuntimeParams {
    pub fn validate(&self) -> GeometryResult<()> {
        let ip = self.profile_conditions.ip;
        if !ip.is_finite() || ip == 0.0 {
            return Err(GeometryError::ConfigError(format!(
                "profile_conditions.Ip must be finite and non-zero, got {ip}"
            )));
        }
        Ok(())
    }

    /// Adopt the plasma current reported by a geometry build [MA].
    pub fn apply_current_update(&mut self, ip_ma: f64) {
        self.profile_conditions.ip = ip_ma;
    }
}

/// Which geometry builder to run, with its parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "geometry_type", rename_all = "lowercase")]
pub enum GeometryConfig {
    Circular(CircularGeometryConfig),
    Chease(CheaseGeometryConfig),
}

impl GeometryConfig {
    pub fn validate(&self) -> GeometryResult<()> {
        match self {
            GeometryConfig::Circular(cfg) => cfg.validate(),
            GeometryConfig::Chease(cfg) => cfg.validate(),
        }
    }
}

/// Ad-hoc circular geometry. Defaults describe an ITER-sized device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircularGeometryConfig {
    /// Number of radial cells.
    #[serde(default = "default_nr")]
    pub nr: usize,
    /// Edge elongation.
    #[serde(default = "default_kappa")]
    pub kappa: f64,
    /// Major radius [m].
    #[serde(rename = "Rmaj", default = "default_rmaj")]
    pub rmaj: f64,
    /// Minor radius [m]. Must stay below `rmaj`.
    #[serde(rename = "Rmin", default = "default_rmin")]
    pub rmin: f64,
    /// On-axis toroidal field [T].
    #[serde(rename = "B0", default = "default_b0")]
    pub b0: f64,
    /// Refinement of the hires grid relative to `nr`.
    #[serde(default = "default_hires_fac")]
    pub hires_fac: usize,
}

/// Geometry from a CHEASE equilibrium file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheaseGeometryConfig {
    /// Directory holding the file. `None` defers to the injected override,
    /// then to the built-in default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry_dir: Option<PathBuf>,
    #[serde(default = "default_geometry_file")]
    pub geometry_file: String,
    #[serde(default = "default_nr")]
    pub nr: usize,
    /// Major radius [m], also the length unnormalization factor.
    #[serde(rename = "Rmaj", default = "default_rmaj")]
    pub rmaj: f64,
    #[serde(rename = "Rmin", default = "default_rmin")]
    pub rmin: f64,
    /// On-axis toroidal field [T], also the field unnormalization factor.
    #[serde(rename = "B0", default = "default_b0")]
    pub b0: f64,
    #[serde(default = "default_hires_fac")]
    pub hires_fac: usize,
    /// Rescale flux to the configured current instead of adopting the
    /// equilibrium current.
    #[serde(rename = "Ip_from_parameters", default = "default_ip_from_parameters")]
    pub ip_from_parameters: bool,
}

fn default_nr() -> usize {
    25
}
fn default_kappa() -> f64 {
    1.72
}
fn default_rmaj() -> f64 {
    6.2
}
fn default_rmin() -> f64 {
    2.0
}
fn default_b0() -> f64 {
    5.3
}
fn default_hires_fac() -> usize {
    4
}
fn default_geometry_file() -> String {
    DEFAULT_GEOMETRY_FILE.to_string()
}
fn default_ip_from_parameters() -> bool {
    true
}

impl Default for CircularGeometryConfig {
    fn default() -> Self {
        CircularGeometryConfig {
            nr: default_nr(),
            kappa: default_kappa(),
            rmaj: default_rmaj(),
            rmin: default_rmin(),
            b0: default_b0(),
            hires_fac: default_hires_fac(),
        }
    }
}

impl Default for CheaseGeometryConfig {
    fn default() -> Self {
        CheaseGeometryConfig {
            geometry_dir: None,
            geometry_file: default_geometry_file(),
            nr: default_nr(),
            rmaj: default_rmaj(),
            rmin: default_rmin(),
            b0: default_b0(),
            hires_fac: default_hires_fac(),
            ip_from_parameters: default_ip_from_parameters(),
        }
    }
}

fn check_resolution(nr: usize, hires_fac: usize) -> GeometryResult<()> {
    if nr < 1 {
        return Err(GeometryError::ConfigError("nr must be >= 1".to_string()));
    }
    if hires_fac < 1 {
        return Err(GeometryError::ConfigError(
            "hires_fac must be >= 1".to_string(),
        ));
    }
    Ok(())
}

fn check_positive(name: &str, value: f64) -> GeometryResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GeometryError::ConfigError(format!(
            "{name} must be finite and > 0, got {value}"
        )));
    }
    Ok(())
}

impl CircularGeometryConfig {
    /// Rejects unusable inputs. `rmin >= rmaj` is outside the model's
    /// validity domain but is not rejected here.
    pub fn validate(&self) -> GeometryResult<()> {
        check_resolution(self.nr, self.hires_fac)?;
        check_positive("Rmaj", self.rmaj)?;
        check_positive("Rmin", self.rmin)?;
        check_positive("B0", self.b0)?;
        if !self.kappa.is_finite() {
            return Err(GeometryError::ConfigError(format!(
                "kappa must be finite, got {}",
                self.kappa
            )));
        }
        Ok(())
    }
}

impl CheaseGeometryConfig {
    pub fn validate(&self) -> GeometryResult<()> {
        check_resolution(self.nr, self.hires_fac)?;
        check_positive("Rmaj", self.rmaj)?;
        check_positive("Rmin", self.rmin)?;
        check_positive("B0", self.b0)?;
        if self.geometry_file.trim().is_empty() {
            return Err(GeometryError::ConfigError(
                "geometry_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
