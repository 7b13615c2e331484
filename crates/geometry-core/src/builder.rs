// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Geometry Builder
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::chease::build_geometry_from_chease;
use crate::circular::build_circular_geometry;
use crate::geometry::{AnyGeometry, CurrentUpdate};
use geometry_types::config::{GeometryConfig, RuntimeParams};
use geometry_types::error::GeometryResult;
use std::path::Path;

/// Build whichever geometry `config` selects.
///
/// `env_dir` is the equilibrium directory override, usually obtained once
/// from [`crate::chease::geometry_dir_from_env`]. Circular builds never
/// report a current update.
pub fn build_geometry(
    config: &GeometryConfig,
    runtime: &RuntimeParams,
    env_dir: Option<&Path>,
) -> GeometryResult<(AnyGeometry, Option<CurrentUpdate>)> {
    match config {
        GeometryConfig::Circular(cfg) => {
            let geo = build_circular_geometry(cfg)?;
            Ok((geo.into(), None))
        }
        GeometryConfig::Chease(cfg) => {
            let (geo, update) = build_geometry_from_chease(cfg, runtime, env_dir)?;
            if let Some(update) = update {
                log::info!(
                    "equilibrium plasma current {:.4} MA replaces configured {:.4} MA",
                    update.ip_ma,
                    runtime.profile_conditions.ip
                );
            }
            Ok((geo.into(), update))
        }
    }
}
