// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Geometry Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Magnetic geometry for 1D tokamak transport: analytic circular builds,
//! standard builds from numerical equilibria, and the CHEASE file reader.

pub mod builder;
pub mod chease;
pub mod circular;
pub mod geometry;
pub mod standard;

pub use builder::build_geometry;
pub use geometry::{
    AnyGeometry, CircularAnalyticalGeometry, CurrentUpdate, Geometry, GeometryType,
    StandardGeometry,
};
