//! Mathematical primitives for flux-surface geometry construction.

pub mod axis;
pub mod integrate;
pub mod interp;
