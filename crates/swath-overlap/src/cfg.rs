//! Tolerance defaults (internal).
//!
//! Policy
//! - Fixed constants for the geometric predicates. The one tolerance callers
//!   commonly tune (boundary slack for membership) is exposed through
//!   `OverlapCfg::boundary_eps`; this value is only its default.

/// Minimum length of the frame axes before normalization.
pub const AXIS_EPS: f64 = 1e-12;
/// Minimum squared norm of a plane normal `(a, b, c)`.
pub const NORMAL_EPS: f64 = 1e-24;
/// Default slack for "on the boundary" in membership tests.
pub const BOUNDARY_EPS: f64 = 1e-9;
/// Points closer than this are one vertex during triangulation.
pub(crate) const DEDUP_EPS: f64 = 1e-12;
/// Twice-area below which a triangle is treated as degenerate.
pub(crate) const AREA_EPS: f64 = 1e-18;
