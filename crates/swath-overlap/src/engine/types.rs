use std::fmt;

use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::cfg::BOUNDARY_EPS;
use crate::error::{OverlapError, Result};
use crate::hull::HullMethod;

/// Which of the two lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LineId {
    A,
    B,
}

impl LineId {
    pub const BOTH: [LineId; 2] = [LineId::A, LineId::B];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            LineId::A => 0,
            LineId::B => 1,
        }
    }

    #[inline]
    pub fn other(self) -> LineId {
        match self {
            LineId::A => LineId::B,
            LineId::B => LineId::A,
        }
    }
}

impl TryFrom<usize> for LineId {
    type Error = OverlapError;

    fn try_from(n: usize) -> Result<Self> {
        match n {
            0 => Ok(LineId::A),
            1 => Ok(LineId::B),
            _ => Err(OverlapError::InvalidLineSelector(n)),
        }
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineId::A => write!(f, "A"),
            LineId::B => write!(f, "B"),
        }
    }
}

/// What survives a computation besides the counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Retention {
    /// Intermediate buffers are dropped as soon as their consumer returns; no
    /// index provenance is kept.
    Minimal,
    /// Projections, hulls (with vertex indices) and matched indices stay
    /// queryable on the engine.
    #[default]
    Full,
}

/// Engine configuration, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlapCfg {
    pub hull: HullMethod,
    pub retention: Retention,
    /// Copy the matched input samples into the result.
    pub collect_points: bool,
    /// Distance below which a point counts as on a hull edge.
    pub boundary_eps: f64,
    /// Run the two per-line pipelines on the rayon pool.
    pub parallel: bool,
}

impl Default for OverlapCfg {
    fn default() -> Self {
        Self {
            hull: HullMethod::MonotoneChain,
            retention: Retention::Full,
            collect_points: true,
            boundary_eps: BOUNDARY_EPS,
            parallel: true,
        }
    }
}

impl OverlapCfg {
    pub fn validate(&self) -> Result<()> {
        self.hull.validate()?;
        if !self.boundary_eps.is_finite() || self.boundary_eps < 0.0 {
            return Err(OverlapError::config(format!(
                "boundary_eps must be finite and >= 0, got {}",
                self.boundary_eps
            )));
        }
        Ok(())
    }
}

/// Pipeline stage reached by the latest `compute_overlap` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    #[default]
    Unconfigured,
    PlanesProjected,
    FramedAndMapped2D,
    HullsComputed,
    MembershipResolved,
}

/// Overlap of one line with the other line's hull.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LineOverlap {
    pub count: usize,
    /// Matched input samples, if `OverlapCfg::collect_points`.
    pub points: Option<Vec<Point3<f32>>>,
    /// Positions of the matched samples in the input line, under `Retention::Full`.
    pub indices: Option<Vec<usize>>,
}

/// Result of one `compute_overlap` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OverlapResult {
    pub a: LineOverlap,
    pub b: LineOverlap,
}

impl OverlapResult {
    #[inline]
    pub fn counts(&self) -> (usize, usize) {
        (self.a.count, self.b.count)
    }

    #[inline]
    pub fn line(&self, line: LineId) -> &LineOverlap {
        match line {
            LineId::A => &self.a,
            LineId::B => &self.b,
        }
    }
}

/// Axis-aligned box in the plane's `(u, v)` frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bounds2 {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

/// Axis-aligned box in world coordinates (points already on the plane).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bounds3 {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Bounds2 {
    pub(crate) fn around<'p>(mut points: impl Iterator<Item = &'p Point2<f64>>) -> Option<Self> {
        let first = *points.next()?;
        Some(points.fold(Self { min: first, max: first }, |b, p| Self {
            min: b.min.inf(p),
            max: b.max.sup(p),
        }))
    }

    #[inline]
    pub fn contains(&self, p: &Point2<f64>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

impl Bounds3 {
    pub(crate) fn around<'p>(mut points: impl Iterator<Item = &'p Point3<f64>>) -> Option<Self> {
        let first = *points.next()?;
        Some(points.fold(Self { min: first, max: first }, |b, p| Self {
            min: b.min.inf(p),
            max: b.max.sup(p),
        }))
    }
}
