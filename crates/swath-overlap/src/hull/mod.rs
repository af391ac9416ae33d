//! Hull boundaries of projected swaths and point membership.
//!
//! Purpose
//! - Turn a line's 2D footprint into an ordered polygon that the other line's
//!   points can be tested against.
//!
//! Strategies (closed set, chosen once per engine)
//! - `HullMethod::MonotoneChain`: Andrew's monotone chain convex hull.
//! - `HullMethod::Concave`: alpha shape over a Delaunay triangulation; the
//!   shape parameter is a circumradius bound, one per line.
//!
//! Conventions
//! - Boundaries are open polygons in CCW order: the first vertex is not
//!   repeated at the end.
//! - `indices[k]` is the position in the input slice of `vertices[k]`.
//! - Membership is boundary-inclusive (see `HullBoundary::contains`).

mod chain;
mod concave;
mod membership;

pub use chain::monotone_chain;
pub use concave::concave_hull;

use std::fmt;
use std::str::FromStr;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::engine::LineId;
use crate::error::{OverlapError, Result};

/// Alpha used for both lines when a concave method is parsed from its name.
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Hull construction method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum HullMethod {
    /// Andrew's monotone chain (convex).
    #[default]
    MonotoneChain,
    /// Alpha shape; triangles with circumradius above the line's alpha are dropped.
    Concave { alpha_a: f64, alpha_b: f64 },
}

impl HullMethod {
    /// Concave method with the same alpha for both lines.
    pub fn concave(alpha: f64) -> Self {
        Self::Concave {
            alpha_a: alpha,
            alpha_b: alpha,
        }
    }

    /// Shape parameter used for `line`, if the method has one.
    pub fn alpha(&self, line: LineId) -> Option<f64> {
        match (*self, line) {
            (Self::MonotoneChain, _) => None,
            (Self::Concave { alpha_a, .. }, LineId::A) => Some(alpha_a),
            (Self::Concave { alpha_b, .. }, LineId::B) => Some(alpha_b),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Self::Concave { alpha_a, alpha_b } = *self {
            for (line, alpha) in [(LineId::A, alpha_a), (LineId::B, alpha_b)] {
                if !alpha.is_finite() || alpha <= 0.0 {
                    return Err(OverlapError::config(format!(
                        "concave hull alpha for line {line} must be finite and > 0, got {alpha}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Hull of `points` (the 2D projection of `line`).
    pub fn build(&self, points: &[Point2<f64>], line: LineId, keep_indices: bool) -> HullBoundary {
        match self.alpha(line) {
            None => monotone_chain(points, keep_indices),
            Some(alpha) => concave_hull(points, alpha, keep_indices),
        }
    }
}

impl fmt::Display for HullMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MonotoneChain => write!(f, "monotone-chain"),
            Self::Concave { alpha_a, alpha_b } => {
                write!(f, "concave(alpha_a={alpha_a}, alpha_b={alpha_b})")
            }
        }
    }
}

impl FromStr for HullMethod {
    type Err = OverlapError;

    /// Accepts the legacy names ("Andrew's", "PCL ConcaveHull") as well as
    /// kebab/snake spellings. Concave methods get `DEFAULT_ALPHA`.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "andrews" | "monotonechain" | "convex" | "convexhull" => Ok(Self::MonotoneChain),
            "concave" | "concavehull" | "pclconcavehull" | "alphashape" => {
                Ok(Self::concave(DEFAULT_ALPHA))
            }
            _ => Err(OverlapError::config(format!(
                "\"{s}\" is not a valid hull method (expected monotone-chain or concave)"
            ))),
        }
    }
}

/// Ordered hull polygon, optionally with the source index of every vertex.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HullBoundary {
    pub vertices: Vec<Point2<f64>>,
    pub indices: Option<Vec<usize>>,
}

impl HullBoundary {
    /// Gather `order` from `points`; keep `order` itself as provenance if asked.
    pub(crate) fn from_order(points: &[Point2<f64>], order: Vec<usize>, keep_indices: bool) -> Self {
        let vertices = order.iter().map(|&i| points[i]).collect();
        Self {
            vertices,
            indices: keep_indices.then_some(order),
        }
    }

    pub(crate) fn empty(keep_indices: bool) -> Self {
        Self {
            vertices: Vec::new(),
            indices: keep_indices.then(Vec::new),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Shoelace area; positive for CCW.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.vertices)
    }
}

pub(crate) fn signed_area(ring: &[Point2<f64>]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for (k, p) in ring.iter().enumerate() {
        let q = ring[(k + 1) % ring.len()];
        twice += p.x * q.y - q.x * p.y;
    }
    0.5 * twice
}

/// z-component of `(a - o) × (b - o)`: > 0 for a CCW turn o→a→b.
#[inline]
pub(crate) fn cross(o: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    let oa = *a - *o;
    let ob = *b - *o;
    oa.x * ob.y - oa.y * ob.x
}
