use nalgebra::{Point2, Point3, Unit, Vector3};

use super::Plane;
use crate::cfg::AXIS_EPS;
use crate::error::{OverlapError, Result};

/// Orthonormal 2D frame embedded in a projection plane.
///
/// Invariants:
/// - `axis_u`, `axis_v` are unit length and lie in the plane.
/// - `axis_u · axis_v ≈ 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalFrame {
    origin: Point3<f64>,
    axis_u: Unit<Vector3<f64>>,
    axis_v: Unit<Vector3<f64>>,
}

impl LocalFrame {
    /// Build the frame from a line already projected onto `plane`.
    ///
    /// `origin` is the first point, `axis_u` points from the first to the last
    /// point, `axis_v = n × axis_u`. Fails on an empty line or when the first
    /// and last points coincide.
    pub fn from_line(projected: &[Point3<f64>], plane: &Plane) -> Result<Self> {
        let (first, last) = match (projected.first(), projected.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => {
                return Err(OverlapError::degenerate(
                    "line A is empty; cannot anchor a plane frame",
                ))
            }
        };
        let axis_u = unit_or_err(last - first, "first and last points of line A coincide")?;
        let axis_v = unit_or_err(
            plane.normal().cross(axis_u.as_ref()),
            "plane normal is parallel to the line A direction",
        )?;
        let frame = Self {
            origin: first,
            axis_u,
            axis_v,
        };
        tracing::debug!(
            axis_u = ?frame.axis_u.as_ref(),
            axis_v = ?frame.axis_v.as_ref(),
            dot = frame.orthogonality(),
            "plane frame"
        );
        Ok(frame)
    }

    #[inline]
    pub fn origin(&self) -> Point3<f64> {
        self.origin
    }

    #[inline]
    pub fn axis_u(&self) -> Unit<Vector3<f64>> {
        self.axis_u
    }

    #[inline]
    pub fn axis_v(&self) -> Unit<Vector3<f64>> {
        self.axis_v
    }

    /// `axis_u · axis_v`; should be ~0.
    #[inline]
    pub fn orthogonality(&self) -> f64 {
        self.axis_u.dot(self.axis_v.as_ref())
    }

    /// `(u, v)` coordinates of an in-plane point.
    #[inline]
    pub fn to_plane_2d(&self, q: &Point3<f64>) -> Point2<f64> {
        let r = *q - self.origin;
        Point2::new(r.dot(self.axis_u.as_ref()), r.dot(self.axis_v.as_ref()))
    }

    /// Map a projected line; index-preserving.
    pub fn map_line(&self, projected: &[Point3<f64>]) -> Vec<Point2<f64>> {
        projected.iter().map(|q| self.to_plane_2d(q)).collect()
    }

    /// Inverse of `to_plane_2d` for points of the plane.
    #[inline]
    pub fn to_world(&self, p: &Point2<f64>) -> Point3<f64> {
        self.origin + self.axis_u.into_inner() * p.x + self.axis_v.into_inner() * p.y
    }
}

fn unit_or_err(v: Vector3<f64>, reason: &str) -> Result<Unit<Vector3<f64>>> {
    if !v.iter().all(|x| x.is_finite()) {
        return Err(OverlapError::degenerate(format!("{reason} (non-finite)")));
    }
    Unit::try_new(v, AXIS_EPS).ok_or_else(|| OverlapError::degenerate(reason))
}
