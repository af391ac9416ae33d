//! Projection plane and the 2D frame embedded in it.
//!
//! Purpose
//! - Reduce the 3D overlap question to 2D: project both lines orthogonally
//!   onto `ax + by + cz + d = 0`, then express the projected points in an
//!   orthonormal `(u, v)` frame lying in that plane.
//!
//! Assumptions and conventions
//! - Coefficients are `f64`; samples are widened from `f32` on projection.
//! - `(a, b, c)` need not be unit length; projection divides by `|n|²`.
//! - The frame is anchored on line A only (first projected point, direction
//!   first → last) and reused for line B.

mod frame;

pub use frame::LocalFrame;

use nalgebra::{Point3, Vector3};

use crate::cfg::NORMAL_EPS;
use crate::error::{OverlapError, Result};

/// Plane `a·x + b·y + c·z + d = 0`.
///
/// Invariants:
/// - `(a, b, c)` is finite and non-zero (checked by `Plane::new`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Plane {
    /// Validate and build a plane from its coefficients.
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        if ![a, b, c, d].iter().all(|x| x.is_finite()) {
            return Err(OverlapError::degenerate(format!(
                "plane coefficients must be finite, got ({a}, {b}, {c}, {d})"
            )));
        }
        if a * a + b * b + c * c <= NORMAL_EPS {
            return Err(OverlapError::degenerate(
                "plane normal (a, b, c) is zero",
            ));
        }
        Ok(Self { a, b, c, d })
    }

    /// Horizontal plane `z = height`.
    pub fn horizontal(height: f64) -> Result<Self> {
        Self::new(0.0, 0.0, 1.0, -height)
    }

    #[inline]
    pub fn coefficients(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Normal `(a, b, c)` as given (not normalized).
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        Vector3::new(self.a, self.b, self.c)
    }

    /// `n·p + d`; zero on the plane, sign gives the side.
    #[inline]
    pub fn evaluate(&self, p: &Point3<f64>) -> f64 {
        self.normal().dot(&p.coords) + self.d
    }

    /// Nearest point of the plane to `p`.
    #[inline]
    pub fn project(&self, p: &Point3<f64>) -> Point3<f64> {
        let n = self.normal();
        *p - n * (self.evaluate(p) / n.norm_squared())
    }

    /// Project every sample of a line; same length and order as the input.
    pub fn project_line(&self, line: &[Point3<f32>]) -> Vec<Point3<f64>> {
        line.iter().map(|p| self.project(&p.cast::<f64>())).collect()
    }
}

#[cfg(test)]
mod tests;
