//! Overlap between two survey swaths projected onto a common plane.
//!
//! Pipeline
//! - Project both lines onto the plane `ax + by + cz + d = 0` (`plane::Plane`).
//! - Build a 2D frame inside the plane from line A (`plane::LocalFrame`).
//! - Compute a hull per line (`hull::HullMethod`: monotone chain or alpha shape).
//! - Test each line's points against the *other* line's hull
//!   (`hull::HullBoundary::contains`), orchestrated by `engine::OverlapEngine`.
//!
//! Conventions
//! - Input samples are `Point3<f32>`; all derived geometry is `f64`.
//! - Hull boundaries are open polygons in CCW order (closing vertex not repeated).
//! - Points on a hull boundary count as inside.

pub mod cfg;
pub mod engine;
pub mod error;
pub mod hull;
pub mod plane;
pub mod rand;
pub mod survey;

pub use engine::{LineId, LineOverlap, OverlapCfg, OverlapEngine, OverlapResult, Retention};
pub use error::{OverlapError, Result};
pub use hull::{HullBoundary, HullMethod};
pub use plane::{LocalFrame, Plane};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::engine::{
        Bounds2, Bounds3, LineId, LineOverlap, OverlapCfg, OverlapEngine, OverlapResult,
        Retention, Stage,
    };
    pub use crate::error::{OverlapError, Result};
    pub use crate::hull::{concave_hull, monotone_chain, HullBoundary, HullMethod};
    pub use crate::plane::{LocalFrame, Plane};
    pub use nalgebra::{Point2, Point3};
}
