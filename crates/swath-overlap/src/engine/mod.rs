//! Overlap engine: drives projection, framing, hulls and cross membership.
//!
//! Pipeline (one `compute_overlap` call, always from the start)
//! - Project both lines onto the plane.
//! - Anchor the 2D frame on line A and map both lines into it.
//! - Build hull(A) and hull(B) with the configured `HullMethod`.
//! - Test A's points against hull(B) and B's points against hull(A). A point
//!   of A inside hull(B) is in both hulls, since it is a sample of A.
//!
//! Ownership
//! - Lines are borrowed for `'a` and only read.
//! - Each derived buffer is moved from stage to stage. Under
//!   `Retention::Minimal` a buffer is dropped once its consumer returns; under
//!   `Retention::Full` it ends up in `Retained` for the query surface.
//! - With `OverlapCfg::parallel`, the A and B halves of each stage run under
//!   `rayon::join`; stages are separated by the join barrier.

mod query;
mod types;

pub use types::{
    Bounds2, Bounds3, LineId, LineOverlap, OverlapCfg, OverlapResult, Retention, Stage,
};

use nalgebra::{Point2, Point3};

use crate::error::Result;
use crate::hull::HullBoundary;
use crate::plane::{LocalFrame, Plane};

/// Per-line buffers kept under `Retention::Full`.
#[derive(Clone, Debug)]
struct LineDetail {
    projected_3d: Vec<Point3<f64>>,
    projected_2d: Vec<Point2<f64>>,
    hull: HullBoundary,
    matched: Vec<usize>,
}

/// Overlap between two borrowed lines on a fixed plane.
#[derive(Debug)]
pub struct OverlapEngine<'a> {
    lines: [&'a [Point3<f32>]; 2],
    plane: Plane,
    cfg: OverlapCfg,
    stage: Stage,
    frame: Option<LocalFrame>,
    counts: Option<[usize; 2]>,
    retained: Option<[LineDetail; 2]>,
}

impl<'a> OverlapEngine<'a> {
    /// Validate `cfg` and bind the two lines to the plane.
    pub fn new(
        line_a: &'a [Point3<f32>],
        line_b: &'a [Point3<f32>],
        plane: Plane,
        cfg: OverlapCfg,
    ) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            lines: [line_a, line_b],
            plane,
            cfg,
            stage: Stage::Unconfigured,
            frame: None,
            counts: None,
            retained: None,
        })
    }

    /// Same engine with another retention policy; previous results are cleared.
    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.cfg.retention = retention;
        self.reset();
        self
    }

    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    #[inline]
    pub fn cfg(&self) -> &OverlapCfg {
        &self.cfg
    }

    #[inline]
    pub fn line(&self, line: LineId) -> &'a [Point3<f32>] {
        self.lines[line.index()]
    }

    /// Run the full pipeline.
    ///
    /// On error nothing from this call is kept and earlier results are gone;
    /// `stage()` tells how far the pipeline got.
    pub fn compute_overlap(&mut self) -> Result<OverlapResult> {
        self.reset();
        let keep = self.cfg.retention == Retention::Full;
        let parallel = self.cfg.parallel;
        let [line_a, line_b] = self.lines;
        let plane = self.plane;

        let (proj_a, proj_b) = join(
            parallel,
            || plane.project_line(line_a),
            || plane.project_line(line_b),
        );
        self.advance(Stage::PlanesProjected, [proj_a.len(), proj_b.len()]);

        let frame = LocalFrame::from_line(&proj_a, &plane)?;
        self.frame = Some(frame);
        let (flat_a, flat_b) = join(parallel, || frame.map_line(&proj_a), || frame.map_line(&proj_b));
        let projected = if keep {
            Some([proj_a, proj_b])
        } else {
            drop((proj_a, proj_b));
            None
        };
        self.advance(Stage::FramedAndMapped2D, [flat_a.len(), flat_b.len()]);

        let method = self.cfg.hull;
        let (hull_a, hull_b) = join(
            parallel,
            || method.build(&flat_a, LineId::A, keep),
            || method.build(&flat_b, LineId::B, keep),
        );
        self.advance(Stage::HullsComputed, [hull_a.len(), hull_b.len()]);

        let eps = self.cfg.boundary_eps;
        let (in_a, in_b) = join(
            parallel,
            || hull_b.select_inside(&flat_a, eps),
            || hull_a.select_inside(&flat_b, eps),
        );
        let counts = [in_a.len(), in_b.len()];
        self.counts = Some(counts);
        self.advance(Stage::MembershipResolved, counts);

        let result = OverlapResult {
            a: self.line_overlap(LineId::A, &in_a, keep),
            b: self.line_overlap(LineId::B, &in_b, keep),
        };
        match projected {
            Some([proj_a, proj_b]) => {
                self.retained = Some([
                    LineDetail {
                        projected_3d: proj_a,
                        projected_2d: flat_a,
                        hull: hull_a,
                        matched: in_a,
                    },
                    LineDetail {
                        projected_3d: proj_b,
                        projected_2d: flat_b,
                        hull: hull_b,
                        matched: in_b,
                    },
                ]);
            }
            None => drop((flat_a, flat_b, hull_a, hull_b, in_a, in_b)),
        }

        tracing::info!(
            hull = %method,
            retention = ?self.cfg.retention,
            points_a = line_a.len(),
            points_b = line_b.len(),
            overlap_a = counts[0],
            overlap_b = counts[1],
            "overlap computed"
        );
        Ok(result)
    }

    fn line_overlap(&self, line: LineId, matched: &[usize], keep: bool) -> LineOverlap {
        let samples = self.line(line);
        LineOverlap {
            count: matched.len(),
            points: self
                .cfg
                .collect_points
                .then(|| matched.iter().map(|&i| samples[i]).collect()),
            indices: keep.then(|| matched.to_vec()),
        }
    }

    fn reset(&mut self) {
        self.stage = Stage::Unconfigured;
        self.frame = None;
        self.counts = None;
        self.retained = None;
    }

    fn advance(&mut self, stage: Stage, sizes: [usize; 2]) {
        self.stage = stage;
        tracing::debug!(stage = ?stage, a = sizes[0], b = sizes[1], "overlap stage");
    }
}

/// Run `a` and `b`, on the rayon pool when `parallel`.
fn join<A, B, RA, RB>(parallel: bool, a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    if parallel {
        rayon::join(a, b)
    } else {
        (a(), b())
    }
}
