//! Post-computation queries.
//!
//! Selectors accept `LineId` or a raw `usize` (0 = A, 1 = B). An unknown
//! selector is logged and answered with `None`; retained results are left
//! untouched. Detail queries answer `None` unless the last run used
//! `Retention::Full`.

use std::fmt::Display;

use nalgebra::{Point2, Point3};

use super::{Bounds2, Bounds3, LineDetail, LineId, OverlapEngine, Stage};
use crate::hull::HullBoundary;
use crate::plane::LocalFrame;

impl<'a> OverlapEngine<'a> {
    /// Stage reached by the latest `compute_overlap` call.
    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Frame of the latest run (kept under either retention policy).
    #[inline]
    pub fn frame(&self) -> Option<&LocalFrame> {
        self.frame.as_ref()
    }

    /// Number of samples of `line` inside the other line's hull.
    pub fn matched_count<L>(&self, line: L) -> Option<usize>
    where
        L: TryInto<LineId>,
        L::Error: Display,
    {
        let id = resolve(line, "matched_count")?;
        self.counts.map(|c| c[id.index()])
    }

    /// Positions in the input line of the matched samples, ascending.
    pub fn matched_indices<L>(&self, line: L) -> Option<&[usize]>
    where
        L: TryInto<LineId>,
        L::Error: Display,
    {
        self.detail(line, "matched_indices").map(|d| d.matched.as_slice())
    }

    /// Line projected onto the plane, in world coordinates.
    pub fn projected_3d<L>(&self, line: L) -> Option<&[Point3<f64>]>
    where
        L: TryInto<LineId>,
        L::Error: Display,
    {
        self.detail(line, "projected_3d").map(|d| d.projected_3d.as_slice())
    }

    /// Line in the plane's `(u, v)` frame.
    pub fn projected_2d<L>(&self, line: L) -> Option<&[Point2<f64>]>
    where
        L: TryInto<LineId>,
        L::Error: Display,
    {
        self.detail(line, "projected_2d").map(|d| d.projected_2d.as_slice())
    }

    /// The line's own hull.
    pub fn hull<L>(&self, line: L) -> Option<&HullBoundary>
    where
        L: TryInto<LineId>,
        L::Error: Display,
    {
        self.detail(line, "hull").map(|d| &d.hull)
    }

    /// Hull vertices in the `(u, v)` frame.
    pub fn hull_vertices<L>(&self, line: L) -> Option<&[Point2<f64>]>
    where
        L: TryInto<LineId>,
        L::Error: Display,
    {
        self.detail(line, "hull_vertices").map(|d| d.hull.vertices.as_slice())
    }

    /// Positions in the input line of the samples forming its own hull.
    pub fn hull_indices<L>(&self, line: L) -> Option<&[usize]>
    where
        L: TryInto<LineId>,
        L::Error: Display,
    {
        self.detail(line, "hull_indices")
            .and_then(|d| d.hull.indices.as_deref())
    }

    /// Box around the matched samples of both lines, in the `(u, v)` frame.
    ///
    /// `None` unless both lines have at least one matched sample.
    pub fn overlap_bounds_2d(&self) -> Option<Bounds2> {
        let [a, b] = self.both_matched()?;
        Bounds2::around(
            a.matched
                .iter()
                .map(|&i| &a.projected_2d[i])
                .chain(b.matched.iter().map(|&i| &b.projected_2d[i])),
        )
    }

    /// Box around the projected matched samples of both lines, in world coordinates.
    pub fn overlap_bounds_3d(&self) -> Option<Bounds3> {
        let [a, b] = self.both_matched()?;
        Bounds3::around(
            a.matched
                .iter()
                .map(|&i| &a.projected_3d[i])
                .chain(b.matched.iter().map(|&i| &b.projected_3d[i])),
        )
    }

    fn both_matched(&self) -> Option<&[LineDetail; 2]> {
        self.retained
            .as_ref()
            .filter(|r| r.iter().all(|d| !d.matched.is_empty()))
    }

    fn detail<L>(&self, line: L, query: &'static str) -> Option<&LineDetail>
    where
        L: TryInto<LineId>,
        L::Error: Display,
    {
        let id = resolve(line, query)?;
        self.retained.as_ref().map(|r| &r[id.index()])
    }
}

fn resolve<L>(line: L, query: &'static str) -> Option<LineId>
where
    L: TryInto<LineId>,
    L::Error: Display,
{
    match line.try_into() {
        Ok(id) => Some(id),
        Err(err) => {
            tracing::warn!(query, %err, "ignoring query");
            None
        }
    }
}
