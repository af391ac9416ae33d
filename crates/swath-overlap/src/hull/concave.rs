//! Alpha-shape (concave) hull.
//!
//! Model
//! - Bowyer–Watson Delaunay triangulation inside a large enclosing triangle.
//! - Keep triangles whose circumradius is `<= alpha`.
//! - Boundary edges are those used by exactly one kept triangle; they inherit
//!   the CCW orientation of that triangle and are chained into rings.
//! - The ring with the largest signed area is returned (outer boundary, CCW).
//!
//! Triangulation
//! - Triangles keep their three neighbours. A new sample is located by walking
//!   from the most recent triangle; the cavity of triangles whose circumcircle
//!   contains it grows by neighbour traversal from there.
//! - Samples are inserted strip by strip (horizontal strips about two sample
//!   spacings high, alternating direction), so consecutive samples are close
//!   and each walk is short.
//!
//! Notes
//! - Near-coincident samples (`DEDUP_EPS`) are inserted once; the first one in
//!   insertion order provides the vertex index.
//! - A vertex shared by two kept regions (pinch) may yield a ring that visits
//!   it twice.
//! - When the alpha filter splits the footprint, only the largest component is
//!   returned; the samples of the others fall outside the hull.

use std::collections::{BTreeMap, HashMap, HashSet};

use nalgebra::Point2;

use super::{cross, signed_area, HullBoundary};
use crate::cfg::{AREA_EPS, DEDUP_EPS};

/// Concave hull of `points` with circumradius bound `alpha`.
///
/// Fewer than three points are returned unchanged. When no triangle survives
/// the filter (alpha too small, collinear input), the boundary is empty.
pub fn concave_hull(points: &[Point2<f64>], alpha: f64, keep_indices: bool) -> HullBoundary {
    let n = points.len();
    if n < 3 {
        return HullBoundary::from_order(points, (0..n).collect(), keep_indices);
    }

    let kept: Vec<[usize; 3]> = delaunay(points)
        .into_iter()
        .filter(|t| circumradius(&points[t[0]], &points[t[1]], &points[t[2]]) <= alpha)
        .collect();
    if kept.is_empty() {
        tracing::warn!(points = n, alpha, "no triangle survives the alpha filter; empty hull");
        return HullBoundary::empty(keep_indices);
    }

    let Some(rings) = outer_rings(points, &kept) else {
        tracing::warn!(points = n, alpha, "alpha shape boundary did not close; empty hull");
        return HullBoundary::empty(keep_indices);
    };
    let dropped = rings.dropped;
    if dropped > 0 {
        tracing::warn!(
            points = n,
            alpha,
            dropped_rings = dropped,
            "alpha shape has several components; keeping the largest"
        );
    }
    tracing::debug!(
        points = n,
        triangles = kept.len(),
        vertices = rings.largest.len(),
        alpha,
        "alpha shape"
    );
    HullBoundary::from_order(points, rings.largest, keep_indices)
}

/// Delaunay triangles (CCW vertex indices into `points`).
fn delaunay(points: &[Point2<f64>]) -> Vec<[usize; 3]> {
    let n = points.len();
    let (min, max) = points.iter().fold(
        (
            Point2::new(f64::INFINITY, f64::INFINITY),
            Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        ),
        |(lo, hi), p| (lo.inf(p), hi.sup(p)),
    );
    let span = (max - min).amax().max(1.0);
    let mid = nalgebra::center(&min, &max);

    // Enclosing triangle (CCW) appended after the samples.
    let mut verts: Vec<Point2<f64>> = points.to_vec();
    verts.push(Point2::new(mid.x - 20.0 * span, mid.y - span));
    verts.push(Point2::new(mid.x + 20.0 * span, mid.y - span));
    verts.push(Point2::new(mid.x, mid.y + 20.0 * span));
    let mut mesh = Mesh::new(verts, [n, n + 1, n + 2]);

    let mut prev: Option<usize> = None;
    for i in insertion_order(points, &min, &max) {
        if let Some(j) = prev {
            if (points[i] - points[j]).norm() <= DEDUP_EPS {
                continue;
            }
        }
        prev = Some(i);
        mesh.insert(i);
    }

    mesh.tris
        .into_iter()
        .filter(|t| t.alive && t.v.iter().all(|&k| k < n))
        .map(|t| t.v)
        .collect()
}

/// Snake order over horizontal strips about two sample spacings high.
fn insertion_order(points: &[Point2<f64>], min: &Point2<f64>, max: &Point2<f64>) -> Vec<usize> {
    let n = points.len();
    let extent = *max - *min;
    let spacing = (extent.x * extent.y / n as f64).sqrt();
    let height = if spacing.is_finite() && spacing > 0.0 {
        2.0 * spacing
    } else {
        f64::INFINITY
    };
    let strip: Vec<usize> = points
        .iter()
        .map(|p| ((p.y - min.y) / height) as usize)
        .collect();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        strip[i].cmp(&strip[j]).then_with(|| {
            let along = points[i]
                .x
                .total_cmp(&points[j].x)
                .then(points[i].y.total_cmp(&points[j].y));
            if strip[i] % 2 == 1 {
                along.reverse()
            } else {
                along
            }
        })
    });
    order
}

/// Triangulation with neighbour links.
///
/// Edge `k` of a triangle runs from `v[k]` to `v[(k + 1) % 3]`; `nbr[k]` is
/// the triangle on its other side. Links only ever point at live triangles.
struct Mesh {
    verts: Vec<Point2<f64>>,
    tris: Vec<Tri>,
    last: usize,
}

impl Mesh {
    fn new(verts: Vec<Point2<f64>>, root: [usize; 3]) -> Self {
        let tris = vec![Tri::new(&verts, root)];
        Self {
            verts,
            tris,
            last: 0,
        }
    }

    /// Live triangle containing `p`, by walking across edges that separate
    /// the current triangle from `p`.
    fn locate(&self, p: &Point2<f64>) -> usize {
        let mut t = self.last;
        let mut steps = 0;
        'walk: while steps <= self.tris.len() {
            steps += 1;
            let tri = &self.tris[t];
            for k in 0..3 {
                let a = &self.verts[tri.v[k]];
                let b = &self.verts[tri.v[(k + 1) % 3]];
                if cross(a, b, p) < 0.0 {
                    if let Some(next) = tri.nbr[k] {
                        t = next;
                        continue 'walk;
                    }
                }
            }
            return t;
        }
        // Walk did not settle (rounding); any live triangle whose circle holds p.
        self.tris
            .iter()
            .position(|t| t.alive && t.circumcircle_contains(p))
            .unwrap_or(self.last)
    }

    fn insert(&mut self, i: usize) {
        let p = self.verts[i];
        let start = self.locate(&p);

        // Cavity: triangles whose circumcircle holds p, connected to `start`.
        self.tris[start].alive = false;
        let mut cavity = vec![start];
        let mut k = 0;
        while k < cavity.len() {
            let t = cavity[k];
            k += 1;
            for nb in self.tris[t].nbr.into_iter().flatten() {
                if self.tris[nb].alive && self.tris[nb].circumcircle_contains(&p) {
                    self.tris[nb].alive = false;
                    cavity.push(nb);
                }
            }
        }

        // Fan p onto the cavity boundary.
        let mut fresh: Vec<usize> = Vec::new();
        let mut by_start: HashMap<usize, usize> = HashMap::new();
        for &t in &cavity {
            for e in 0..3 {
                let outer = self.tris[t].nbr[e];
                if outer.is_some_and(|o| !self.tris[o].alive) {
                    continue;
                }
                let (a, b) = (self.tris[t].v[e], self.tris[t].v[(e + 1) % 3]);
                let id = self.tris.len();
                let mut tri = Tri::new(&self.verts, [a, b, i]);
                tri.nbr[0] = outer;
                self.tris.push(tri);
                if let Some(o) = outer {
                    self.tris[o].relink(b, a, id);
                }
                by_start.insert(a, id);
                fresh.push(id);
            }
        }
        // Fresh (a, b, p) meets fresh (b, c, p) along b–p.
        for &id in &fresh {
            let b = self.tris[id].v[1];
            if let Some(&next) = by_start.get(&b) {
                self.tris[id].nbr[1] = Some(next);
                self.tris[next].nbr[2] = Some(id);
            }
        }
        if let Some(&t) = fresh.last() {
            self.last = t;
        }
    }
}

/// Boundary rings of the kept triangles.
struct Rings {
    largest: Vec<usize>,
    /// Other rings with positive area (separate components, not holes).
    dropped: usize,
}

/// Chain boundary edges of `kept` into rings; pick the largest CCW one.
fn outer_rings(points: &[Point2<f64>], kept: &[[usize; 3]]) -> Option<Rings> {
    let directed: Vec<(usize, usize)> = kept
        .iter()
        .flat_map(|t| [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])])
        .collect();
    let all: HashSet<(usize, usize)> = directed.iter().copied().collect();

    let mut next: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for &(a, b) in &directed {
        if !all.contains(&(b, a)) {
            next.entry(a).or_default().push(b);
        }
    }

    let mut best: Option<(f64, Vec<usize>)> = None;
    let mut outer = 0usize;
    while let Some(start) = next.keys().next().copied() {
        let mut ring = vec![start];
        let mut cur = start;
        let closed = loop {
            let Some(to) = next.get_mut(&cur).and_then(Vec::pop) else {
                break false;
            };
            if next.get(&cur).is_some_and(Vec::is_empty) {
                next.remove(&cur);
            }
            if to == start {
                break true;
            }
            ring.push(to);
            cur = to;
        };
        if !closed || ring.len() < 3 {
            continue;
        }
        let ring_pts: Vec<Point2<f64>> = ring.iter().map(|&k| points[k]).collect();
        let area = signed_area(&ring_pts);
        if area > 0.0 {
            outer += 1;
        }
        if best.as_ref().map_or(true, |(a, _)| area > *a) {
            best = Some((area, ring));
        }
    }
    best.filter(|(area, _)| *area > 0.0).map(|(_, largest)| Rings {
        largest,
        dropped: outer.saturating_sub(1),
    })
}

/// Circumradius of a triangle; infinite when degenerate.
fn circumradius(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    let twice_area = cross(a, b, c).abs();
    if twice_area <= AREA_EPS {
        return f64::INFINITY;
    }
    let ab = (*b - *a).norm();
    let bc = (*c - *b).norm();
    let ca = (*a - *c).norm();
    ab * bc * ca / (2.0 * twice_area)
}

struct Tri {
    /// CCW vertex indices.
    v: [usize; 3],
    nbr: [Option<usize>; 3],
    center: Point2<f64>,
    r2: f64,
    alive: bool,
}

impl Tri {
    /// `v` must already be CCW (or degenerate).
    fn new(verts: &[Point2<f64>], v: [usize; 3]) -> Self {
        let (a, b, c) = (verts[v[0]], verts[v[1]], verts[v[2]]);
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        let (center, r2) = if d.abs() <= AREA_EPS {
            (a, f64::INFINITY)
        } else {
            let (a2, b2, c2) = (a.coords.norm_squared(), b.coords.norm_squared(), c.coords.norm_squared());
            let center = Point2::new(
                (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
                (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
            );
            (center, (a - center).norm_squared())
        };
        Self {
            v,
            nbr: [None; 3],
            center,
            r2,
            alive: true,
        }
    }

    /// Point the link of edge `from → to` at `tri`.
    fn relink(&mut self, from: usize, to: usize, tri: usize) {
        for k in 0..3 {
            if self.v[k] == from && self.v[(k + 1) % 3] == to {
                self.nbr[k] = Some(tri);
                return;
            }
        }
    }

    #[inline]
    fn circumcircle_contains(&self, p: &Point2<f64>) -> bool {
        (*p - self.center).norm_squared() < self.r2
    }
}
