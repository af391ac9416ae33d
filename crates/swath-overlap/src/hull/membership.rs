use nalgebra::Point2;

use super::HullBoundary;

impl HullBoundary {
    /// Point-in-polygon, boundary-inclusive.
    ///
    /// A point within `eps` of any edge (closing edge included) is inside;
    /// otherwise the even–odd crossing rule decides. Boundaries with fewer than
    /// three vertices contain only the points on their vertex or segment.
    pub fn contains(&self, p: &Point2<f64>, eps: f64) -> bool {
        match self.vertices.as_slice() {
            [] => false,
            [v] => (*p - *v).norm() <= eps,
            [a, b] => segment_distance(p, a, b) <= eps,
            ring => {
                let on_edge = ring
                    .iter()
                    .zip(ring.iter().cycle().skip(1))
                    .any(|(a, b)| segment_distance(p, a, b) <= eps);
                on_edge || crossings_odd(p, ring)
            }
        }
    }

    /// Positions in `points` of the samples inside this boundary, ascending.
    pub fn select_inside(&self, points: &[Point2<f64>], eps: f64) -> Vec<usize> {
        points
            .iter()
            .enumerate()
            .filter(|(_, p)| self.contains(p, eps))
            .map(|(k, _)| k)
            .collect()
    }
}

/// Even–odd rule with a horizontal ray towards +x.
fn crossings_odd(p: &Point2<f64>, ring: &[Point2<f64>]) -> bool {
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (pi, pj) = (ring[i], ring[j]);
        if (pi.y > p.y) != (pj.y > p.y) && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Euclidean distance from `p` to the segment `ab`.
fn segment_distance(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    let ab = *b - *a;
    let ap = *p - *a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return ap.norm();
    }
    let t = (ap.dot(&ab) / len2).clamp(0.0, 1.0);
    (ap - ab * t).norm()
}
