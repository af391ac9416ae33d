use nalgebra::Point2;

use super::{cross, HullBoundary};

/// Andrew's monotone chain convex hull (CCW, open polygon).
///
/// - `n <= 3`: the input is returned unchanged, in order.
/// - Otherwise points are sorted by `(x, y)`; lower and upper chains pop while
///   the turn is not strictly CCW, so collinear points never become vertices.
/// - Each vertex keeps its position in `points`, not in the sorted order.
/// - All-coincident or all-collinear input collapses to two vertices.
pub fn monotone_chain(points: &[Point2<f64>], keep_indices: bool) -> HullBoundary {
    let n = points.len();
    if n <= 3 {
        return HullBoundary::from_order(points, (0..n).collect(), keep_indices);
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        points[i]
            .x
            .total_cmp(&points[j].x)
            .then(points[i].y.total_cmp(&points[j].y))
    });

    let mut lower: Vec<usize> = Vec::with_capacity(n);
    for &i in &order {
        push_ccw(&mut lower, points, i);
    }
    let mut upper: Vec<usize> = Vec::with_capacity(n);
    for &i in order.iter().rev() {
        push_ccw(&mut upper, points, i);
    }
    // Each chain ends where the other starts.
    lower.pop();
    upper.pop();
    lower.extend(upper);

    HullBoundary::from_order(points, lower, keep_indices)
}

#[inline]
fn push_ccw(chain: &mut Vec<usize>, points: &[Point2<f64>], i: usize) {
    while let [.., o, a] = chain[..] {
        if cross(&points[o], &points[a], &points[i]) > 0.0 {
            break;
        }
        chain.pop();
    }
    chain.push(i);
}
