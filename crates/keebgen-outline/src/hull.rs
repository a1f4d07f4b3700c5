//! Convex hull of a planar point cloud, by recursive splitting along the point furthest
//! outside the current baseline (quickhull).
//!
//! Recursion runs on an explicit work stack, so adversarial inputs (every point on the hull)
//! cost O(n²) time but never deep call stacks.

use keebgen_core::{EPSILON, Point, cross_about};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Ordered hull outline.
///
/// Non-degenerate hulls are closed (first point repeated as last) and wound counter-clockwise.
/// A single distinct input point yields just that point; collinear input yields the closed
/// segment `[v, u, v]` between its extreme points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HullPolygon(Vec<Point>);

impl HullPolygon {
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }

    /// Distinct vertices, without the closing repeat.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        match self.0.len() {
            0 | 1 => &self.0,
            n => &self.0[..n - 1],
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(a), Some(b)) => self.0.len() > 1 && a == b,
            _ => false,
        }
    }

    /// Signed shoelace area; positive for counter-clockwise winding, zero when degenerate.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.0.windows(2).map(|w| w[0].cross(w[1])).sum::<f64>() / 2.0
    }

    /// Whether `p` lies inside or on the boundary, within `eps`.
    #[must_use]
    pub fn contains(&self, p: Point, eps: f64) -> bool {
        match self.vertices() {
            [] => false,
            [only] => only.approx_eq(p, eps),
            [a, b] => {
                signed_distance(p, *a, *b).abs() <= eps && {
                    let (lo_x, hi_x) = (a.x.min(b.x) - eps, a.x.max(b.x) + eps);
                    let (lo_y, hi_y) = (a.y.min(b.y) - eps, a.y.max(b.y) + eps);
                    (lo_x..=hi_x).contains(&p.x) && (lo_y..=hi_y).contains(&p.y)
                }
            }
            _ => self
                .0
                .windows(2)
                .all(|w| signed_distance(p, w[0], w[1]) <= eps),
        }
    }
}

/// Distance of `p` from the line `u -> v`, negative on the left (counter-clockwise) side.
fn signed_distance(p: Point, u: Point, v: Point) -> f64 {
    let len = (v - u).x.hypot((v - u).y);
    if len == 0.0 {
        return 0.0;
    }
    cross_about(p, u, v) / len
}

/// Candidates strictly left of `u -> v`; points on the line (within tolerance) are inside.
fn outside(u: Point, v: Point, candidates: &[Point]) -> Vec<Point> {
    candidates
        .iter()
        .copied()
        .filter(|&p| signed_distance(p, u, v) < -EPSILON)
        .collect()
}

fn furthest(u: Point, v: Point, candidates: &[Point]) -> Option<Point> {
    candidates.iter().copied().min_by(|a, b| {
        signed_distance(*a, u, v).total_cmp(&signed_distance(*b, u, v))
    })
}

enum Step {
    Extend {
        u: Point,
        v: Point,
        candidates: Vec<Point>,
    },
    Emit(Point),
}

/// Append the hull vertices strictly between `v` and `u` (walking from `v`) that lie left of
/// `u -> v`.
fn extend(u: Point, v: Point, candidates: Vec<Point>, out: &mut Vec<Point>) {
    let mut stack = vec![Step::Extend { u, v, candidates }];
    while let Some(step) = stack.pop() {
        match step {
            Step::Emit(p) => out.push(p),
            Step::Extend { u, v, candidates } => {
                let Some(w) = furthest(u, v, &candidates) else {
                    continue;
                };
                let toward_v = outside(w, v, &candidates);
                let toward_u = outside(u, w, &candidates);
                // Popped in reverse: first the w..v side, then w, then the u..w side.
                stack.push(Step::Extend {
                    u,
                    v: w,
                    candidates: toward_u,
                });
                stack.push(Step::Emit(w));
                stack.push(Step::Extend {
                    u: w,
                    v,
                    candidates: toward_v,
                });
            }
        }
    }
}

/// Convex hull of `points`, see [`HullPolygon`] for the shape of the result.
///
/// Exact and near-exact duplicates are merged and non-finite points are dropped before the
/// hull is built.
#[must_use]
pub fn convex_hull(points: &[Point]) -> HullPolygon {
    let mut pts: Vec<Point> = points.iter().copied().filter(|p| p.is_finite()).collect();
    if pts.len() != points.len() {
        warn!(
            dropped = points.len() - pts.len(),
            "ignoring non-finite hull input points"
        );
    }

    pts.sort_by(Point::cmp_xy);
    pts.dedup_by(|a, b| a.approx_eq(*b, EPSILON));

    let (u, v) = match pts.as_slice() {
        [] => return HullPolygon::default(),
        [only] => return HullPolygon(vec![*only]),
        // Sorted by x then y: leftmost-lowest first, rightmost-highest last.
        [first, .., last] => (*first, *last),
    };

    let upper = outside(u, v, &pts);
    let lower = outside(v, u, &pts);

    let mut out = Vec::with_capacity(upper.len() + lower.len() + 3);
    out.push(v);
    extend(u, v, upper, &mut out);
    out.push(u);
    extend(v, u, lower, &mut out);
    out.push(v);

    debug!(
        input = points.len(),
        distinct = pts.len(),
        vertices = out.len() - 1,
        "convex hull"
    );
    HullPolygon(out)
}
