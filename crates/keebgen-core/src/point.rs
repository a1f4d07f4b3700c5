use std::cmp::Ordering;
use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Tolerance used for collinearity and duplicate-point checks.
pub const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn from_xy(p: [f64; 2]) -> Self {
        Self { x: p[0], y: p[1] }
    }

    #[must_use]
    pub fn to_xy(self) -> [f64; 2] {
        [self.x, self.y]
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Z component of the 3-D cross product of `self` and `other` taken as vectors.
    #[must_use]
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Rotate this point counter-clockwise by `angle_rad` around `pivot`.
    #[must_use]
    pub fn rotate_about(self, pivot: Point, angle_rad: f64) -> Point {
        pivot + (self - pivot).rotate(angle_rad)
    }

    /// Rotate this point, taken as a vector from the origin, counter-clockwise by `angle_rad`.
    #[must_use]
    pub fn rotate(self, angle_rad: f64) -> Point {
        let [x, y] = rotate_vec(self.to_xy(), angle_rad);
        Point::new(x, y)
    }

    #[must_use]
    pub fn approx_eq(self, other: Point, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }

    /// Lexicographic order: by `x`, then by `y`. Total over all floats, NaN included.
    #[must_use]
    pub fn cmp_xy(&self, other: &Point) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }

    /// Snap values that are rotation noise around zero (including `-0.0`) to `0.0`.
    #[must_use]
    pub fn normalized(self) -> Point {
        Point::new(norm_zero(self.x), norm_zero(self.y))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Point::from_xy(p)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Signed area term of `p` relative to the directed line `u -> v`.
///
/// Computes `(p - u) x (v - u)`. The value is negative when `p` lies to the left of `u -> v`
/// (counter-clockwise side), positive to the right and zero on the line.
#[must_use]
pub fn cross_about(p: Point, u: Point, v: Point) -> f64 {
    (p - u).cross(v - u)
}

pub fn rotate_vec(v: [f64; 2], angle_rad: f64) -> [f64; 2] {
    let (s, c) = angle_rad.sin_cos();
    [v[0] * c - v[1] * s, v[0] * s + v[1] * c]
}

pub fn norm_zero(v: f64) -> f64 {
    if v.abs() < 1e-12 { 0.0 } else { v }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rotate_about_origin_is_counter_clockwise() {
        let p = Point::new(1.0, 0.0).rotate_about(Point::ORIGIN, FRAC_PI_2);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn rotate_about_pivot_keeps_pivot_fixed() {
        let pivot = Point::new(2.0, 3.0);
        let p = pivot.rotate_about(pivot, 1.234);
        assert!(p.approx_eq(pivot, 1e-12));

        let q = Point::new(3.0, 3.0).rotate_about(pivot, std::f64::consts::PI);
        assert_abs_diff_eq!(q.x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(q.y, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn cross_about_sign_follows_side_of_line() {
        let u = Point::new(0.0, 0.0);
        let v = Point::new(1.0, 0.0);
        assert!(cross_about(Point::new(0.5, 1.0), u, v) < 0.0);
        assert!(cross_about(Point::new(0.5, -1.0), u, v) > 0.0);
        assert_eq!(cross_about(Point::new(0.5, 0.0), u, v), 0.0);
    }

    #[test]
    fn cmp_xy_orders_by_x_then_y() {
        let mut pts = vec![
            Point::new(1.0, 2.0),
            Point::new(0.0, 5.0),
            Point::new(1.0, -1.0),
        ];
        pts.sort_by(Point::cmp_xy);
        assert_eq!(
            pts,
            vec![
                Point::new(0.0, 5.0),
                Point::new(1.0, -1.0),
                Point::new(1.0, 2.0),
            ]
        );
    }

    #[test]
    fn normalized_snaps_negative_zero_and_noise() {
        let p = Point::new(-0.0, 1e-17).normalized();
        assert!(p.x.is_sign_positive());
        assert_eq!(p.y, 0.0);
    }
}
