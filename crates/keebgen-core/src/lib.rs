//! Planar geometry primitives shared by the keebgen crates.

pub mod point;

pub use point::{EPSILON, Point, cross_about, norm_zero, rotate_vec};
