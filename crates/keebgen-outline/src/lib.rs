//! Outline generation: the convex hull enclosing a layout.

pub mod hull;

pub use hull::{HullPolygon, convex_hull};
