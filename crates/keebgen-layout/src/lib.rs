//! Layout interpretation: parsed keys to board geometry.
//!
//! [`Interpreter`] chains the KLE parser, the per-key transform pipeline and the convex hull
//! into a single [`Model`] for the modeling layer to consume.

pub mod config;
pub mod error;
pub mod footprint;
pub mod interpreter;
pub mod transform;

pub use config::BoardConfig;
pub use error::Error;
pub use footprint::{key_corner_points, key_outline, secondary_outline, switch_cutout};
pub use interpreter::{HullSource, Interpreter, Model};
pub use transform::{offset_key, rotate_key, scale_key, transform_key, transform_keys};
