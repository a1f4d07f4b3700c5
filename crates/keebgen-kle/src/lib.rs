//! Reading keyboard-layout-editor (KLE) descriptions into absolute key records.

pub mod error;
pub mod key;
pub mod kle;
pub mod value;

pub use error::Error;
pub use key::Key;
pub use kle::{LayoutDescription, LayoutMeta, ParseOptions, RotationPolicy, parse};
pub use value::Value;
