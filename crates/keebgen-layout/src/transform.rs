//! Per-key transforms from parser output to board geometry.
//!
//! Applied in a fixed order, each key independently:
//! 1. [`offset_key`]: top-left anchor to center anchor,
//! 2. [`scale_key`]: layout units to physical units, flipping the y axis so rows grow upwards,
//! 3. [`rotate_key`]: rotate the center about the key's pivot and express the angle in radians.

use keebgen_core::norm_zero;
use keebgen_kle::Key;

/// Move the key's anchor from the top-left corner of its footprint to its center.
#[must_use]
pub fn offset_key(key: &Key) -> Key {
    Key {
        x: key.x + key.width / 2.0,
        y: key.y + key.height / 2.0,
        ..key.clone()
    }
}

/// Scale every length by `scale` and flip the y axis.
///
/// The flip is applied to the key position, its pivot and its secondary offset alike, and the
/// angle is negated so rotations keep their on-screen direction. Scaling by `s` and then by
/// `1 / s` gives back the original key.
#[must_use]
pub fn scale_key(scale: f64, key: &Key) -> Key {
    Key {
        x: scale * key.x,
        y: -scale * key.y,
        width: scale * key.width,
        height: scale * key.height,
        x2: scale * key.x2,
        y2: -scale * key.y2,
        width2: scale * key.width2,
        height2: scale * key.height2,
        rotation_angle: -key.rotation_angle,
        rotation_x: scale * key.rotation_x,
        rotation_y: -scale * key.rotation_y,
        labels: key.labels.clone(),
    }
}

/// Rotate the key center counter-clockwise about `(rotation_x, rotation_y)`.
///
/// Expects `rotation_angle` in degrees; the returned key carries the same angle in radians so
/// downstream consumers can orient the footprint itself.
#[must_use]
pub fn rotate_key(key: &Key) -> Key {
    let angle = key.rotation_angle.to_radians();
    let center = key.position().rotate_about(key.pivot(), angle);
    Key {
        x: norm_zero(center.x),
        y: norm_zero(center.y),
        rotation_angle: norm_zero(angle),
        ..key.clone()
    }
}

/// Full pipeline for one parsed key.
#[must_use]
pub fn transform_key(scale: f64, key: &Key) -> Key {
    rotate_key(&scale_key(scale, &offset_key(key)))
}

/// Full pipeline for a parsed layout, preserving key order.
#[must_use]
pub fn transform_keys(scale: f64, keys: &[Key]) -> Vec<Key> {
    keys.iter().map(|k| transform_key(scale, k)).collect()
}
