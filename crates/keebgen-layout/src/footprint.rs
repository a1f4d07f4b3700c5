//! Rectangles derived from transformed keys: key footprints, bezel clearances and switch
//! cutouts. All functions expect keys that went through [`crate::transform_key`], i.e. center
//! anchored, in physical units, with the angle in radians.

use keebgen_core::Point;
use keebgen_kle::Key;

/// Corners of a `size` rectangle centered on `center`, rotated by `angle` radians about its
/// center. Counter-clockwise, starting bottom-left of the unrotated rectangle.
fn rectangle(center: Point, size: (f64, f64), angle: f64) -> [Point; 4] {
    let (hw, hh) = (size.0 / 2.0, size.1 / 2.0);
    [
        Point::new(-hw, -hh),
        Point::new(hw, -hh),
        Point::new(hw, hh),
        Point::new(-hw, hh),
    ]
    .map(|corner| center + corner.rotate(angle))
}

/// Primary footprint of `key`, grown by `buffer` on every side.
#[must_use]
pub fn key_outline(key: &Key, buffer: f64) -> [Point; 4] {
    rectangle(
        key.position(),
        (key.width + 2.0 * buffer, key.height + 2.0 * buffer),
        key.rotation_angle,
    )
}

/// Secondary footprint of `key` (e.g. the lower half of an ISO Enter), grown by `buffer`.
///
/// `None` when the key is a plain rectangle.
#[must_use]
pub fn secondary_outline(key: &Key, buffer: f64) -> Option<[Point; 4]> {
    if !key.has_secondary_footprint() {
        return None;
    }
    // Offset from the primary center to the secondary center, before rotation. The y axis
    // already points up here, so the top edge sits at +height/2.
    let offset = Point::new(
        -key.width / 2.0 + key.x2 + key.width2 / 2.0,
        key.height / 2.0 + key.y2 - key.height2 / 2.0,
    );
    let center = key.position() + offset.rotate(key.rotation_angle);
    Some(rectangle(
        center,
        (key.width2 + 2.0 * buffer, key.height2 + 2.0 * buffer),
        key.rotation_angle,
    ))
}

/// Square plate cutout of side `size` for the switch under `key`.
#[must_use]
pub fn switch_cutout(key: &Key, size: f64) -> [Point; 4] {
    rectangle(key.position(), (size, size), key.rotation_angle)
}

/// Every footprint corner of every key, grown by `buffer`; the point cloud the bezel outline
/// is hulled from.
#[must_use]
pub fn key_corner_points(keys: &[Key], buffer: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity(keys.len() * 4);
    for key in keys {
        out.extend(key_outline(key, buffer));
        if let Some(secondary) = secondary_outline(key, buffer) {
            out.extend(secondary);
        }
    }
    out
}
