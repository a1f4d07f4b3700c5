use keebgen_core::Point;
use serde::{Deserialize, Serialize};

/// One physical key position on the board.
///
/// Straight out of the parser, `x`/`y` is the top-left corner of the footprint in layout units
/// and `rotation_angle` is in degrees, clockwise with rows growing downwards. The transform
/// pipeline turns this into a center position in physical units with the angle in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Secondary footprint, used by non-rectangular keys such as ISO Enter.
    pub x2: f64,
    pub y2: f64,
    pub width2: f64,
    pub height2: f64,
    pub rotation_angle: f64,
    pub rotation_x: f64,
    pub rotation_y: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

impl Default for Key {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            x2: 0.0,
            y2: 0.0,
            width2: 1.0,
            height2: 1.0,
            rotation_angle: 0.0,
            rotation_x: 0.0,
            rotation_y: 0.0,
            labels: Vec::new(),
        }
    }
}

impl Key {
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn pivot(&self) -> Point {
        Point::new(self.rotation_x, self.rotation_y)
    }

    /// First non-empty label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.labels
            .iter()
            .map(String::as_str)
            .find(|s| !s.is_empty())
    }

    /// Whether the secondary footprint describes a different shape than the primary one.
    #[must_use]
    pub fn has_secondary_footprint(&self) -> bool {
        self.x2 != 0.0
            || self.y2 != 0.0
            || self.width2 != self.width
            || self.height2 != self.height
    }
}
