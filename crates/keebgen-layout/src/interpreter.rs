use keebgen_core::Point;
use keebgen_kle::{Key, LayoutDescription, LayoutMeta, ParseOptions, RotationPolicy};
use keebgen_outline::{HullPolygon, convex_hull};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::footprint::{key_corner_points, switch_cutout};
use crate::{BoardConfig, Error, transform_keys};

/// Which points the layout outline is hulled from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HullSource {
    /// No outline.
    None,
    /// Key centers only.
    Centers,
    /// Footprint corners grown by the bezel buffer; the inner edge of the bezel.
    #[default]
    KeyCorners,
}

/// Everything the modeling layer needs to build a board from one layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model {
    #[serde(skip_serializing_if = "LayoutMeta::is_empty")]
    pub meta: LayoutMeta,
    pub config: BoardConfig,
    pub keys: Vec<Key>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hull: Option<HullPolygon>,
}

impl Model {
    /// Plate cutouts, one per key, in key order.
    #[must_use]
    pub fn switch_cutouts(&self) -> Vec<[Point; 4]> {
        self.keys
            .iter()
            .map(|k| switch_cutout(k, self.config.switch_cutout))
            .collect()
    }
}

/// Turns layout descriptions into [`Model`]s: parse, transform, then outline.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    config: BoardConfig,
    options: ParseOptions,
    hull: HullSource,
}

impl Interpreter {
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_rotation_policy(mut self, policy: RotationPolicy) -> Self {
        self.options.rotation = policy;
        self
    }

    #[must_use]
    pub fn with_hull(mut self, hull: HullSource) -> Self {
        self.hull = hull;
        self
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Interpret `layout`. Nothing is produced unless every step succeeds.
    pub fn interpret(&self, layout: &LayoutDescription) -> Result<Model, Error> {
        self.config.validate()?;

        let parsed = layout.parse(self.options)?;
        let keys = transform_keys(self.config.key_unit, &parsed);

        let hull = match self.hull {
            HullSource::None => None,
            HullSource::Centers => {
                let centers: Vec<Point> = keys.iter().map(Key::position).collect();
                Some(convex_hull(&centers))
            }
            HullSource::KeyCorners => Some(convex_hull(&key_corner_points(
                &keys,
                self.config.bezel_key_buffer,
            ))),
        };

        debug!(
            keys = keys.len(),
            hull = ?self.hull,
            hull_vertices = ?hull.as_ref().map(|h| h.vertices().len()),
            "interpreted layout"
        );

        Ok(Model {
            meta: layout.meta(),
            config: self.config.clone(),
            keys,
            hull,
        })
    }

    pub fn interpret_str(&self, input: &str) -> Result<Model, Error> {
        let layout: LayoutDescription = input.parse()?;
        self.interpret(&layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_interpreter_outlines_key_corners() {
        let model = Interpreter::default().interpret_str(r#"[["a","b"]]"#).unwrap();
        let hull = model.hull.unwrap();
        assert!(hull.is_closed());
        assert_eq!(hull.vertices().len(), 4);

        let buffer = model.config.bezel_key_buffer;
        let unit = model.config.key_unit;
        assert_abs_diff_eq!(
            hull.area(),
            (2.0 * unit + 2.0 * buffer) * (unit + 2.0 * buffer),
            epsilon = 1e-9
        );
    }

    #[test]
    fn hull_can_be_disabled_or_use_centers() {
        let layout: LayoutDescription = r#"[["a","b"],["c","d"]]"#.parse().unwrap();

        let none = Interpreter::default()
            .with_hull(HullSource::None)
            .interpret(&layout)
            .unwrap();
        assert!(none.hull.is_none());

        let centers = Interpreter::new(BoardConfig::default().with_key_unit(1.0))
            .with_hull(HullSource::Centers)
            .interpret(&layout)
            .unwrap();
        let hull = centers.hull.unwrap();
        assert_eq!(hull.vertices().len(), 4);
        assert_abs_diff_eq!(hull.area(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_layout_gives_empty_model() {
        let model = Interpreter::default().interpret_str("[]").unwrap();
        assert!(model.keys.is_empty());
        assert!(model.hull.unwrap().is_empty());
    }

    #[test]
    fn invalid_scale_fails_before_parsing() {
        let err = Interpreter::new(BoardConfig::default().with_key_unit(0.0))
            .interpret_str(r#"[["a"]]"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidScale(_)));
    }

    #[test]
    fn strict_policy_propagates_parse_error() {
        let err = Interpreter::default()
            .with_rotation_policy(RotationPolicy::Strict)
            .interpret_str(r#"[["a", {"rx": 1}, "b"]]"#)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(keebgen_kle::Error::InvalidRotationPlacement { row: 0, item: 1 })
        ));
    }

    #[test]
    fn switch_cutouts_follow_keys() {
        let model = Interpreter::default().interpret_str(r#"[["a","b","c"]]"#).unwrap();
        let cutouts = model.switch_cutouts();
        assert_eq!(cutouts.len(), 3);
        let side = cutouts[0][1].x - cutouts[0][0].x;
        assert_abs_diff_eq!(side, model.config.switch_cutout, epsilon = 1e-12);
    }
}
