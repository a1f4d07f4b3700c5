use serde::{Deserialize, Serialize};

use crate::Error;

/// Physical constants of the board, in centimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Distance between neighbouring switch centers, i.e. one layout unit.
    pub key_unit: f64,
    /// Side of the square plate cutout for a switch.
    pub switch_cutout: f64,
    pub plate_thickness: f64,
    /// Thickness of the two bezel layers, bottom first.
    pub bezel_thickness: [f64; 2],
    /// Gap between a key's footprint and the inner edge of the bezel.
    pub bezel_key_buffer: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            key_unit: 1.905,
            switch_cutout: 1.4,
            plate_thickness: 0.3,
            bezel_thickness: [0.3, 0.3],
            bezel_key_buffer: 0.0475,
        }
    }
}

impl BoardConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, Error> {
        let config: BoardConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_key_unit(mut self, key_unit: f64) -> Self {
        self.key_unit = key_unit;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.key_unit.is_finite() || self.key_unit == 0.0 {
            return Err(Error::InvalidScale(self.key_unit));
        }
        let lengths = [
            ("switch_cutout", self.switch_cutout),
            ("plate_thickness", self.plate_thickness),
            ("bezel_thickness[0]", self.bezel_thickness[0]),
            ("bezel_thickness[1]", self.bezel_thickness[1]),
            ("bezel_key_buffer", self.bezel_key_buffer),
        ];
        for (field, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidSetting { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_mx_spacing() {
        let c = BoardConfig::default();
        assert_eq!(c.key_unit, 1.905);
        assert_eq!(c.switch_cutout, 1.4);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let c = BoardConfig::from_yaml_str("key_unit: 1.8\nbezel_thickness: [0.5, 0.2]\n").unwrap();
        assert_eq!(c.key_unit, 1.8);
        assert_eq!(c.bezel_thickness, [0.5, 0.2]);
        assert_eq!(c.plate_thickness, 0.3);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            BoardConfig::from_yaml_str("key_units: 2\n"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn zero_unit_is_rejected() {
        assert!(matches!(
            BoardConfig::from_yaml_str("key_unit: 0\n"),
            Err(Error::InvalidScale(_))
        ));
        let negative_buffer = BoardConfig {
            bezel_key_buffer: -0.1,
            ..BoardConfig::default()
        };
        assert!(matches!(
            negative_buffer.validate(),
            Err(Error::InvalidSetting {
                field: "bezel_key_buffer",
                ..
            })
        ));
    }
}
