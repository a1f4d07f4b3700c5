use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON: {0}")]
    Json(String),

    #[error("YAML mapping keys must be strings")]
    NonStringKey,

    #[error("unsupported YAML value (tags are not supported)")]
    UnsupportedYamlValue,

    #[error("YAML number could not be represented as f64")]
    YamlNumber,

    #[error("layout description must be an array of rows, got {found}")]
    RootNotSequence { found: &'static str },

    #[error("malformed layout at row {row}, item {item}: {reason}")]
    MalformedLayout {
        row: usize,
        item: usize,
        reason: String,
    },

    #[error(
        "rotation (r, rx, ry) is only allowed on the first item of a row (row {row}, item {item})"
    )]
    InvalidRotationPlacement { row: usize, item: usize },

    #[error(
        "invalid \"{field}\" = {value} at row {row}, item {item}: key dimensions must be positive"
    )]
    InvalidDimension {
        row: usize,
        item: usize,
        field: &'static str,
        value: f64,
    },
}
