use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] keebgen_kle::Error),

    #[error("failed to parse board config: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("key unit must be finite and non-zero, got {0}")]
    InvalidScale(f64),

    #[error("board setting \"{field}\" must be finite and non-negative, got {value}")]
    InvalidSetting { field: &'static str, value: f64 },
}
