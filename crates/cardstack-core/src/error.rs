use thiserror::Error;

/// Rejected scene or geometry parameters.
///
/// Raised once at construction; evaluation after that point is total.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must be finite")]
    NonFinite { name: &'static str },
    #[error("{name}: min {min} is greater than max {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
}

pub(crate) fn require_positive(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { name });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { name, value });
    }
    Ok(value)
}

pub(crate) fn require_range(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ConfigError::NonFinite { name });
    }
    if min > max {
        return Err(ConfigError::InvertedRange { name, min, max });
    }
    Ok(())
}
