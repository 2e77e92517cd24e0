//! Runtime configuration for comparisons

use crate::constants::{DEFAULT_SHOTS, DEFAULT_WIDTH, MAX_WIDTH, MIN_WIDTH};
use thiserror::Error;

/// How many magnitude bits are encoded
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EncodingMode {
    /// Only the bits needed until both operands reach their sign extension
    #[default]
    Minimal,
    /// Always `width - 1` magnitude bits
    Fixed,
}

/// Comparison options
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparatorConfig {
    /// Operand width in bits, including the sign bit
    pub width: u32,
    /// Bit encoding strategy
    pub encoding: EncodingMode,
    /// Number of simulation shots
    pub shots: u32,
    /// Base seed for measurement sampling (None = fresh entropy)
    pub seed: Option<u64>,
    /// Render a text drawing of the circuit
    pub draw: bool,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            encoding: EncodingMode::Minimal,
            shots: DEFAULT_SHOTS,
            seed: None,
            draw: false,
        }
    }
}

impl ComparatorConfig {
    /// Default options with a different operand width
    pub fn for_width(width: u32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Check all fields against the supported limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_width(self.width, MAX_WIDTH)?;
        if self.shots == 0 {
            return Err(ConfigError::ZeroShots);
        }
        Ok(())
    }
}

/// Check a width against `MIN_WIDTH..=max`
pub fn validate_width(width: u32, max: u32) -> Result<(), ConfigError> {
    if !(MIN_WIDTH..=max).contains(&width) {
        return Err(ConfigError::InvalidWidth {
            width,
            min: MIN_WIDTH,
            max,
        });
    }
    Ok(())
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Width outside the supported range
    #[error("Invalid width {width}: must be between {min} and {max}")]
    InvalidWidth { width: u32, min: u32, max: u32 },
    /// At least one shot is required
    #[error("Shot count must be at least 1")]
    ZeroShots,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ComparatorConfig::default();
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.shots, DEFAULT_SHOTS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_width_bounds() {
        assert!(ComparatorConfig::for_width(MIN_WIDTH).validate().is_ok());
        assert!(ComparatorConfig::for_width(MAX_WIDTH).validate().is_ok());
        assert_eq!(
            ComparatorConfig::for_width(0).validate(),
            Err(ConfigError::InvalidWidth {
                width: 0,
                min: MIN_WIDTH,
                max: MAX_WIDTH
            })
        );
        assert!(matches!(
            ComparatorConfig::for_width(MAX_WIDTH + 1).validate(),
            Err(ConfigError::InvalidWidth { .. })
        ));
    }

    #[test]
    fn test_zero_shots_rejected() {
        let config = ComparatorConfig {
            shots: 0,
            ..ComparatorConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroShots));
    }
}
