use std::{ops::RangeInclusive, time::Duration};

use serde::{Deserialize, Serialize};

/// Engine configuration.
///
/// Serialized with camelCase keys (`boardWidth`, `boardHeight`,
/// `initialDropIntervalMs`); missing keys take their default value.
///
/// # Example
///
/// ```
/// use tetrion_engine::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{ "boardHeight": 24 }"#).unwrap();
/// assert_eq!(config.board_width, 10);
/// assert_eq!(config.board_height, 24);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Number of columns of the grid.
    pub board_width: usize,
    /// Number of rows of the grid.
    pub board_height: usize,
    /// Time between two automatic drop steps, in milliseconds.
    pub initial_drop_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_width: Self::DEFAULT_BOARD_WIDTH,
            board_height: Self::DEFAULT_BOARD_HEIGHT,
            initial_drop_interval_ms: Self::DEFAULT_DROP_INTERVAL_MS,
        }
    }
}

impl EngineConfig {
    pub const DEFAULT_BOARD_WIDTH: usize = 10;
    pub const DEFAULT_BOARD_HEIGHT: usize = 20;
    pub const DEFAULT_DROP_INTERVAL_MS: u64 = 1000;

    /// Accepted range for both board dimensions.
    ///
    /// The lower bound keeps every catalog piece placeable in any orientation.
    pub const BOARD_SIZE_RANGE: RangeInclusive<usize> = 4..=64;

    #[must_use]
    pub fn initial_drop_interval(&self) -> Duration {
        Duration::from_millis(self.initial_drop_interval_ms)
    }

    /// Checks that the configuration describes a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let range = Self::BOARD_SIZE_RANGE;
        if !range.contains(&self.board_width) {
            return Err(ConfigError::BoardWidth {
                value: self.board_width,
                min: *range.start(),
                max: *range.end(),
            });
        }
        if !range.contains(&self.board_height) {
            return Err(ConfigError::BoardHeight {
                value: self.board_height,
                min: *range.start(),
                max: *range.end(),
            });
        }
        if self.initial_drop_interval_ms == 0 {
            return Err(ConfigError::DropInterval);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board width must be between {min} and {max}, got {value}")]
    BoardWidth { value: usize, min: usize, max: usize },
    #[display("board height must be between {min} and {max}, got {value}")]
    BoardHeight { value: usize, min: usize, max: usize },
    #[display("drop interval must be greater than zero")]
    DropInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.board_width, 10);
        assert_eq!(config.board_height, 20);
        assert_eq!(config.initial_drop_interval(), Duration::from_secs(1));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let narrow = EngineConfig {
            board_width: 3,
            ..EngineConfig::default()
        };
        assert_eq!(
            narrow.validate(),
            Err(ConfigError::BoardWidth {
                value: 3,
                min: 4,
                max: 64
            })
        );

        let tall = EngineConfig {
            board_height: 65,
            ..EngineConfig::default()
        };
        assert!(matches!(
            tall.validate(),
            Err(ConfigError::BoardHeight { value: 65, .. })
        ));

        let frozen = EngineConfig {
            initial_drop_interval_ms: 0,
            ..EngineConfig::default()
        };
        assert_eq!(frozen.validate(), Err(ConfigError::DropInterval));
    }

    #[test]
    fn test_config_serialization() {
        let config = EngineConfig {
            board_width: 12,
            board_height: 22,
            initial_drop_interval_ms: 500,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"boardWidth":12,"boardHeight":22,"initialDropIntervalMs":500}"#
        );
        let parsed: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        assert!(serde_json::from_str::<EngineConfig>(r#"{"level": 3}"#).is_err());
    }
}
