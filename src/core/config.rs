//! Game configuration types.
//!
//! `GameConfig` bundles everything a session needs before the first tile is
//! drawn: board dimensions, difficulty (which fixes how many cells start
//! disabled), the tile value range and the leaderboard size.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::str::FromStr;

use super::error::ConfigurationError;

/// Difficulty level. Determines how many cells are disabled at setup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Number of cells disabled at session start.
    #[must_use]
    pub const fn disabled_count(self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 6,
            Difficulty::Hard => 8,
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigurationError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Complete game configuration.
///
/// ## Defaults
///
/// - 8 rows x 10 columns
/// - `Difficulty::Easy`
/// - tile values 1..=20
/// - top-10 leaderboard
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub difficulty: Difficulty,
    /// Smallest tile value the generator can draw.
    pub min_tile_value: u32,
    /// Largest tile value the generator can draw.
    pub max_tile_value: u32,
    pub leaderboard_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 10,
            difficulty: Difficulty::Easy,
            min_tile_value: 1,
            max_tile_value: 20,
            leaderboard_capacity: 10,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_board_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    #[must_use]
    pub fn with_tile_values(mut self, values: RangeInclusive<u32>) -> Self {
        self.min_tile_value = *values.start();
        self.max_tile_value = *values.end();
        self
    }

    /// Total number of cells on the board.
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    #[must_use]
    pub fn tile_values(&self) -> RangeInclusive<u32> {
        self.min_tile_value..=self.max_tile_value
    }

    /// Tile values must be a non-empty range of positive integers.
    ///
    /// A cell never exceeds `max_tile_value + cells` (one reinforcement per
    /// later placement), so a score is bounded by `cells * (max + cells)`.
    /// That bound must fit in `u32`.
    pub fn validate_tile_values(&self) -> Result<(), ConfigurationError> {
        if self.min_tile_value == 0 || self.min_tile_value > self.max_tile_value {
            return Err(ConfigurationError::InvalidTileRange {
                min: self.min_tile_value,
                max: self.max_tile_value,
            });
        }

        let cells = self.total_cells();
        let bound = u64::try_from(cells).ok().and_then(|cells| {
            cells
                .checked_add(u64::from(self.max_tile_value))
                .and_then(|peak| peak.checked_mul(cells))
        });
        match bound {
            Some(bound) if bound <= u64::from(u32::MAX) => Ok(()),
            _ => Err(ConfigurationError::TileValuesOverflow {
                max: self.max_tile_value,
                cells,
            }),
        }
    }

    /// Check that the configuration can produce a playable board.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.total_cells() == 0 {
            return Err(ConfigurationError::EmptyBoard);
        }
        self.validate_tile_values()?;
        let requested = self.difficulty.disabled_count();
        if requested > self.total_cells() {
            return Err(ConfigurationError::TooManyDisabledCells {
                requested,
                capacity: self.total_cells(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_counts() {
        assert_eq!(Difficulty::Easy.disabled_count(), 4);
        assert_eq!(Difficulty::Medium.disabled_count(), 6);
        assert_eq!(Difficulty::Hard.disabled_count(), 8);
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" Hard ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(
            "nightmare".parse::<Difficulty>(),
            Err(ConfigurationError::UnknownDifficulty("nightmare".to_string()))
        );
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.total_cells(), 80);
        assert_eq!(config.tile_values(), 1..=20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_tiny_board() {
        let config = GameConfig::default()
            .with_board_size(2, 3)
            .with_difficulty(Difficulty::Hard);
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::TooManyDisabledCells {
                requested: 8,
                capacity: 6,
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_tiles() {
        let config = GameConfig::default().with_tile_values(5..=4);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidTileRange { min: 5, max: 4 })
        ));
        let config = GameConfig::default().with_tile_values(0..=4);
        assert!(config.validate().is_err());
        let config = GameConfig::default().with_board_size(0, 10);
        assert_eq!(config.validate(), Err(ConfigurationError::EmptyBoard));
    }

    #[test]
    fn test_validate_rejects_overflowing_tiles() {
        let config = GameConfig::default()
            .with_board_size(1, 3)
            .with_tile_values(u32::MAX..=u32::MAX);
        assert_eq!(
            config.validate_tile_values(),
            Err(ConfigurationError::TileValuesOverflow {
                max: u32::MAX,
                cells: 3,
            })
        );

        let config = GameConfig::default()
            .with_board_size(1, 4)
            .with_tile_values(3_000_000_000..=3_000_000_000);
        assert!(matches!(
            config.validate_tile_values(),
            Err(ConfigurationError::TileValuesOverflow { cells: 4, .. })
        ));

        // 80 * (53_687_011 + 80) = 4_294_967_280 <= u32::MAX
        let config = GameConfig::default().with_tile_values(1..=53_687_011);
        assert!(config.validate().is_ok());
        let config = GameConfig::default().with_tile_values(1..=53_687_012);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serde() {
        let config = GameConfig::default().with_difficulty(Difficulty::Medium);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"medium\""));
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
