//! Error taxonomy.
//!
//! Only two engine failures exist: a rejected placement, which callers are
//! expected to shrug off, and a bad session configuration, which is fatal at
//! construction. The remaining errors belong to the persistence helpers.

use thiserror::Error;

use crate::board::Coord;

/// Why a cell could not be played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidCellReason {
    OutOfBounds,
    Disabled,
    Occupied,
    GameOver,
}

impl std::fmt::Display for InvalidCellReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::OutOfBounds => "outside the board",
            Self::Disabled => "disabled",
            Self::Occupied => "already occupied",
            Self::GameOver => "game already over",
        };
        f.write_str(text)
    }
}

/// Rejected placement. The session is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("Invalid cell {coord}: {reason}")]
    InvalidCell {
        coord: Coord,
        reason: InvalidCellReason,
    },
}

impl PlacementError {
    pub(crate) const fn invalid(coord: Coord, reason: InvalidCellReason) -> Self {
        Self::InvalidCell { coord, reason }
    }

    #[must_use]
    pub const fn reason(&self) -> InvalidCellReason {
        match self {
            Self::InvalidCell { reason, .. } => *reason,
        }
    }
}

/// Session setup that cannot produce a playable board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Too many disabled cells: requested {requested} but the board only has {capacity}")]
    TooManyDisabledCells { requested: usize, capacity: usize },
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Invalid tile value range {min}..={max}")]
    InvalidTileRange { min: u32, max: u32 },
    #[error("Tile values up to {max} on {cells} cells could overflow a score")]
    TileValuesOverflow { max: u32, cells: usize },
    #[error("Unknown difficulty {0:?}")]
    UnknownDifficulty(String),
    #[error("Disabled cell {0} listed twice")]
    DuplicateDisabledCell(Coord),
    #[error("Disabled cell {0} is outside the board")]
    DisabledCellOutOfBounds(Coord),
}

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("Leaderboard JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[source] bincode::Error),
    #[error("Failed to decode snapshot: {0}")]
    Decode(#[source] bincode::Error),
}

pub type PlacementResult<T> = Result<T, PlacementError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_error_message() {
        let err = PlacementError::invalid(Coord::new(2, 3), InvalidCellReason::Occupied);
        assert_eq!(err.to_string(), "Invalid cell (2, 3): already occupied");
        assert_eq!(err.reason(), InvalidCellReason::Occupied);
    }

    #[test]
    fn test_configuration_error_message() {
        let err = ConfigurationError::TooManyDisabledCells {
            requested: 9,
            capacity: 4,
        };
        assert!(err.to_string().contains("requested 9"));
    }
}
