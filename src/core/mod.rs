//! Core engine types: players, RNG, configuration, errors.
//!
//! These are the building blocks shared by the board, the rules and the
//! opponent policies.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{Color, Player, PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use config::{Difficulty, GameConfig};
pub use error::{
    ConfigurationError, InvalidCellReason, LeaderboardError, PlacementError, PlacementResult,
    SnapshotError,
};
