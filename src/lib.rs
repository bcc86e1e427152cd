//! # hexaria
//!
//! Board-state engine for Hexaria, a two-player territory game on a grid of
//! hexagonal cells.
//!
//! Each turn the current player is dealt a tile worth 1 to 20 points and
//! puts it on any empty cell. Neighbors react to the placed tile:
//!
//! - an opposing neighbor with a lower value is **captured** (it changes
//!   owner and keeps its value)
//! - a neighbor of the same owner is **reinforced** (its value goes up by one)
//!
//! A player's score is the sum of the cells they own. The game ends when no
//! empty cell remains.
//!
//! ## Design Principles
//!
//! 1. **Explicit sessions**: all state lives in a `GameSession` the caller
//!    owns. There is no global board.
//!
//! 2. **Deterministic**: every random draw (disabled cells, tile values,
//!    opponent moves) comes from a seeded `GameRng`, so a seed replays a game.
//!
//! 3. **Pure data**: cells carry no rendering state. Front ends draw from
//!    `SessionSnapshot` and `PlacementPreview`.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors
//! - `board`: Cells and the offset-row hex grid
//! - `rules`: Tiles, adjacency resolution, the turn engine
//! - `policy`: Automated opponent policies
//! - `results`: Outcome records and the leaderboard

pub mod core;
pub mod board;
pub mod rules;
pub mod policy;
pub mod results;

// Re-export commonly used types
pub use crate::core::{
    Color, ConfigurationError, Difficulty, GameConfig, GameRng, InvalidCellReason,
    LeaderboardError, PlacementError, Player, PlayerId, PlayerMap, SnapshotError,
};

pub use crate::board::{Cell, CellView, Coord, Grid};

pub use crate::rules::{
    GameResult, GameSession, MoveRecord, NeighborChange, Phase, PlacementOutcome,
    PlacementPreview, SessionBuilder, SessionSnapshot, Tile, TileGenerator,
};

pub use crate::policy::{GreedyOpponent, OpponentPolicy, UniformOpponent};

pub use crate::results::{Leaderboard, LeaderboardOrder, OutcomeRecord, ResultRecorder};
