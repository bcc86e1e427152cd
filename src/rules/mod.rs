//! Game rules: tiles, adjacency resolution and the turn engine.
//!
//! - `tile`: the value/owner pair dealt each turn
//! - `resolve`: capture and reinforcement around a placed tile
//! - `session`: turn sequencing, scoring and game-over detection

pub mod tile;
pub mod resolve;
pub mod session;

pub use tile::{Tile, TileGenerator};
pub use resolve::{classify, preview_placement, NeighborChange, NeighborChanges, PlacementPreview};
pub use session::{
    GameResult, GameSession, MoveRecord, Phase, PlacementOutcome, SessionBuilder, SessionSnapshot,
    BOT_NAME,
};
