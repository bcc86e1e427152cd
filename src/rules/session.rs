//! Game session: the turn engine.
//!
//! A `GameSession` owns the board, both players, the tile dealer and the
//! turn state. Each successful placement runs to completion before
//! returning:
//!
//! 1. put the current tile on the chosen cell
//! 2. resolve captures and reinforcements around it
//! 3. recompute both scores from the board
//! 4. hand the turn to the other player and deal their tile
//! 5. end the game once no playable cell remains
//!
//! Rejected placements leave the session exactly as it was.
//!
//! ```
//! use hexaria::core::Difficulty;
//! use hexaria::rules::SessionBuilder;
//!
//! let mut session = SessionBuilder::new()
//!     .player_names("Ada", "Grace")
//!     .difficulty(Difficulty::Easy)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let target = session.legal_moves()[0];
//! let outcome = session.place_tile(target.row, target.col).unwrap();
//! assert_eq!(outcome.next_player, session.current_player());
//! ```

use serde::{Deserialize, Serialize};

use super::resolve::{self, NeighborChanges, PlacementPreview};
use super::tile::{Tile, TileGenerator};
use crate::board::{Cell, CellView, Coord, Grid};
use crate::core::{
    ConfigurationError, Difficulty, GameConfig, GameRng, InvalidCellReason, PlacementError,
    PlacementResult, Player, PlayerId, PlayerMap, SnapshotError,
};
use crate::policy::OpponentPolicy;
use crate::results::{OutcomeRecord, ResultRecorder};

/// Name given to the second seat when it is played by the engine.
pub const BOT_NAME: &str = "Bot";

/// Where the session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingPlacement(PlayerId),
    GameOver { winner: PlayerId },
}

/// Final standing of a finished session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: PlayerId,
    /// Scores were level and the first player was awarded the win.
    pub tie_break: bool,
    pub record: OutcomeRecord,
}

/// One successful placement, kept for replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 1-based placement number.
    pub turn: usize,
    pub player: PlayerId,
    pub coord: Coord,
    pub tile: Tile,
}

/// Everything a successful `place_tile` changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub coord: Coord,
    pub tile: Tile,
    pub changes: NeighborChanges,
    pub scores: PlayerMap<u32>,
    pub next_player: PlayerId,
    pub next_tile: Tile,
    /// Set on the placement that fills the board, and only then.
    pub game_over: Option<GameResult>,
}

/// Builder for creating a `GameSession`.
#[derive(Clone, Debug)]
pub struct SessionBuilder {
    config: GameConfig,
    names: [String; 2],
    opponent_is_bot: bool,
    seed: Option<u64>,
    disabled: Option<Vec<Coord>>,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            names: ["Player 1".to_string(), "Player 2".to_string()],
            opponent_is_bot: false,
            seed: None,
            disabled: None,
        }
    }
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn player_names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.names = [first.into(), second.into()];
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.config.difficulty = difficulty;
        self
    }

    pub fn board_size(mut self, rows: usize, cols: usize) -> Self {
        self.config.rows = rows;
        self.config.cols = cols;
        self
    }

    /// Seat the engine in the second chair. Its name becomes `"Bot"`.
    pub fn bot_opponent(mut self, enabled: bool) -> Self {
        self.opponent_is_bot = enabled;
        self
    }

    /// Fix every random stream of the session. Unseeded sessions draw a
    /// fresh seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use an exact disabled-cell layout instead of the difficulty's random one.
    pub fn disabled_cells(mut self, cells: &[Coord]) -> Self {
        self.disabled = Some(cells.to_vec());
        self
    }

    /// Build the session, ready for the first player's placement.
    pub fn build(self) -> Result<GameSession, ConfigurationError> {
        let config = self.config;
        let seed = self.seed.unwrap_or_else(rand::random);
        let root = GameRng::new(seed);

        let grid = match &self.disabled {
            Some(cells) => {
                config.validate_tile_values()?;
                Grid::with_disabled(config.rows, config.cols, cells)?
            }
            None => {
                config.validate()?;
                let mut board_rng = root.for_context("board");
                Grid::new(
                    config.rows,
                    config.cols,
                    config.difficulty.disabled_count(),
                    &mut board_rng,
                )?
            }
        };

        let [first, second] = self.names;
        let second = if self.opponent_is_bot {
            BOT_NAME.to_string()
        } else {
            second.trim().to_string()
        };
        let players = PlayerMap::from_pair(
            Player::new(PlayerId::FIRST, first.trim()),
            Player::new(PlayerId::SECOND, second),
        );

        let mut tiles = TileGenerator::new(root.for_context("tiles"), config.tile_values());
        let current_tile = tiles.next(PlayerId::FIRST);

        log::info!(
            "New {} session (seed {}): {} vs {}, {} disabled cells",
            config.difficulty,
            seed,
            players[PlayerId::FIRST].name,
            players[PlayerId::SECOND].name,
            grid.disabled_count()
        );

        let mut session = GameSession {
            config,
            grid,
            players,
            current_player: PlayerId::FIRST,
            current_tile,
            tiles,
            opponent_rng: root.for_context("opponent"),
            bot_seat: self.opponent_is_bot.then_some(PlayerId::SECOND),
            recorder: ResultRecorder,
            result: None,
            history: Vec::new(),
        };

        if session.grid.is_full() {
            log::warn!("Board has no playable cell, session ends immediately");
            session.result = Some(session.finish());
        }

        Ok(session)
    }
}

/// A single game from setup to final score.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    players: PlayerMap<Player>,
    current_player: PlayerId,
    current_tile: Tile,
    tiles: TileGenerator,
    opponent_rng: GameRng,
    bot_seat: Option<PlayerId>,
    recorder: ResultRecorder,
    result: Option<GameResult>,
    history: Vec<MoveRecord>,
}

impl GameSession {
    /// Start a session on the default board with a random seed.
    pub fn create(
        first_name: &str,
        second_name: &str,
        difficulty: Difficulty,
        opponent_is_bot: bool,
    ) -> Result<Self, ConfigurationError> {
        SessionBuilder::new()
            .player_names(first_name, second_name)
            .difficulty(difficulty)
            .bot_opponent(opponent_is_bot)
            .build()
    }

    /// Place the current tile at `(row, col)`.
    pub fn place_tile(&mut self, row: usize, col: usize) -> PlacementResult<PlacementOutcome> {
        self.place_at(Coord::new(row, col))
    }

    pub fn place_at(&mut self, coord: Coord) -> PlacementResult<PlacementOutcome> {
        self.check_playable(coord)?;

        let player = self.current_player;
        let tile = self.current_tile;
        let changes = resolve::place_and_resolve(&mut self.grid, coord, tile);
        self.refresh_scores();

        self.history.push(MoveRecord {
            turn: self.history.len() + 1,
            player,
            coord,
            tile,
        });
        log::debug!(
            "{} placed {} at {} ({} neighbor change(s)), scores {}-{}",
            player,
            tile.value,
            coord,
            changes.len(),
            self.players[PlayerId::FIRST].score,
            self.players[PlayerId::SECOND].score
        );

        self.current_player = player.opponent();
        self.current_tile = self.tiles.next(self.current_player);

        let game_over = if self.grid.is_full() {
            let result = self.finish();
            self.result = Some(result.clone());
            Some(result)
        } else {
            None
        };

        Ok(PlacementOutcome {
            coord,
            tile,
            changes,
            scores: self.scores(),
            next_player: self.current_player,
            next_tile: self.current_tile,
            game_over,
        })
    }

    /// Let `policy` play the current turn.
    ///
    /// Returns `Ok(None)` when there is nothing left to play.
    pub fn play_opponent_turn<P>(&mut self, policy: &P) -> PlacementResult<Option<PlacementOutcome>>
    where
        P: OpponentPolicy + ?Sized,
    {
        if self.is_game_over() {
            return Ok(None);
        }
        let legal = self.grid.legal_moves();
        let choice = policy.choose_move(&legal, &self.grid, &self.current_tile, &mut self.opponent_rng);
        match choice {
            Some(coord) => {
                log::trace!("{} policy chose {}", self.current_player, coord);
                self.place_at(coord).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Predict the effect of placing the current tile at `(row, col)`.
    #[must_use]
    pub fn preview(&self, row: usize, col: usize) -> Option<PlacementPreview> {
        if self.is_game_over() {
            return None;
        }
        resolve::preview_placement(&self.grid, Coord::new(row, col), self.current_tile)
    }

    fn check_playable(&self, coord: Coord) -> PlacementResult<()> {
        let reason = if self.is_game_over() {
            InvalidCellReason::GameOver
        } else {
            match self.grid.get(coord) {
                None => InvalidCellReason::OutOfBounds,
                Some(Cell::Disabled) => InvalidCellReason::Disabled,
                Some(Cell::Occupied { .. }) => InvalidCellReason::Occupied,
                Some(Cell::Empty) => return Ok(()),
            }
        };
        log::debug!("Rejected placement at {}: {}", coord, reason);
        Err(PlacementError::invalid(coord, reason))
    }

    fn refresh_scores(&mut self) {
        let scores = self.grid.scores();
        for (id, player) in self.players.iter_mut() {
            player.score = scores[id];
        }
    }

    /// Decide the winner. Level scores go to the first player.
    fn finish(&self) -> GameResult {
        let first = self.players[PlayerId::FIRST].score;
        let second = self.players[PlayerId::SECOND].score;
        let winner = if second > first {
            PlayerId::SECOND
        } else {
            PlayerId::FIRST
        };
        let tie_break = first == second;
        if tie_break {
            log::warn!("Scores level at {}, awarding the win to {}", first, winner);
        }

        let record = self.recorder.record(&self.players[winner]);
        log::info!(
            "Game over: {} wins with {} ({} to {})",
            record.winner_name,
            record.winner_score,
            first,
            second
        );
        GameResult {
            winner,
            tie_break,
            record,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<CellView> {
        self.grid.get(Coord::new(row, col)).map(Cell::view)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn scores(&self) -> PlayerMap<u32> {
        PlayerMap::new(|id| self.players[id].score)
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn current_tile(&self) -> Tile {
        self.current_tile
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match &self.result {
            Some(result) => Phase::GameOver {
                winner: result.winner,
            },
            None => Phase::AwaitingPlacement(self.current_player),
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&OutcomeRecord> {
        self.result.as_ref().map(|result| &result.record)
    }

    /// Seat played by the engine, if any.
    #[must_use]
    pub fn bot_seat(&self) -> Option<PlayerId> {
        self.bot_seat
    }

    /// True when the caller should run `play_opponent_turn`.
    #[must_use]
    pub fn is_bot_turn(&self) -> bool {
        !self.is_game_over() && self.bot_seat == Some(self.current_player)
    }

    #[must_use]
    pub fn legal_moves(&self) -> Vec<Coord> {
        if self.is_game_over() {
            return Vec::new();
        }
        self.grid.legal_moves()
    }

    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Read-only copy of everything a renderer needs.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            cells: self.grid.cells().map(|(_, cell)| cell.view()).collect(),
            players: self.players.clone(),
            current_player: self.current_player,
            current_tile: self.current_tile,
            phase: self.phase(),
            outcome: self.outcome().cloned(),
        }
    }
}

/// Serializable view of a session, cells in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<CellView>,
    pub players: PlayerMap<Player>,
    pub current_player: PlayerId,
    pub current_tile: Tile,
    pub phase: Phase,
    pub outcome: Option<OutcomeRecord>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellView> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(SnapshotError::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(SnapshotError::Decode)
    }
}
