//! Opponent policies for the automated player.
//!
//! Policies are trait-based so a stronger player can be dropped in without
//! touching the session:
//! - `UniformOpponent`: any legal cell, uniformly at random
//! - `GreedyOpponent`: best immediate score swing, random among equals

use crate::board::{Coord, Grid};
use crate::core::GameRng;
use crate::rules::{preview_placement, Tile};

/// Chooses where the automated player puts its tile.
pub trait OpponentPolicy: Send + Sync {
    /// Pick one of `legal_moves` for `tile`.
    ///
    /// Returns `None` only when `legal_moves` is empty.
    fn choose_move(
        &self,
        legal_moves: &[Coord],
        grid: &Grid,
        tile: &Tile,
        rng: &mut GameRng,
    ) -> Option<Coord>;
}

/// Uniform random opponent policy.
#[derive(Clone, Debug, Default)]
pub struct UniformOpponent;

impl OpponentPolicy for UniformOpponent {
    fn choose_move(
        &self,
        legal_moves: &[Coord],
        _grid: &Grid,
        _tile: &Tile,
        rng: &mut GameRng,
    ) -> Option<Coord> {
        rng.choose(legal_moves).copied()
    }
}

/// One-ply greedy policy.
///
/// Scores each move by how much it widens the gap between the placer and
/// the opponent (placed value, captured values counted twice, one per
/// reinforcement).
#[derive(Clone, Debug, Default)]
pub struct GreedyOpponent;

impl OpponentPolicy for GreedyOpponent {
    fn choose_move(
        &self,
        legal_moves: &[Coord],
        grid: &Grid,
        tile: &Tile,
        rng: &mut GameRng,
    ) -> Option<Coord> {
        let mut best = i64::MIN;
        let mut candidates = Vec::new();

        for &coord in legal_moves {
            let Some(preview) = preview_placement(grid, coord, *tile) else {
                continue;
            };
            let swing = preview.differential();
            if swing > best {
                best = swing;
                candidates.clear();
            }
            if swing == best {
                candidates.push(coord);
            }
        }

        log::trace!(
            "Greedy opponent: {} candidate(s) with swing {}",
            candidates.len(),
            best
        );
        rng.choose(&candidates).copied()
    }
}
