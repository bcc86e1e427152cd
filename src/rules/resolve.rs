//! Adjacency resolution.
//!
//! After a tile lands, every occupied neighbor is compared against the
//! placed tile (never against a neighbor already changed in the same pass):
//!
//! - opposing neighbor with a strictly lower value: captured, value kept
//! - own neighbor: reinforced by one
//! - anything else: untouched (ties never capture)
//!
//! `preview_placement` runs the same classification without touching the
//! board, which is what move previews and the greedy opponent need.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::tile::Tile;
use crate::board::{Cell, Coord, Grid};
use crate::core::PlayerId;

/// Effect of a placement on one neighboring cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeighborChange {
    Captured {
        coord: Coord,
        value: u32,
        previous_owner: PlayerId,
    },
    Reinforced {
        coord: Coord,
        new_value: u32,
    },
}

impl NeighborChange {
    #[must_use]
    pub const fn coord(&self) -> Coord {
        match self {
            Self::Captured { coord, .. } | Self::Reinforced { coord, .. } => *coord,
        }
    }

    #[must_use]
    pub const fn is_capture(&self) -> bool {
        matches!(self, Self::Captured { .. })
    }
}

pub type NeighborChanges = SmallVec<[NeighborChange; 6]>;

/// How `neighbor` reacts to `tile` placed next to it.
#[must_use]
pub fn classify(coord: Coord, neighbor: Cell, tile: Tile) -> Option<NeighborChange> {
    let Cell::Occupied { owner, value } = neighbor else {
        return None;
    };

    if owner != tile.owner && value < tile.value {
        Some(NeighborChange::Captured {
            coord,
            value,
            previous_owner: owner,
        })
    } else if owner == tile.owner {
        Some(NeighborChange::Reinforced {
            coord,
            new_value: value + 1,
        })
    } else {
        None
    }
}

fn neighbor_changes(grid: &Grid, coord: Coord, tile: Tile) -> NeighborChanges {
    grid.neighbors(coord)
        .into_iter()
        .filter_map(|n| grid.get(n).and_then(|cell| classify(n, cell, tile)))
        .collect()
}

/// Put `tile` on `coord` and apply its neighbor changes.
///
/// The caller has already checked that `coord` is playable.
pub(crate) fn place_and_resolve(grid: &mut Grid, coord: Coord, tile: Tile) -> NeighborChanges {
    grid.set(
        coord,
        Cell::Occupied {
            owner: tile.owner,
            value: tile.value,
        },
    );

    let changes = neighbor_changes(grid, coord, tile);
    for change in &changes {
        match *change {
            NeighborChange::Captured { coord: at, value, previous_owner } => {
                log::debug!(
                    "{} captures {} (value {}) from {}",
                    tile.owner,
                    at,
                    value,
                    previous_owner
                );
                grid.set(at, Cell::Occupied { owner: tile.owner, value });
            }
            NeighborChange::Reinforced { coord: at, new_value } => {
                log::debug!("{} reinforces {} to {}", tile.owner, at, new_value);
                grid.set(at, Cell::Occupied { owner: tile.owner, value: new_value });
            }
        }
    }
    changes
}

/// Predicted result of placing a tile, without mutating the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementPreview {
    pub coord: Coord,
    pub tile: Tile,
    pub changes: NeighborChanges,
    /// Points the placing player would gain.
    pub gain: u32,
    /// Points the opponent would lose.
    pub opponent_loss: u32,
}

impl PlacementPreview {
    /// Change in (placer score - opponent score).
    #[must_use]
    pub fn differential(&self) -> i64 {
        i64::from(self.gain) + i64::from(self.opponent_loss)
    }

    pub fn captures(&self) -> impl Iterator<Item = Coord> + '_ {
        self.changes.iter().filter(|c| c.is_capture()).map(|c| c.coord())
    }

    pub fn reinforcements(&self) -> impl Iterator<Item = Coord> + '_ {
        self.changes.iter().filter(|c| !c.is_capture()).map(|c| c.coord())
    }
}

/// Preview placing `tile` at `coord`. `None` if the cell is not playable.
#[must_use]
pub fn preview_placement(grid: &Grid, coord: Coord, tile: Tile) -> Option<PlacementPreview> {
    if !grid.get(coord)?.is_playable() {
        return None;
    }

    let changes = neighbor_changes(grid, coord, tile);
    let mut gain = tile.value;
    let mut opponent_loss = 0;
    for change in &changes {
        match *change {
            NeighborChange::Captured { value, .. } => {
                gain += value;
                opponent_loss += value;
            }
            NeighborChange::Reinforced { .. } => gain += 1,
        }
    }

    Some(PlacementPreview {
        coord,
        tile,
        changes,
        gain,
        opponent_loss,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: PlayerId = PlayerId::FIRST;
    const BLUE: PlayerId = PlayerId::SECOND;

    fn occupied(owner: PlayerId, value: u32) -> Cell {
        Cell::Occupied { owner, value }
    }

    #[test]
    fn test_classify_capture_keeps_value() {
        let at = Coord::new(0, 0);
        assert_eq!(
            classify(at, occupied(BLUE, 5), Tile::new(7, RED)),
            Some(NeighborChange::Captured {
                coord: at,
                value: 5,
                previous_owner: BLUE,
            })
        );
    }

    #[test]
    fn test_classify_lower_tile_no_change() {
        let at = Coord::new(0, 0);
        assert_eq!(classify(at, occupied(BLUE, 5), Tile::new(4, RED)), None);
    }

    #[test]
    fn test_classify_tie_does_not_capture() {
        let at = Coord::new(0, 0);
        assert_eq!(classify(at, occupied(BLUE, 5), Tile::new(5, RED)), None);
    }

    #[test]
    fn test_classify_reinforce_any_value() {
        let at = Coord::new(0, 0);
        for value in [1, 5, 20] {
            assert_eq!(
                classify(at, occupied(RED, 5), Tile::new(value, RED)),
                Some(NeighborChange::Reinforced {
                    coord: at,
                    new_value: 6,
                })
            );
        }
    }

    #[test]
    fn test_classify_ignores_empty_and_disabled() {
        let at = Coord::new(0, 0);
        assert_eq!(classify(at, Cell::Empty, Tile::new(20, RED)), None);
        assert_eq!(classify(at, Cell::Disabled, Tile::new(20, RED)), None);
    }

    #[test]
    fn test_place_and_resolve_mixed() {
        let mut grid = Grid::with_disabled(3, 3, &[Coord::new(2, 1)]).unwrap();
        // (1,1) is odd: neighbors (0,1) (2,1) (1,0) (1,2) (2,0) (2,2)
        grid.set(Coord::new(0, 1), occupied(BLUE, 5));
        grid.set(Coord::new(1, 0), occupied(BLUE, 9));
        grid.set(Coord::new(1, 2), occupied(RED, 2));
        grid.set(Coord::new(2, 2), occupied(BLUE, 8));
        // (0,0) is not adjacent to (1,1) and must not change.
        grid.set(Coord::new(0, 0), occupied(BLUE, 1));

        let changes = place_and_resolve(&mut grid, Coord::new(1, 1), Tile::new(8, RED));

        assert_eq!(grid.get(Coord::new(1, 1)), Some(occupied(RED, 8)));
        assert_eq!(grid.get(Coord::new(0, 1)), Some(occupied(RED, 5)));
        assert_eq!(grid.get(Coord::new(1, 0)), Some(occupied(BLUE, 9)));
        assert_eq!(grid.get(Coord::new(1, 2)), Some(occupied(RED, 3)));
        assert_eq!(grid.get(Coord::new(2, 2)), Some(occupied(BLUE, 8)));
        assert_eq!(grid.get(Coord::new(2, 1)), Some(Cell::Disabled));
        assert_eq!(grid.get(Coord::new(0, 0)), Some(occupied(BLUE, 1)));
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn test_preview_matches_resolution() {
        let mut grid = Grid::with_disabled(3, 3, &[]).unwrap();
        grid.set(Coord::new(0, 1), occupied(BLUE, 5));
        grid.set(Coord::new(1, 2), occupied(RED, 2));
        let tile = Tile::new(8, RED);
        let before = grid.clone();

        let preview = preview_placement(&grid, Coord::new(1, 1), tile).unwrap();
        assert_eq!(grid, before);

        let changes = place_and_resolve(&mut grid, Coord::new(1, 1), tile);
        assert_eq!(preview.changes, changes);

        // 8 placed + 5 captured + 1 reinforcement
        assert_eq!(preview.gain, 14);
        assert_eq!(preview.opponent_loss, 5);
        assert_eq!(preview.differential(), 19);
        assert_eq!(preview.captures().collect::<Vec<_>>(), vec![Coord::new(0, 1)]);
        assert_eq!(preview.reinforcements().collect::<Vec<_>>(), vec![Coord::new(1, 2)]);

        let scores = grid.scores();
        let before_scores = before.scores();
        assert_eq!(scores[RED] - before_scores[RED], preview.gain);
        assert_eq!(before_scores[BLUE] - scores[BLUE], preview.opponent_loss);
    }

    #[test]
    fn test_preview_rejects_unplayable() {
        let mut grid = Grid::with_disabled(2, 2, &[Coord::new(0, 0)]).unwrap();
        grid.set(Coord::new(1, 1), occupied(RED, 4));
        let tile = Tile::new(3, BLUE);

        assert!(preview_placement(&grid, Coord::new(0, 0), tile).is_none());
        assert!(preview_placement(&grid, Coord::new(1, 1), tile).is_none());
        assert!(preview_placement(&grid, Coord::new(5, 5), tile).is_none());
        assert!(preview_placement(&grid, Coord::new(0, 1), tile).is_some());
    }
}
