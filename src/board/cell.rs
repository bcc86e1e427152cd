//! Per-cell board state.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// One addressable board position.
///
/// Occupancy is atomic: a cell either has both an owner and a value or
/// neither. A disabled cell never becomes playable, and an occupied cell
/// never returns to empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Disabled,
    Occupied { owner: PlayerId, value: u32 },
}

impl Cell {
    #[must_use]
    pub const fn is_disabled(self) -> bool {
        matches!(self, Cell::Disabled)
    }

    #[must_use]
    pub const fn is_occupied(self) -> bool {
        matches!(self, Cell::Occupied { .. })
    }

    /// Empty and not disabled.
    #[must_use]
    pub const fn is_playable(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[must_use]
    pub const fn owner(self) -> Option<PlayerId> {
        match self {
            Cell::Occupied { owner, .. } => Some(owner),
            _ => None,
        }
    }

    #[must_use]
    pub const fn value(self) -> Option<u32> {
        match self {
            Cell::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Flat `(disabled, owner, value)` view for renderers.
    #[must_use]
    pub const fn view(self) -> CellView {
        CellView {
            disabled: self.is_disabled(),
            owner: self.owner(),
            value: self.value(),
        }
    }
}

/// Read-only projection of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub disabled: bool,
    pub owner: Option<PlayerId>,
    pub value: Option<u32>,
}
