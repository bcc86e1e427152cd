//! Board: cells and the offset-row hex grid that holds them.

pub mod cell;
pub mod grid;

pub use cell::{Cell, CellView};
pub use grid::{Coord, Grid, Neighbors};
