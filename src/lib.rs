//! **perfect_maze** generates perfect mazes: square grids of cells whose passages form a spanning
//! tree, so there is exactly one route between any two cells.
//!
//! Mazes are carved by an iterative recursive backtracker into a `WallGrid` that stores only the
//! right and bottom wall of each cell.

pub mod cells;
pub mod connectivity;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_iterators;
pub mod units;
mod utils;

pub use crate::generators::{generate, recursive_backtracker, recursive_backtracker_with,
                            NeighbourSelection};
pub use crate::grid::WallGrid;
