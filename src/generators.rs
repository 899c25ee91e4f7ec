use std::str::FromStr;

use bit_set::BitSet;
use error_chain::bail;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::errors::*;
use crate::grid::{self, WallGrid};

/// How the recursive backtracker picks which unvisited neighbour to carve into next.
///
/// Both produce perfect mazes but the mazes are distributed differently, so a seeded maze made
/// with one policy will not match the same seed made with the other.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum NeighbourSelection {
    /// Every time a cell is at the top of the stack, list its unvisited neighbours in
    /// `CompassPrimary::CARVING_ORDER` and draw one uniformly. One draw per carved passage,
    /// none when backtracking.
    UniformAmongUnvisited,
    /// Shuffle the four directions once when a cell is first entered, then keep walking that
    /// order each time the cell returns to the top of the stack. This is exactly what a call
    /// recursive depth first carve does, minus the call depth.
    ShuffledDirections,
}

impl Default for NeighbourSelection {
    fn default() -> Self {
        NeighbourSelection::UniformAmongUnvisited
    }
}

impl FromStr for NeighbourSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<NeighbourSelection> {
        match s {
            "uniform" => Ok(NeighbourSelection::UniformAmongUnvisited),
            "shuffled" => Ok(NeighbourSelection::ShuffledDirections),
            other => {
                Err(ErrorKind::InvalidArgument(format!("unknown neighbour selection `{}`, \
                                                        expected `uniform` or `shuffled`",
                                                       other))
                    .into())
            }
        }
    }
}

/// Generate a perfect maze of `size * size` cells.
///
/// With a seed the maze is reproducible: the same size and seed always give the same maze.
/// Without one the generator is seeded from the operating system's entropy.
pub fn generate(size: usize, seed: Option<u64>) -> Result<WallGrid> {
    let mut rng = match seed {
        Some(s) => XorShiftRng::seed_from_u64(s),
        None => XorShiftRng::from_entropy(),
    };
    recursive_backtracker(size, &mut rng)
}

/// Apply the recursive backtracker maze generation algorithm to a fresh, fully walled grid.
///
/// A random walk that avoids cells it has already visited. When the walk reaches a dead end
/// (no unvisited neighbours) it backtracks along its own path until it finds a cell with an
/// unvisited neighbour and walks on from there. Every cell is visited exactly once so exactly
/// `size * size - 1` walls are cleared and the passages form a spanning tree.
///
/// The walk is kept on an explicit stack rather than the call stack; a 1000 * 1000 grid can
/// have a path a million cells long.
///
/// Randomness is drawn from `rng` in a fixed order: one `gen_range(0..size * size)` for the
/// start cell (a row major index), then one draw per carved passage.
pub fn recursive_backtracker<R>(size: usize, rng: &mut R) -> Result<WallGrid>
    where R: Rng + ?Sized
{
    recursive_backtracker_with(size, rng, NeighbourSelection::default())
}

/// As `recursive_backtracker` with an explicit neighbour selection policy. The shuffled policy
/// draws three times for every cell when it is first entered instead of once per passage.
pub fn recursive_backtracker_with<R>(size: usize,
                                     rng: &mut R,
                                     selection: NeighbourSelection)
                                     -> Result<WallGrid>
    where R: Rng + ?Sized
{
    let cells_count = validate_size(size)?;

    let mut grid = WallGrid::new(size);
    let mut visited = BitSet::with_capacity(cells_count);

    let start_index = rng.gen_range(0..cells_count);
    let start = Cartesian2DCoordinate::from_row_major_index(start_index, size);
    debug!("carving {0}x{0} maze from {1:?} using {2:?}", size, start, selection);

    let _ = visited.insert(start_index);
    let mut stack = vec![Frame::new(start, selection, rng)];

    while let Some(top) = stack.last_mut() {
        let current = top.coord;

        let next_step = match selection {
            NeighbourSelection::UniformAmongUnvisited => {
                let candidates = unvisited_neighbours(&grid, &visited, current);
                if candidates.is_empty() {
                    None
                } else {
                    let pick = rng.gen_range(0..candidates.len());
                    Some(candidates[pick])
                }
            }
            NeighbourSelection::ShuffledDirections => top.next_shuffled_step(&grid, &visited),
        };

        match next_step {
            Some((direction, neighbour)) => {
                let cleared = grid.clear_wall(current, direction);
                debug_assert!(cleared, "carving left the grid at {:?} {:?}", current, direction);
                trace!("carve {:?} -> {:?}", current, neighbour);

                if let Some(neighbour_index) = grid.grid_coordinate_to_index(neighbour) {
                    let newly_visited = visited.insert(neighbour_index);
                    debug_assert!(newly_visited, "carved into visited cell {:?}", neighbour);
                }

                stack.push(Frame::new(neighbour, selection, rng));
            }
            None => {
                // Dead end, backtrack
                let _ = stack.pop();
            }
        }
    }

    debug!("carved {} passages over {} cells", grid.passages_count(), cells_count);
    Ok(grid)
}

/// Check the requested grid size and return the number of cells it will have.
fn validate_size(size: usize) -> Result<usize> {
    if size < 1 {
        bail!(ErrorKind::InvalidArgument(String::from("maze size must be at least 1")));
    }
    if size > u32::max_value() as usize {
        bail!(ErrorKind::InvalidArgument(format!("maze size {} does not fit cell coordinates",
                                                 size)));
    }
    match size.checked_mul(size) {
        Some(cells_count) if grid::is_addressable_cells_count(cells_count) => Ok(cells_count),
        _ => Err(ErrorKind::InvalidArgument(format!("maze size {} has too many cells", size)).into()),
    }
}

type CandidateSmallVec = SmallVec<[(CompassPrimary, Cartesian2DCoordinate); 4]>;

fn unvisited_neighbours(grid: &WallGrid,
                        visited: &BitSet,
                        coord: Cartesian2DCoordinate)
                        -> CandidateSmallVec {
    CompassPrimary::CARVING_ORDER
        .iter()
        .filter_map(|dir| grid.neighbour_at_direction(coord, *dir).map(|n| (*dir, n)))
        .filter(|&(_, neighbour)| !is_visited(grid, visited, neighbour))
        .collect()
}

#[inline]
fn is_visited(grid: &WallGrid, visited: &BitSet, coord: Cartesian2DCoordinate) -> bool {
    grid.grid_coordinate_to_index(coord)
        .map_or(false, |index| visited.contains(index))
}

/// A cell on the traversal stack.
/// Only the shuffled policy needs more than the coordinate: its direction order and how far
/// through that order the cell has got.
#[derive(Debug)]
struct Frame {
    coord: Cartesian2DCoordinate,
    directions: [CompassPrimary; 4],
    next_direction: usize,
}

impl Frame {
    fn new<R>(coord: Cartesian2DCoordinate, selection: NeighbourSelection, rng: &mut R) -> Frame
        where R: Rng + ?Sized
    {
        let mut directions = CompassPrimary::CARVING_ORDER;
        if selection == NeighbourSelection::ShuffledDirections {
            directions.shuffle(rng);
        }
        Frame {
            coord,
            directions,
            next_direction: 0,
        }
    }

    fn next_shuffled_step(&mut self,
                          grid: &WallGrid,
                          visited: &BitSet)
                          -> Option<(CompassPrimary, Cartesian2DCoordinate)> {
        while self.next_direction < self.directions.len() {
            let dir = self.directions[self.next_direction];
            self.next_direction += 1;

            if let Some(neighbour) = grid.neighbour_at_direction(self.coord, dir) {
                if !is_visited(grid, visited, neighbour) {
                    return Some((dir, neighbour));
                }
            }
        }
        None
    }
}
