//! Checks that a wall grid really is a perfect maze: one passage fewer than there are cells,
//! no cycles and every cell reachable.

use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::WallGrid;
use crate::units::{CellsCount, PassagesCount};
use crate::utils::{self, FnvHashMap};


/// Flood fill step counts from a start cell to every cell reachable through cleared walls.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Returns None if `start_coordinate` is not on the grid.
    pub fn new(grid: &WallGrid, start_coordinate: Cartesian2DCoordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        let _ = distances.insert(start_coordinate, 0);

        // Every step is one from the previous cell, so the first time a cell is reached is
        // already its shortest distance. The distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances.get(cell_coord).cloned().unwrap_or(0);
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coordinate in grid.links(*cell_coord).iter() {
                    if !distances.contains_key(link_coordinate) {
                        let _ = distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// How many cells the flood fill reached, the start included.
    #[inline]
    pub fn reached_count(&self) -> CellsCount {
        CellsCount(self.distances.len())
    }
}

/// The ways a grid can fail to be a perfect maze.
#[derive(Eq, PartialEq, Clone, Debug)]
pub enum MazeDefect {
    /// A perfect maze of `n` cells has exactly `n - 1` passages.
    WrongPassageCount {
        expected: PassagesCount,
        actual: PassagesCount,
    },
    /// This passage joins two cells that were already connected another way.
    Cycle(Cartesian2DCoordinate, Cartesian2DCoordinate),
    /// Some cells cannot be reached from the first cell.
    Unreachable {
        reached: CellsCount,
        cells: CellsCount,
        first_unreached: Option<Cartesian2DCoordinate>,
    },
    /// A wall on the outer boundary reads as open.
    OpenBoundary(Cartesian2DCoordinate, CompassPrimary),
}

impl fmt::Display for MazeDefect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MazeDefect::WrongPassageCount { expected, actual } => {
                write!(f, "expected {} passages, found {}", expected.0, actual.0)
            }
            MazeDefect::Cycle(a, b) => write!(f, "passage {:?} - {:?} closes a cycle", a, b),
            MazeDefect::Unreachable { reached, cells, first_unreached } => {
                write!(f,
                       "only {} of {} cells reachable, first unreached {:?}",
                       reached.0,
                       cells.0,
                       first_unreached)
            }
            MazeDefect::OpenBoundary(coord, dir) => {
                write!(f, "boundary wall {:?} of {:?} is open", dir, coord)
            }
        }
    }
}

/// Verify the spanning tree invariants of a grid.
///
/// The checks are independent of each other: a sweep of the outer boundary, a passage count, a
/// union-find pass over the passages that must never join two cells already in the same set, and
/// a flood fill from the first cell that must reach every cell.
///
/// The union-find pass runs over the finished grid rather than alongside carving. A set of edges
/// contains a cycle whatever order its edges are unioned in, so replaying the passages in row
/// major order finds exactly the cycles an in-order pass during generation would have found.
pub fn check_perfect_maze(grid: &WallGrid) -> Result<(), MazeDefect> {

    let cells_count = grid.size();
    if cells_count == 0 {
        return Ok(());
    }

    if let Some((coord, dir)) = open_boundary_walls(grid).next() {
        return Err(MazeDefect::OpenBoundary(coord, dir));
    }

    let expected = cells_count - 1;
    let actual = grid.passages_count();
    if actual != expected {
        return Err(MazeDefect::WrongPassageCount {
            expected: PassagesCount(expected),
            actual: PassagesCount(actual),
        });
    }

    let mut sets = UnionFind::<usize>::new(cells_count);
    for (a, b) in grid.iter_passages() {
        if let (Some(a_index), Some(b_index)) = (grid.grid_coordinate_to_index(a),
                                                 grid.grid_coordinate_to_index(b)) {
            // union returns false when both were already in the same set
            if !sets.union(a_index, b_index) {
                return Err(MazeDefect::Cycle(a, b));
            }
        }
    }

    let origin = Cartesian2DCoordinate::new(0, 0);
    if let Some(distances) = Distances::new(grid, origin) {
        let CellsCount(reached) = distances.reached_count();
        if reached != cells_count {
            let first_unreached = grid.iter()
                .find(|coord| distances.distance_from_start_to(*coord).is_none());
            return Err(MazeDefect::Unreachable {
                reached: CellsCount(reached),
                cells: CellsCount(cells_count),
                first_unreached,
            });
        }
    }

    Ok(())
}

/// Every wall on the outer boundary, as the cell it encloses and the side it is on.
fn boundary_walls<'a>(grid: &'a WallGrid)
                      -> impl Iterator<Item = (Cartesian2DCoordinate, CompassPrimary)> + 'a {
    let side = |batch: Option<Vec<Cartesian2DCoordinate>>, dir: CompassPrimary| {
        batch.into_iter().flatten().map(move |coord| (coord, dir))
    };
    side(grid.iter_column().last(), CompassPrimary::East)
        .chain(side(grid.iter_row().last(), CompassPrimary::South))
        .chain(side(grid.iter_column().next(), CompassPrimary::West))
        .chain(side(grid.iter_row().next(), CompassPrimary::North))
}

/// Outer walls that read as open. Always empty for grids made by this crate.
fn open_boundary_walls<'a>(grid: &'a WallGrid)
                           -> impl Iterator<Item = (Cartesian2DCoordinate, CompassPrimary)> + 'a {
    boundary_walls(grid).filter(move |&(coord, dir)| !grid.has_wall(coord, dir))
}

/// The passages of a grid as an undirected graph, one node per cell in row major order.
pub fn passage_graph(grid: &WallGrid) -> UnGraph<Cartesian2DCoordinate, ()> {
    let mut graph: UnGraph<Cartesian2DCoordinate, ()> =
        UnGraph::with_capacity(grid.size(), grid.size().saturating_sub(1));
    for coord in grid.iter() {
        let _ = graph.add_node(coord);
    }
    for (a, b) in grid.iter_passages() {
        if let Some((a_index, b_index)) = grid.grid_coordinate_to_index(a)
            .zip(grid.grid_coordinate_to_index(b)) {
            let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
        }
    }
    graph
}
