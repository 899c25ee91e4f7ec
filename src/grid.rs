use std::fmt;
use std::mem;

use smallvec::SmallVec;

use crate::cells::{self, Cartesian2DCoordinate, CompassPrimary, CoordinateOptionSmallVec,
                   CoordinateSmallVec, OwnedWall};
use crate::grid_iterators::{BatchIter, BatchIterType, CellIter};

/// The two walls a cell stores itself.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
struct CellWalls {
    right: bool,
    bottom: bool,
}

impl CellWalls {
    const WALLED: CellWalls = CellWalls {
        right: true,
        bottom: true,
    };
}

/// Whether the walls of `cells_count` cells fit in a single allocation.
pub(crate) fn is_addressable_cells_count(cells_count: usize) -> bool {
    cells_count.checked_mul(mem::size_of::<CellWalls>())
        .map_or(false, |bytes| bytes <= isize::max_value() as usize)
}

/// A square grid of cells where each cell stores only its right and bottom walls.
///
/// The left wall of `(x, y)` is the right wall of `(x - 1, y)` and the top wall is the bottom wall
/// of `(x, y - 1)`, so every internal wall has exactly one flag and two adjacent cells can never
/// disagree about the wall between them. Walls on the outer boundary are always present.
///
/// A `WallGrid` handed out by the generators is finished: there is no public way to change it.
#[derive(Eq, PartialEq, Clone, Hash)]
pub struct WallGrid {
    dimension_size: usize,
    walls: Vec<CellWalls>,
}

impl fmt::Debug for WallGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "WallGrid :: dimension: {:?}, passages: {:?}",
               self.dimension_size,
               self.passages_count())
    }
}

impl WallGrid {
    /// A fully walled grid of `dimension_size * dimension_size` cells.
    /// Callers are expected to have validated the size.
    pub(crate) fn new(dimension_size: usize) -> WallGrid {
        WallGrid {
            dimension_size,
            walls: vec![CellWalls::WALLED; dimension_size * dimension_size],
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension_size
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.walls.len()
    }

    pub fn has_wall_right(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell_walls(coord).map_or(true, |walls| walls.right)
    }

    pub fn has_wall_bottom(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell_walls(coord).map_or(true, |walls| walls.bottom)
    }

    pub fn has_wall_left(&self, coord: Cartesian2DCoordinate) -> bool {
        self.has_wall(coord, CompassPrimary::West)
    }

    pub fn has_wall_top(&self, coord: Cartesian2DCoordinate) -> bool {
        self.has_wall(coord, CompassPrimary::North)
    }

    /// Is there a wall on the `direction` side of the cell?
    /// Outer boundary walls and invalid coordinates always report a wall.
    pub fn has_wall(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        if !self.is_valid_coordinate(coord) {
            return true;
        }

        match cells::owning_wall(coord, direction) {
            Some((owner, OwnedWall::Right)) => self.has_wall_right(owner),
            Some((owner, OwnedWall::Bottom)) => self.has_wall_bottom(owner),
            None => true,
        }
    }

    /// Is there a passage from the cell to its neighbour in the given direction?
    pub fn is_neighbour_linked(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction).is_some() && !self.has_wall(coord, direction)
    }

    /// Are two cells in the grid linked by a passage?
    /// Only adjacent cells can be linked.
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        CompassPrimary::CARVING_ORDER
            .iter()
            .any(|dir| {
                self.neighbour_at_direction(a, *dir) == Some(b) && !self.has_wall(a, *dir)
            })
    }

    /// Cells that are linked to a particular cell by a passage.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::CARVING_ORDER
            .iter()
            .filter(|dir| self.is_neighbour_linked(coord, **dir))
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// Cells that are to the North, South, East or West of a particular cell, but not
    /// necessarily linked by a passage.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        if !self.is_valid_coordinate(coord) {
            return CoordinateSmallVec::new();
        }

        [CompassPrimary::North, CompassPrimary::South, CompassPrimary::East, CompassPrimary::West]
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    pub fn neighbours_at_directions(&self,
                                    coord: Cartesian2DCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }

        cells::offset_coordinate(coord, direction)
            .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// Number of walls that have been cleared.
    pub fn passages_count(&self) -> usize {
        self.walls
            .iter()
            .map(|walls| (!walls.right) as usize + (!walls.bottom) as usize)
            .sum()
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0..grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.dimension_size + coord.x as usize)
        } else {
            None
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.dimension_size && (coord.y as usize) < self.dimension_size
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.dimension_size)
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::new(BatchIterType::Row, self.dimension_size)
    }

    #[inline]
    pub fn iter_column(&self) -> BatchIter {
        BatchIter::new(BatchIterType::Column, self.dimension_size)
    }

    /// Every cleared wall once, as the (owning cell, neighbour) pair it connects.
    pub fn iter_passages<'a>(&'a self)
                             -> impl Iterator<Item = (Cartesian2DCoordinate, Cartesian2DCoordinate)> + 'a {
        self.iter().flat_map(move |coord| {
            [CompassPrimary::East, CompassPrimary::South]
                .iter()
                .filter(move |dir| !self.has_wall(coord, **dir))
                .filter_map(move |dir| self.neighbour_at_direction(coord, *dir))
                .map(move |neighbour| (coord, neighbour))
                .collect::<SmallVec<[(Cartesian2DCoordinate, Cartesian2DCoordinate); 2]>>()
        })
    }

    /// Remove the wall between `coord` and its neighbour in `direction`, writing to whichever
    /// cell owns the wall. Returns false, changing nothing, if there is no neighbour in that
    /// direction: boundary walls are never cleared.
    pub(crate) fn clear_wall(&mut self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        if self.neighbour_at_direction(coord, direction).is_none() {
            return false;
        }

        match cells::owning_wall(coord, direction) {
            Some((owner, wall)) => {
                match self.grid_coordinate_to_index(owner) {
                    Some(index) => {
                        let walls = &mut self.walls[index];
                        match wall {
                            OwnedWall::Right => walls.right = false,
                            OwnedWall::Bottom => walls.bottom = false,
                        }
                        true
                    }
                    None => false,
                }
            }
            None => false,
        }
    }

    #[inline]
    fn cell_walls(&self, coord: Cartesian2DCoordinate) -> Option<&CellWalls> {
        self.grid_coordinate_to_index(coord).map(|index| &self.walls[index])
    }
}

impl fmt::Display for WallGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        const WALL_LR_3: &str = "───";
        const BODY: &str = "   "; // 3 spaces

        let columns_count = self.dimension_size;
        let rows_count = columns_count;
        if columns_count == 0 {
            return Ok(());
        }

        let gc = |x: usize, y: usize| Cartesian2DCoordinate::new(x as u32, y as u32);

        // Start by special case rendering the text for the north most boundary
        let mut output = String::from(wall_glyph(false, true, false, true));
        for x in 0..columns_count {
            output.push_str(WALL_LR_3);
            let is_last_column = x == columns_count - 1;
            output.push_str(wall_glyph(true,
                                       !is_last_column,
                                       false,
                                       self.has_wall_right(gc(x, 0))));
        }
        output.push('\n');

        for (y, row) in self.iter_row().enumerate() {

            let is_last_row = y == rows_count - 1;

            // Each cell uses the bottom wall of the cell above it as its own top wall, so we
            // only need to render the body, the right wall and the bottom wall plus the corner
            // south east of the cell.
            let mut row_middle_section_render = String::from("│");
            let mut row_bottom_section_render =
                String::from(wall_glyph(false, self.has_wall_bottom(gc(0, y)), true, !is_last_row));

            for cell_coord in row {
                let x = cell_coord.x as usize;
                let is_last_column = x == columns_count - 1;

                row_middle_section_render.push_str(BODY);
                row_middle_section_render.push_str(if self.has_wall_right(cell_coord) {
                    "│"
                } else {
                    " "
                });

                row_bottom_section_render.push_str(if self.has_wall_bottom(cell_coord) {
                    WALL_LR_3
                } else {
                    BODY
                });

                let show_left_section = self.has_wall_bottom(cell_coord);
                let show_up_section = self.has_wall_right(cell_coord);
                let show_right_section = !is_last_column && self.has_wall_bottom(gc(x + 1, y));
                let show_down_section = !is_last_row && self.has_wall_right(gc(x, y + 1));
                row_bottom_section_render.push_str(wall_glyph(show_left_section,
                                                              show_right_section,
                                                              show_up_section,
                                                              show_down_section));
            }

            output.push_str(row_middle_section_render.as_ref());
            output.push('\n');
            output.push_str(row_bottom_section_render.as_ref());
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

/// The box drawing glyph for a wall junction given which of its four arms are present.
fn wall_glyph(left: bool, right: bool, up: bool, down: bool) -> &'static str {
    match (left, right, up, down) {
        (true, true, true, true) => "┼",
        (true, true, true, false) => "┴",
        (true, true, false, true) => "┬",
        (true, false, true, true) => "┤",
        (false, true, true, true) => "├",
        (true, true, false, false) => "─",
        (false, false, true, true) => "│",
        (false, true, true, false) => "└",
        (true, false, false, true) => "┐",
        (true, false, true, false) => "┘",
        (false, true, false, true) => "┌",
        (true, false, false, false) => "╴",
        (false, true, false, false) => "╶",
        (false, false, true, false) => "╵",
        (false, false, false, true) => "╷",
        (false, false, false, false) => " ",
    }
}
