use std::convert::From;

use smallvec::SmallVec;

use crate::units::{ColumnIndex, RowIndex};

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<Cartesian2DCoordinate>; 4]>;

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, dimension_size: usize) -> Cartesian2DCoordinate {
        let x = index % dimension_size;
        let y = index / dimension_size;

        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }
}

/// The four axis aligned directions away from a square cell.
/// `y` grows southwards, `x` grows eastwards.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// All directions in the fixed order the generator enumerates carving candidates.
    /// Draw order depends on this, so changing it changes every seeded maze.
    pub const CARVING_ORDER: [CompassPrimary; 4] = [CompassPrimary::East,
                                                     CompassPrimary::South,
                                                     CompassPrimary::West,
                                                     CompassPrimary::North];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

/// One of the two wall flags a cell stores itself.
/// The west and north walls of a cell are stored by its neighbours.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum OwnedWall {
    Right,
    Bottom,
}

/// Creates a new coordinate offset 1 cell away in the given direction.
/// Returns None if the coordinate is not representable (below zero or past `u32::MAX`).
/// Says nothing about whether the coordinate is inside a particular grid.
pub fn offset_coordinate(coord: Cartesian2DCoordinate,
                         dir: CompassPrimary)
                         -> Option<Cartesian2DCoordinate> {
    let (x, y) = (coord.x, coord.y);
    match dir {
        CompassPrimary::North => y.checked_sub(1).map(|north_y| Cartesian2DCoordinate::new(x, north_y)),
        CompassPrimary::South => y.checked_add(1).map(|south_y| Cartesian2DCoordinate::new(x, south_y)),
        CompassPrimary::East => x.checked_add(1).map(|east_x| Cartesian2DCoordinate::new(east_x, y)),
        CompassPrimary::West => x.checked_sub(1).map(|west_x| Cartesian2DCoordinate::new(west_x, y)),
    }
}

/// Which cell stores the wall on the `dir` side of `coord`, and which of its two flags it is.
///
/// East and South walls belong to `coord` itself. West and North walls belong to the neighbour
/// on that side. Returns None for the west wall of column 0 and the north wall of row 0: those
/// are outer boundary walls with no owning flag.
pub fn owning_wall(coord: Cartesian2DCoordinate,
                   dir: CompassPrimary)
                   -> Option<(Cartesian2DCoordinate, OwnedWall)> {
    match dir {
        CompassPrimary::East => Some((coord, OwnedWall::Right)),
        CompassPrimary::South => Some((coord, OwnedWall::Bottom)),
        CompassPrimary::West => {
            offset_coordinate(coord, CompassPrimary::West).map(|west| (west, OwnedWall::Right))
        }
        CompassPrimary::North => {
            offset_coordinate(coord, CompassPrimary::North).map(|north| (north, OwnedWall::Bottom))
        }
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use std::u32;

    #[test]
    fn row_major_index_conversion() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(Cartesian2DCoordinate::from_row_major_index(0, 3), gc(0, 0));
        assert_eq!(Cartesian2DCoordinate::from_row_major_index(2, 3), gc(2, 0));
        assert_eq!(Cartesian2DCoordinate::from_row_major_index(3, 3), gc(0, 1));
        assert_eq!(Cartesian2DCoordinate::from_row_major_index(8, 3), gc(2, 2));
        assert_eq!(Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(4), RowIndex(1)),
                   gc(4, 1));
    }

    #[test]
    fn offsets_stop_at_representable_range() {
        let origin = Cartesian2DCoordinate::new(0, 0);
        assert_eq!(offset_coordinate(origin, CompassPrimary::North), None);
        assert_eq!(offset_coordinate(origin, CompassPrimary::West), None);
        assert_eq!(offset_coordinate(origin, CompassPrimary::South),
                   Some(Cartesian2DCoordinate::new(0, 1)));
        assert_eq!(offset_coordinate(origin, CompassPrimary::East),
                   Some(Cartesian2DCoordinate::new(1, 0)));

        let far = Cartesian2DCoordinate::new(u32::MAX, u32::MAX);
        assert_eq!(offset_coordinate(far, CompassPrimary::South), None);
        assert_eq!(offset_coordinate(far, CompassPrimary::East), None);
    }

    #[test]
    fn opposite_directions() {
        for dir in CompassPrimary::CARVING_ORDER.iter() {
            assert_ne!(*dir, dir.opposite());
            assert_eq!(*dir, dir.opposite().opposite());
        }
    }

    #[test]
    fn wall_ownership() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let c = gc(2, 3);
        assert_eq!(owning_wall(c, CompassPrimary::East), Some((c, OwnedWall::Right)));
        assert_eq!(owning_wall(c, CompassPrimary::South), Some((c, OwnedWall::Bottom)));
        assert_eq!(owning_wall(c, CompassPrimary::West), Some((gc(1, 3), OwnedWall::Right)));
        assert_eq!(owning_wall(c, CompassPrimary::North), Some((gc(2, 2), OwnedWall::Bottom)));

        // The shared wall resolves to the same flag from either side
        for dir in CompassPrimary::CARVING_ORDER.iter() {
            let neighbour = offset_coordinate(c, *dir).unwrap();
            assert_eq!(owning_wall(c, *dir), owning_wall(neighbour, dir.opposite()));
        }

        assert_eq!(owning_wall(gc(0, 5), CompassPrimary::West), None);
        assert_eq!(owning_wall(gc(5, 0), CompassPrimary::North), None);
    }
}
