use crate::cells::Cartesian2DCoordinate;
use crate::units::{ColumnIndex, RowIndex};

/// Row major iteration over every cell coordinate of a square grid.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    dimension_size: usize,
    cells_count: usize,
}

impl CellIter {
    pub(crate) fn new(dimension_size: usize) -> CellIter {
        CellIter {
            current_cell_number: 0,
            dimension_size,
            cells_count: dimension_size * dimension_size,
        }
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                    self.dimension_size);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

#[derive(Debug, Copy, Clone)]
pub(crate) enum BatchIterType {
    Row,
    Column,
}

/// Iteration over whole rows (or whole columns) of cell coordinates at a time.
#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    iter_type: BatchIterType,
    current_index: usize,
    dimension_size: usize,
}

impl BatchIter {
    pub(crate) fn new(iter_type: BatchIterType, dimension_size: usize) -> BatchIter {
        BatchIter {
            iter_type,
            current_index: 0,
            dimension_size,
        }
    }
}

impl ExactSizeIterator for BatchIter {} // default impl using size_hint()
impl Iterator for BatchIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index < self.dimension_size {
            let coords = (0..self.dimension_size)
                .map(|i| {
                    if let BatchIterType::Row = self.iter_type {
                        Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(i),
                                                                       RowIndex(self.current_index))
                    } else {
                        Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(self.current_index),
                                                                       RowIndex(i))
                    }
                })
                .collect();
            self.current_index += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.dimension_size - self.current_index;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
