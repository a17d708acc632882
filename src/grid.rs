/// Widest row the game lays out before wrapping.
pub const MAX_ROW_WIDTH: usize = 7;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridCoord {
    pub row: usize,
    pub column: usize,
}

impl GridCoord {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Maps linear tube indices to rows of at most `row_width` tubes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridLayout {
    tube_count: usize,
    row_width: usize,
}

impl GridLayout {
    pub fn new(tube_count: usize, max_row_width: usize) -> Self {
        Self {
            tube_count,
            row_width: tube_count.min(max_row_width).max(1),
        }
    }

    pub fn for_tubes(tube_count: usize) -> Self {
        Self::new(tube_count, MAX_ROW_WIDTH)
    }

    pub fn row_width(&self) -> usize {
        self.row_width
    }

    pub fn row_count(&self) -> usize {
        self.tube_count.div_ceil(self.row_width)
    }

    pub fn index_to_grid(&self, index: usize) -> GridCoord {
        GridCoord {
            row: index / self.row_width,
            column: index % self.row_width,
        }
    }

    pub fn grid_to_index(&self, coord: GridCoord) -> usize {
        coord.row * self.row_width + coord.column
    }

    /// Like [`grid_to_index`](Self::grid_to_index) but `None` for cells with no tube,
    /// such as the unused tail of the last row.
    pub fn tube_at(&self, coord: GridCoord) -> Option<usize> {
        if coord.column >= self.row_width {
            return None;
        }
        let index = self.grid_to_index(coord);
        (index < self.tube_count).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_puzzles_use_one_row() {
        let grid = GridLayout::for_tubes(5);
        assert_eq!(grid.row_width(), 5);
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.index_to_grid(4), GridCoord::new(0, 4));
    }

    #[test]
    fn wide_puzzles_wrap_at_seven() {
        let grid = GridLayout::for_tubes(16);
        assert_eq!(grid.row_width(), 7);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.index_to_grid(7), GridCoord::new(1, 0));
        assert_eq!(grid.index_to_grid(15), GridCoord::new(2, 1));
        assert_eq!(grid.grid_to_index(GridCoord::new(2, 1)), 15);
    }

    #[test]
    fn mapping_round_trips_for_every_tube() {
        for tube_count in 2..=21 {
            let grid = GridLayout::for_tubes(tube_count);
            for k in 0..tube_count {
                assert_eq!(grid.grid_to_index(grid.index_to_grid(k)), k);
            }
        }
    }

    #[test]
    fn tube_at_rejects_empty_cells() {
        let grid = GridLayout::for_tubes(9);
        assert_eq!(grid.tube_at(GridCoord::new(1, 1)), Some(8));
        assert_eq!(grid.tube_at(GridCoord::new(1, 2)), None);
        assert_eq!(grid.tube_at(GridCoord::new(0, 7)), None);
        assert_eq!(grid.tube_at(GridCoord::new(3, 0)), None);
    }
}
