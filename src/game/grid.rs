use super::direction::Direction;

/// A cell on the playing field, in world units
///
/// Coordinates are multiples of the segment size once they have been wrapped
/// onto a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// Move cell one segment in a direction, without wrapping
    pub fn stepped(&self, direction: Direction, segment_size: i32) -> Self {
        let (dx, dz) = direction.delta();
        self.moved_by(dx * segment_size, dz * segment_size)
    }
}

/// Map a coordinate back into `[0, extent)`.
///
/// In-range values are returned as is. A single step past the far edge lands
/// on `0`, a single step before the near edge lands on `extent - segment_size`;
/// larger overshoots take the cell-aligned euclidean remainder.
pub fn wrap(coordinate: i32, extent: i32, segment_size: i32) -> i32 {
    if (0..extent).contains(&coordinate) {
        return coordinate;
    }

    let cells = extent / segment_size;
    coordinate.div_euclid(segment_size).rem_euclid(cells) * segment_size
}

/// Dimensions of the playing field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    /// Width of the field in world units
    pub width: i32,
    /// Height (depth) of the field in world units
    pub height: i32,
    /// Side of one cell in world units
    pub segment_size: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32, segment_size: i32) -> Self {
        Self {
            width,
            height,
            segment_size,
        }
    }

    pub fn columns(&self) -> i32 {
        self.width / self.segment_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.segment_size
    }

    pub fn cell_count(&self) -> usize {
        self.columns().max(0) as usize * self.rows().max(0) as usize
    }

    /// Cell at a column/row index
    pub fn cell_at(&self, column: i32, row: i32) -> Cell {
        Cell::new(column * self.segment_size, row * self.segment_size)
    }

    /// Column/row index of a cell
    pub fn index_of(&self, cell: Cell) -> (i32, i32) {
        (cell.x / self.segment_size, cell.z / self.segment_size)
    }

    /// Wrap both axes independently
    pub fn wrap_cell(&self, cell: Cell) -> Cell {
        Cell::new(
            wrap(cell.x, self.width, self.segment_size),
            wrap(cell.z, self.height, self.segment_size),
        )
    }

    /// Check if a cell lies on the field and is aligned to the segment size
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x)
            && (0..self.height).contains(&cell.z)
            && cell.x % self.segment_size == 0
            && cell.z % self.segment_size == 0
    }

    /// Iterate every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows())
            .flat_map(move |row| (0..self.columns()).map(move |column| self.cell_at(column, row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_single_step() {
        assert_eq!(wrap(400, 400, 10), 0);
        assert_eq!(wrap(-10, 400, 10), 390);
        assert_eq!(wrap(200, 400, 10), 200);
        assert_eq!(wrap(0, 400, 10), 0);
        assert_eq!(wrap(390, 400, 10), 390);
    }

    #[test]
    fn test_wrap_stays_in_range() {
        for k in -2000..2000 {
            let wrapped = wrap(k * 10, 400, 10);
            assert!((0..400).contains(&wrapped), "wrap({}) = {}", k * 10, wrapped);
            assert_eq!((wrapped / 10 - k).rem_euclid(40), 0);
        }
    }

    #[test]
    fn test_wrap_unaligned_overshoot() {
        assert_eq!(wrap(-3, 400, 10), 390);
        assert_eq!(wrap(405, 400, 10), 0);
        assert_eq!(wrap(1234, 400, 10), 30);
    }

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(50, 50);
        assert_eq!(cell.stepped(Direction::Right, 10), Cell::new(60, 50));
        assert_eq!(cell.stepped(Direction::Left, 10), Cell::new(40, 50));
        assert_eq!(cell.stepped(Direction::Forward, 10), Cell::new(50, 40));
        assert_eq!(cell.stepped(Direction::Backward, 10), Cell::new(50, 60));
    }

    #[test]
    fn test_wrap_cell_axes_independent() {
        let grid = Grid::new(400, 300, 10);
        assert_eq!(grid.wrap_cell(Cell::new(400, 100)), Cell::new(0, 100));
        assert_eq!(grid.wrap_cell(Cell::new(100, -10)), Cell::new(100, 290));
        assert_eq!(grid.wrap_cell(Cell::new(-10, 300)), Cell::new(390, 0));
    }

    #[test]
    fn test_grid_dimensions() {
        let grid = Grid::new(400, 400, 10);
        assert_eq!(grid.columns(), 40);
        assert_eq!(grid.rows(), 40);
        assert_eq!(grid.cell_count(), 1600);
        assert_eq!(grid.cells().count(), 1600);
        assert_eq!(grid.cell_at(3, 7), Cell::new(30, 70));
        assert_eq!(grid.index_of(Cell::new(30, 70)), (3, 7));
    }

    #[test]
    fn test_cell_count_of_huge_grid() {
        let grid = Grid::new(100_000, 100_000, 1);
        assert_eq!(grid.cell_count(), 10_000_000_000);
    }

    #[test]
    fn test_contains() {
        let grid = Grid::new(400, 400, 10);
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(390, 390)));
        assert!(!grid.contains(Cell::new(400, 0)));
        assert!(!grid.contains(Cell::new(0, -10)));
        assert!(!grid.contains(Cell::new(15, 0)));
    }
}
