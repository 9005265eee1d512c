use crate::game::piece::Shape;

/// A settled cell: `EMPTY` or a 1-based palette index.
pub type Cell = u8;

pub const EMPTY: Cell = 0;

/// Grid of settled cells. Row 0 is the top row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    grid: Vec<Vec<Cell>>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            grid: vec![vec![EMPTY; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.grid[y][x]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.grid.iter().map(Vec::as_slice)
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        &self.grid[y]
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        self.grid[row].iter().all(|&cell| cell != EMPTY)
    }

    /// Indices of all full rows, top to bottom.
    pub fn find_full_rows(&self) -> Vec<usize> {
        (0..self.height).filter(|&row| self.is_row_full(row)).collect()
    }

    /// Drops every full row and shifts the rows above down to close the gaps.
    ///
    /// Kept rows stay in their original top-to-bottom order, and the top of the
    /// board is refilled with empty rows. Returns how many rows were removed.
    pub fn remove_full_rows(&mut self) -> usize {
        let mut removed = 0;
        let mut write_row = self.height;

        // Start from bottom and work up, copying non-full rows down
        for read_row in (0..self.height).rev() {
            if self.is_row_full(read_row) {
                removed += 1;
                continue;
            }
            write_row -= 1;
            if read_row != write_row {
                self.grid.swap(write_row, read_row);
            }
        }

        // Whatever is left above the write cursor was either full or already moved
        for row in &mut self.grid[..write_row] {
            row.fill(EMPTY);
        }

        removed
    }

    /// Checks the part of `shape` from local row `start_y` downwards.
    ///
    /// Each checked cell must land inside the board on an empty cell. Cells
    /// above `start_y` are ignored entirely, which lets a piece that sticks out
    /// above the top edge be tested for the part that is visible.
    pub fn can_put_part(&self, shape: &Shape, x: i32, y: i32, start_y: i32) -> bool {
        shape
            .cells()
            .iter()
            .filter(|cell| cell.y >= start_y)
            .all(|cell| self.is_free(x + cell.x, y + cell.y))
    }

    pub fn can_put(&self, shape: &Shape, x: i32, y: i32) -> bool {
        self.can_put_part(shape, x, y, 0)
    }

    /// Stamps `shape` at `(x, y)` with `color`.
    ///
    /// The caller must have checked the placement with [`Board::can_put`];
    /// a cell outside the board is a bug and panics.
    pub fn add_shape(&mut self, shape: &Shape, x: i32, y: i32, color: Cell) {
        for (bx, by) in shape.blocks_at(x, y) {
            assert!(
                self.in_bounds(bx, by),
                "shape cell ({bx}, {by}) outside {}x{} board",
                self.width,
                self.height
            );
            self.grid[by as usize][bx as usize] = color;
        }
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn is_free(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.grid[y as usize][x as usize] == EMPTY
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::constants::BOARD_WIDTH, crate::constants::BOARD_HEIGHT)
    }
}
