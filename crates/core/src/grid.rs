//! Grid module - committed cells of the playfield
//!
//! The grid is `W x H` (10x20 canonical) with flat row-major storage. Each
//! cell is `Option<Color>`: occupied iff it carries a colour, so the two can
//! never disagree.
//! Coordinates: (x, y) where x ranges 0..W (left to right), y ranges 0..H
//! (top to bottom).

use crate::error::GridError;
use crate::piece::Piece;
use crate::types::{Color, GRID_HEIGHT, GRID_WIDTH, MAX_GRID_DIM, MIN_GRID_WIDTH};

/// A single grid cell (None = empty)
pub type Cell = Option<Color>;

/// Bit `y` set iff row `y` is full. Heights are capped at 64 rows.
pub type RowMask = u64;

/// The playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid, validating the dimensions
    pub fn new(width: u8, height: u8) -> Result<Self, GridError> {
        if !(MIN_GRID_WIDTH..=MAX_GRID_DIM).contains(&width) {
            return Err(GridError::Width {
                width,
                min: MIN_GRID_WIDTH,
                max: MAX_GRID_DIM,
            });
        }
        if !(1..=MAX_GRID_DIM).contains(&height) {
            return Err(GridError::Height {
                height,
                max: MAX_GRID_DIM,
            });
        }
        Ok(Self::empty(width, height))
    }

    /// Canonical 10x20 grid
    pub fn canonical() -> Self {
        Self::empty(GRID_WIDTH, GRID_HEIGHT)
    }

    fn empty(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) is in bounds and filled
    ///
    /// Out-of-bounds positions read as empty; bounds arbitration belongs to
    /// the collision resolver.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Colour at (x, y), if filled
    pub fn color(&self, x: i8, y: i8) -> Option<Color> {
        self.get(x, y).flatten()
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        self.index(x, y).is_none()
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height as usize && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Check if a row is completely empty
    pub fn is_row_empty(&self, y: usize) -> bool {
        y < self.height as usize && self.row(y).iter().all(|cell| cell.is_none())
    }

    /// Bit mask of full rows
    pub fn full_row_mask(&self) -> RowMask {
        (0..self.height as usize)
            .filter(|&y| self.is_row_full(y))
            .fold(0, |mask, y| mask | (1 << y))
    }

    /// Indices of full rows, top to bottom
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Write every on-grid cell of `piece` with the piece's colour
    ///
    /// Cells above the grid (`y < 0`) or otherwise out of bounds are dropped.
    /// Returns the number of cells written.
    pub fn commit(&mut self, piece: &Piece) -> usize {
        piece
            .occupied_cells()
            .iter()
            .filter(|c| c.y >= 0)
            .filter(|c| self.set(c.x, c.y, Some(c.color)))
            .count()
    }

    /// Remove all full rows and compact the rest downward
    ///
    /// Full rows are found once, before anything moves. Every column is then
    /// compacted against that same set with a two-pointer pass (bottom to top),
    /// keeping the relative order of surviving cells and blanking the vacated
    /// rows at the top. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let mask = self.full_row_mask();
        if mask == 0 {
            return 0;
        }

        let width = self.width as usize;
        let height = self.height as usize;

        for x in 0..width {
            let mut write_y = height;
            for read_y in (0..height).rev() {
                if mask & (1 << read_y) != 0 {
                    continue;
                }
                write_y -= 1;
                if write_y != read_y {
                    self.cells[write_y * width + x] = self.cells[read_y * width + x];
                }
            }
            for y in 0..write_y {
                self.cells[y * width + x] = None;
            }
        }

        mask.count_ones() as usize
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill the given rows completely, except for the listed columns
    pub fn fill_rows_except(&mut self, rows: std::ops::Range<i8>, holes: &[i8], color: Color) {
        for y in rows {
            for x in 0..self.width as i8 {
                if !holes.contains(&x) {
                    self.set(x, y, Some(color));
                }
            }
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::canonical()
    }
}
