//! Shape module - rectangular boolean matrices and the canonical piece table
//!
//! A shape is stored inline as a 4x4 bit matrix plus its logical `rows x cols`
//! size, so shapes are `Copy` and rotating never allocates. Cells outside the
//! logical size are always `false`, which keeps derived equality meaningful.
//!
//! Rotation works on the matrix's own index space (transpose, then reverse
//! each row). There is no fixed pivot cell and no wall-kick table; the piece
//! re-centers itself horizontally afterwards (see [`crate::piece`]).

use std::fmt;

use crate::error::ShapeError;
use crate::types::{PieceKind, MAX_SHAPE_DIM};

type Bits = [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];

/// Rectangular boolean matrix with at least one filled cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: Bits,
}

impl Shape {
    /// Build a shape from rows of `0`/non-zero values
    ///
    /// Fails when the matrix is empty, ragged, larger than 4x4, or has no
    /// filled cell.
    ///
    /// ```
    /// use block_drop_core::Shape;
    ///
    /// let t = Shape::from_rows(&[[1, 1, 1], [0, 1, 0]]).unwrap();
    /// assert_eq!((t.rows(), t.cols()), (2, 3));
    /// assert!(Shape::from_rows(&[[0, 0]]).is_err());
    /// ```
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let Some(first) = rows.first() else {
            return Err(ShapeError::Empty);
        };
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(ShapeError::Empty);
        }
        if rows.len() > MAX_SHAPE_DIM || cols > MAX_SHAPE_DIM {
            return Err(ShapeError::TooLarge {
                rows: rows.len(),
                cols,
                max: MAX_SHAPE_DIM,
            });
        }

        let mut bits: Bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(ShapeError::Ragged {
                    row: r,
                    len: row.len(),
                    expected: cols,
                });
            }
            for (c, &v) in row.iter().enumerate() {
                bits[r][c] = v != 0;
            }
        }

        if !bits.iter().flatten().any(|&b| b) {
            return Err(ShapeError::NoFilledCell);
        }

        Ok(Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            bits,
        })
    }

    /// Table constructor; only used for the canonical shapes below.
    const fn from_pattern(rows: u8, cols: u8, pattern: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM]) -> Self {
        let mut bits: Bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut r = 0;
        while r < MAX_SHAPE_DIM {
            let mut c = 0;
            while c < MAX_SHAPE_DIM {
                bits[r][c] = pattern[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self { rows, cols, bits }
    }

    /// Number of matrix rows
    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    /// Number of matrix columns
    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Matrix entry, `false` outside the logical size
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.bits[row][col]
    }

    /// Rotate 90° clockwise: `R[j][rows - 1 - i] = S[i][j]`
    ///
    /// The result is `cols x rows`.
    pub fn rotated_cw(&self) -> Self {
        let rows = self.rows();
        let mut bits: Bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for i in 0..rows {
            for j in 0..self.cols() {
                bits[j][rows - 1 - i] = self.bits[i][j];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }

    /// Offsets `(dx, dy)` of every filled cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows()).flat_map(move |r| {
            (0..self.cols())
                .filter(move |&c| self.bits[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Number of filled cells
    pub fn cell_count(&self) -> usize {
        self.bits.iter().flatten().filter(|&&b| b).count()
    }

    /// Copy out as a `rows x cols` matrix
    pub fn to_matrix(&self) -> Vec<Vec<bool>> {
        (0..self.rows())
            .map(|r| self.bits[r][..self.cols()].to_vec())
            .collect()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                f.write_str(if self.bits[r][c] { "#" } else { "." })?;
            }
            if r + 1 < self.rows() {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

const EMPTY_ROW: [u8; MAX_SHAPE_DIM] = [0; MAX_SHAPE_DIM];

/// Canonical shapes, indexed like [`PieceKind::ALL`]
const SHAPE_TABLE: [Shape; 7] = [
    // I
    Shape::from_pattern(1, 4, [[1, 1, 1, 1], EMPTY_ROW, EMPTY_ROW, EMPTY_ROW]),
    // O
    Shape::from_pattern(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], EMPTY_ROW, EMPTY_ROW]),
    // T
    Shape::from_pattern(2, 3, [[1, 1, 1, 0], [0, 1, 0, 0], EMPTY_ROW, EMPTY_ROW]),
    // L
    Shape::from_pattern(2, 3, [[1, 1, 1, 0], [1, 0, 0, 0], EMPTY_ROW, EMPTY_ROW]),
    // J
    Shape::from_pattern(2, 3, [[1, 1, 1, 0], [0, 0, 1, 0], EMPTY_ROW, EMPTY_ROW]),
    // Z
    Shape::from_pattern(2, 3, [[1, 1, 0, 0], [0, 1, 1, 0], EMPTY_ROW, EMPTY_ROW]),
    // S
    Shape::from_pattern(2, 3, [[0, 1, 1, 0], [1, 1, 0, 0], EMPTY_ROW, EMPTY_ROW]),
];

/// Spawn shape for a piece kind
pub fn canonical_shape(kind: PieceKind) -> Shape {
    SHAPE_TABLE[kind.index()]
}
