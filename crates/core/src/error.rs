//! Construction errors
//!
//! Only building a shape or a grid can fail. Rejected moves, rotations and
//! descents are plain `bool` results, and game over is a state, not an error.

use thiserror::Error;

/// Invalid shape matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape matrix has no rows")]
    Empty,
    #[error("shape row {row} has {len} columns, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("shape matrix is {rows}x{cols}, larger than {max}x{max}")]
    TooLarge { rows: usize, cols: usize, max: usize },
    #[error("shape matrix has no filled cell")]
    NoFilledCell,
}

/// Invalid grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid width {width} is outside {min}..={max}")]
    Width { width: u8, min: u8, max: u8 },
    #[error("grid height {height} is outside 1..={max}")]
    Height { height: u8, max: u8 },
}

