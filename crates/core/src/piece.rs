//! Piece module - a shape with a colour and a grid position
//!
//! Movement here is unconditional. Collision arbitration belongs to the
//! caller: build a candidate with [`Piece::moved`] / [`Piece::rotated`],
//! test it with [`crate::collision::collides`], and keep the old value on
//! failure. `Piece` is `Copy`, so reverting is just not assigning.

use arrayvec::ArrayVec;

use crate::shape::{canonical_shape, Shape};
use crate::types::{Color, PieceKind, MAX_SHAPE_CELLS};

/// Absolute grid cell covered by a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub x: i8,
    pub y: i8,
    pub color: Color,
}

/// Cells of one piece; never allocates
pub type PieceCells = ArrayVec<CellPos, MAX_SHAPE_CELLS>;

/// Spawn origin for a grid of the given width: `(W/2 - 2, 0)`
pub fn spawn_origin(grid_width: u8) -> (i8, i8) {
    ((grid_width / 2) as i8 - 2, 0)
}

/// A falling piece
///
/// `(x, y)` is the grid offset of the shape matrix's top-left corner; `y` may
/// be negative while the piece is partly above the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub x: i8,
    pub y: i8,
    shape: Shape,
}

impl Piece {
    /// Canonical piece of `kind` at `(x, y)`
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            color: kind.color(),
            x,
            y,
            shape: canonical_shape(kind),
        }
    }

    /// Canonical piece at the spawn origin of a grid of `grid_width`
    pub fn spawn(kind: PieceKind, grid_width: u8) -> Self {
        let (x, y) = spawn_origin(grid_width);
        Self::new(kind, x, y)
    }

    /// Piece with an arbitrary (already validated) shape
    pub fn with_shape(kind: PieceKind, shape: Shape, color: Color, x: i8, y: i8) -> Self {
        Self {
            kind,
            color,
            x,
            y,
            shape,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Translate the origin by `(dx, dy)`, saturating at the `i8` range
    pub fn move_by(&mut self, dx: i8, dy: i8) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    /// Copy translated by `(dx, dy)`
    pub fn moved(&self, dx: i8, dy: i8) -> Self {
        let mut p = *self;
        p.move_by(dx, dy);
        p
    }

    /// Replace the shape with its clockwise rotation (no re-centering)
    pub fn rotate_cw(&mut self) {
        self.shape = self.shape.rotated_cw();
    }

    /// Shift `x` by `(previous.cols - current.cols) / 2` so the piece stays
    /// roughly centered across a rotation.
    ///
    /// The division truncates toward zero, so a 4-wide bar rotating back and
    /// forth returns to its starting column instead of drifting left.
    pub fn center_after_rotation(&mut self, previous: &Shape) {
        let diff = previous.cols() as i8 - self.shape.cols() as i8;
        self.x = self.x.saturating_add(diff / 2);
    }

    /// Clockwise rotation followed by re-centering
    pub fn rotate_cw_centered(&mut self) {
        let previous = self.shape;
        self.rotate_cw();
        self.center_after_rotation(&previous);
    }

    /// Copy rotated clockwise and re-centered
    pub fn rotated(&self) -> Self {
        let mut p = *self;
        p.rotate_cw_centered();
        p
    }

    /// Absolute cells covered by the piece, recomputed on every call
    ///
    /// Offsets saturate at `i8::MAX`, which lies past the widest grid, so a
    /// piece pushed off the representable range reads as out of bounds.
    pub fn occupied_cells(&self) -> PieceCells {
        self.shape
            .cells()
            .map(|(dx, dy)| CellPos {
                x: self.x.saturating_add(dx),
                y: self.y.saturating_add(dy),
                color: self.color,
            })
            .collect()
    }

    /// Top-most row covered (can be negative)
    pub fn top(&self) -> i8 {
        self.occupied_cells()
            .iter()
            .map(|c| c.y)
            .min()
            .unwrap_or(self.y)
    }

    /// Whether any covered cell lies above row 0
    pub fn is_above_grid(&self) -> bool {
        self.occupied_cells().iter().any(|c| c.y < 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_origin() {
        assert_eq!(spawn_origin(10), (3, 0));
        assert_eq!(spawn_origin(4), (0, 0));
        let p = Piece::spawn(PieceKind::O, 10);
        assert_eq!((p.x, p.y), (3, 0));
        assert_eq!(p.color, Color::Yellow);
    }

    #[test]
    fn test_move_is_unconditional() {
        let mut p = Piece::new(PieceKind::I, 0, 0);
        p.move_by(-5, -3);
        assert_eq!((p.x, p.y), (-5, -3));
    }

    #[test]
    fn test_occupied_cells_follow_origin() {
        let p = Piece::new(PieceKind::T, 2, 5);
        let cells: Vec<(i8, i8)> = p.occupied_cells().iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(cells, vec![(2, 5), (3, 5), (4, 5), (3, 6)]);
        assert!(p.occupied_cells().iter().all(|c| c.color == Color::Magenta));
    }

    #[test]
    fn test_i_rotation_centering() {
        let mut p = Piece::new(PieceKind::I, 3, 0);
        p.rotate_cw_centered();
        assert_eq!((p.shape().rows(), p.shape().cols()), (4, 1));
        assert_eq!(p.x, 4);

        p.rotate_cw_centered();
        assert_eq!((p.shape().rows(), p.shape().cols()), (1, 4));
        assert_eq!(p.x, 3);
    }

    #[test]
    fn test_three_wide_rotation_centering() {
        let mut p = Piece::new(PieceKind::T, 3, 0);
        p.rotate_cw_centered();
        // 3 -> 2 columns: (3 - 2) / 2 == 0
        assert_eq!(p.x, 3);
        p.rotate_cw_centered();
        // 2 -> 3 columns: (2 - 3) / 2 == 0
        assert_eq!(p.x, 3);
    }

    #[test]
    fn test_cells_saturate_at_i8_edge() {
        let p = Piece::new(PieceKind::I, i8::MAX - 1, i8::MAX);
        let xs: Vec<i8> = p.occupied_cells().iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![126, 127, 127, 127]);
        assert!(p.occupied_cells().iter().all(|c| c.y == i8::MAX));

        let mut q = Piece::new(PieceKind::O, i8::MIN, 0);
        q.move_by(-1, 0);
        assert_eq!(q.x, i8::MIN);
    }

    #[test]
    fn test_custom_shape_piece() {
        let shape = Shape::from_rows(&[[1, 0], [1, 1], [0, 1]]).unwrap();
        let p = Piece::with_shape(PieceKind::S, shape, Color::Green, 4, 2);
        let cells: Vec<(i8, i8)> = p.occupied_cells().iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(cells, vec![(4, 2), (4, 3), (5, 3), (5, 4)]);
        assert!(p.occupied_cells().iter().all(|c| c.color == Color::Green));
        assert_eq!(p.rotated().shape(), &shape.rotated_cw());
    }

    #[test]
    fn test_above_grid() {
        let p = Piece::new(PieceKind::O, 3, -1);
        assert!(p.is_above_grid());
        assert_eq!(p.top(), -1);
        assert!(!p.moved(0, 1).is_above_grid());
    }
}
