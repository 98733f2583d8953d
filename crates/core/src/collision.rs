//! Collision resolver - pure checks of a piece against a grid

use crate::grid::Grid;
use crate::piece::Piece;

/// Whether a single absolute cell is blocked
///
/// Walls and the floor always block. Rows above the grid (`y < 0`) are open
/// as long as `x` is in range.
pub fn cell_blocked(grid: &Grid, x: i8, y: i8) -> bool {
    x < 0 || x >= grid.width() as i8 || y >= grid.height() as i8 || (y >= 0 && grid.is_occupied(x, y))
}

/// Whether any cell of `piece` is blocked on `grid`
pub fn collides(piece: &Piece, grid: &Grid) -> bool {
    piece
        .occupied_cells()
        .iter()
        .any(|c| cell_blocked(grid, c.x, c.y))
}

/// Whether the piece could move one row down
pub fn is_grounded(piece: &Piece, grid: &Grid) -> bool {
    collides(&piece.moved(0, 1), grid)
}

/// Row the piece would land on if dropped straight down (its `y` there)
pub fn landing_y(piece: &Piece, grid: &Grid) -> i8 {
    let mut probe = *piece;
    while !is_grounded(&probe, grid) {
        probe.move_by(0, 1);
    }
    probe.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKind};

    #[test]
    fn test_walls_and_floor() {
        let grid = Grid::canonical();
        assert!(!collides(&Piece::new(PieceKind::O, 0, 0), &grid));
        assert!(collides(&Piece::new(PieceKind::O, -1, 0), &grid));
        assert!(collides(&Piece::new(PieceKind::O, 9, 0), &grid));
        assert!(!collides(&Piece::new(PieceKind::O, 8, 18), &grid));
        assert!(collides(&Piece::new(PieceKind::O, 8, 19), &grid));
    }

    #[test]
    fn test_above_grid_is_open_but_walled() {
        let mut grid = Grid::canonical();
        grid.fill_rows_except(0..1, &[], Color::Red);
        // fully above the grid: occupancy is not checked
        assert!(!collides(&Piece::new(PieceKind::O, 4, -2), &grid));
        // still walled horizontally
        assert!(collides(&Piece::new(PieceKind::O, -1, -2), &grid));
        // reaching row 0 hits the filled row
        assert!(collides(&Piece::new(PieceKind::O, 4, -1), &grid));
    }

    #[test]
    fn test_landing_y() {
        let mut grid = Grid::canonical();
        assert_eq!(landing_y(&Piece::new(PieceKind::I, 3, 0), &grid), 19);
        grid.set(4, 15, Some(Color::Blue));
        assert_eq!(landing_y(&Piece::new(PieceKind::I, 3, 0), &grid), 14);
    }
}
