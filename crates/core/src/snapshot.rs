//! Read-only copies of engine state for renderers
//!
//! Snapshots own their data; holding one never blocks the engine and can
//! never observe a half-applied lock.

use std::fmt;

use crate::grid::{Cell, Grid};
use crate::piece::{Piece, PieceCells};
use crate::shape::Shape;
use crate::types::{Color, GameStatus, PieceKind};

/// Copy of the committed grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major cells (y * width + x)
    pub cells: Vec<Cell>,
}

impl GridSnapshot {
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        self.color(x, y).is_some()
    }

    pub fn color(&self, x: i8, y: i8) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width as i8 || y >= self.height as i8 {
            return None;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Occupancy matrix indexed `[x][y]`
    pub fn occupancy(&self) -> Vec<Vec<bool>> {
        self.columns(|c| c.is_some())
    }

    /// Colour matrix indexed `[x][y]`
    pub fn colors(&self) -> Vec<Vec<Option<Color>>> {
        self.columns(|c| c)
    }

    fn columns<T>(&self, f: impl Fn(Cell) -> T) -> Vec<Vec<T>> {
        let w = self.width as usize;
        (0..w)
            .map(|x| {
                (0..self.height as usize)
                    .map(|y| f(self.cells[y * w + x]))
                    .collect()
            })
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl From<&Grid> for GridSnapshot {
    fn from(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            cells: grid.cells().to_vec(),
        }
    }
}

/// Active piece as seen by a renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub cells: PieceCells,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind,
            x: piece.x,
            y: piece.y,
            cells: piece.occupied_cells(),
        }
    }
}

/// Next piece, for the preview box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiecePreview {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
}

impl From<&Piece> for PiecePreview {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind,
            shape: *piece.shape(),
            color: piece.color,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub grid: GridSnapshot,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<PiecePreview>,
    pub score: u32,
    pub lines_cleared: u32,
    pub pieces_locked: u32,
    pub game_id: u32,
    pub status: GameStatus,
    pub tick_interval_ms: u32,
}

impl EngineSnapshot {
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        Self {
            grid: GridSnapshot::from(&Grid::canonical()),
            active: None,
            next: None,
            score: 0,
            lines_cleared: 0,
            pieces_locked: 0,
            game_id: 0,
            status: GameStatus::Running,
            tick_interval_ms: crate::scoring::tick_interval_ms(0),
        }
    }
}

fn glyph(color: Color) -> char {
    match color {
        Color::Cyan => 'C',
        Color::Yellow => 'Y',
        Color::Magenta => 'M',
        Color::Orange => 'O',
        Color::Blue => 'B',
        Color::Green => 'G',
        Color::Red => 'R',
    }
}

/// ASCII frame: committed cells as colour letters, the active piece as `@`
impl fmt::Display for EngineSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = |x: i8, y: i8| {
            self.active
                .as_ref()
                .is_some_and(|a| a.cells.iter().any(|c| c.x == x && c.y == y))
        };
        for y in 0..self.grid.height as i8 {
            f.write_str("|")?;
            for x in 0..self.grid.width as i8 {
                let ch = if active(x, y) {
                    '@'
                } else {
                    self.grid.color(x, y).map(glyph).unwrap_or('.')
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f, "|")?;
        }
        write!(
            f,
            "score {} lines {} next {}",
            self.score,
            self.lines_cleared,
            self.next.map(|n| n.kind.as_str()).unwrap_or("-")
        )?;
        if self.is_game_over() {
            f.write_str(" GAME OVER")?;
        }
        Ok(())
    }
}
