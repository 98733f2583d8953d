//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data with no external dependencies, so they can be used
//! by the simulation core, the game loop and any renderer alike.
//!
//! # Grid Dimensions
//!
//! Canonical playfield:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, `y` grows downward)
//! - **Spawn origin**: `(W/2 - 2, 0)`, i.e. `(3, 0)` on the canonical grid
//!
//! # Speed Curve
//!
//! The automatic descent interval depends only on the score:
//!
//! | Score | Interval |
//! |-------|----------|
//! | 0-4 | 1000ms |
//! | 100 | 500ms |
//! | 140+ | 300ms (floor) |
//!
//! computed as `max(300, 1000 - (score / 5) * 25)`.
//!
//! # Examples
//!
//! ```
//! use block_drop_types::{Command, PieceKind, Color, GRID_WIDTH, GRID_HEIGHT};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.color(), Color::Magenta);
//!
//! let cmd = Command::from_str("moveLeft").unwrap();
//! assert_eq!(cmd, Command::MoveLeft);
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Largest width or height accepted when building a grid
pub const MAX_GRID_DIM: u8 = 64;

/// Narrowest grid accepted: the spawn origin `W/2 - 2` must stay on the grid
/// and the 4-wide I piece must fit.
pub const MIN_GRID_WIDTH: u8 = 4;

/// Largest shape matrix dimension (rows or cols)
pub const MAX_SHAPE_DIM: usize = 4;

/// Upper bound on filled cells in a single shape
pub const MAX_SHAPE_CELLS: usize = MAX_SHAPE_DIM * MAX_SHAPE_DIM;

/// Descent interval with zero score (1000ms = 1 second per row)
pub const BASE_TICK_MS: u32 = 1000;

/// Fastest descent interval the speed curve reaches
pub const MIN_TICK_MS: u32 = 300;

/// Interval reduction per speed step
pub const SPEED_STEP_MS: u32 = 25;

/// Score points per speed step
pub const SCORE_PER_SPEED_STEP: u32 = 5;

/// Points awarded per cleared row
pub const POINTS_PER_ROW: u32 = 100;

/// Palette colours used by the seven canonical pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Yellow,
    Magenta,
    Orange,
    Blue,
    Green,
    Red,
}

impl Color {
    /// Lowercase colour name
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Cyan => "cyan",
            Color::Yellow => "yellow",
            Color::Magenta => "magenta",
            Color::Orange => "orange",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Red => "red",
        }
    }

    /// sRGB triple for renderers
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Cyan => (0, 255, 255),
            Color::Yellow => (255, 255, 0),
            Color::Magenta => (255, 0, 255),
            Color::Orange => (255, 200, 0),
            Color::Blue => (0, 0, 255),
            Color::Green => (0, 255, 0),
            Color::Red => (255, 0, 0),
        }
    }
}

/// The seven canonical piece kinds
///
/// Each kind has a fixed shape matrix and colour (see `block_drop_core::shape`):
/// - **I**: Cyan, 1x4 bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T pointing down
/// - **L**: Orange, bar with the foot on the left
/// - **J**: Blue, bar with the foot on the right
/// - **Z**: Green
/// - **S**: Red (mirror of Z)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    J,
    Z,
    S,
}

impl PieceKind {
    /// All kinds in canonical table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_drop_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::Z => "z",
            PieceKind::S => "s",
        }
    }

    /// Colour paired with this kind in the canonical table
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Magenta,
            PieceKind::L => Color::Orange,
            PieceKind::J => Color::Blue,
            PieceKind::Z => Color::Green,
            PieceKind::S => Color::Red,
        }
    }

    /// Position in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::Z => 5,
            PieceKind::S => 6,
        }
    }
}

/// Discrete player commands
///
/// The caller captures raw input and turns it into these; the engine applies
/// each one immediately, independent of the tick clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate 90° clockwise, then re-center horizontally
    Rotate,
    /// Move piece one cell down (never locks; locking happens on tick)
    SoftDrop,
}

impl Command {
    /// Parse command from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" | "left" => Some(Command::MoveLeft),
            "moveright" | "right" => Some(Command::MoveRight),
            "rotate" | "rotatecw" => Some(Command::Rotate),
            "softdrop" | "down" => Some(Command::SoftDrop),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::Rotate => "rotate",
            Command::SoftDrop => "softDrop",
        }
    }
}

/// Lifecycle status of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Running,
    /// Terminal: only a new game leaves this state
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Running => "running",
            GameStatus::GameOver => "gameOver",
        }
    }
}
