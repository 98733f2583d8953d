//! Engine module - owns the complete game state
//!
//! Ties together the grid, the active and next pieces, the bag and the score.
//! The engine is a plain synchronous state machine: something else (see the
//! `block-drop-engine` crate) decides when to call [`Engine::tick`].
//!
//! Per tick the active piece tries to fall one row. When it cannot, the lock
//! step runs as one atomic transition:
//!
//! 1. commit the piece into the grid
//! 2. clear full rows and compact
//! 3. add `rows * 100` to the score
//! 4. game over if the locked piece stuck out above row 0 (lock out)
//! 5. otherwise promote the next piece and draw a new next piece
//! 6. game over if the promoted piece collides where it spawned (block out)
//!
//! Player commands bypass the clock. Each is tested against the grid and
//! either applied or rejected with `false`; a rejected command changes
//! nothing. After game over every command and tick is a no-op.

use crate::collision::{collides, landing_y};
use crate::error::GridError;
use crate::grid::Grid;
use crate::piece::{Piece, PieceCells};
use crate::rng::Bag;
use crate::scoring::ScoreTracker;
use crate::snapshot::{ActiveSnapshot, EngineSnapshot, GridSnapshot, PiecePreview};
use crate::types::{Command, GameStatus, PieceKind};

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOverReason {
    /// The locked piece had cells above the grid
    LockOut,
    /// The newly spawned piece overlaps committed cells
    BlockOut,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::LockOut => "lockOut",
            GameOverReason::BlockOut => "blockOut",
        }
    }
}

/// Result of locking a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockReport {
    pub kind: PieceKind,
    pub cleared_rows: usize,
    pub points: u32,
    pub score: u32,
    pub game_over: Option<GameOverReason>,
}

/// Result of one scheduler tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to do: not started or already over
    Idle,
    /// The active piece moved down one row
    Fell,
    /// The active piece locked
    Locked(LockReport),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Engine {
    grid: Grid,
    active: Option<Piece>,
    next: Option<Piece>,
    bag: Bag,
    score: ScoreTracker,
    status: GameStatus,
    game_over_reason: Option<GameOverReason>,
    /// Incremented by every `start_new_game`
    game_id: u32,
    pieces_locked: u32,
}

impl Engine {
    /// Engine on the canonical 10x20 grid; call [`Engine::start_new_game`]
    /// to spawn the first pieces.
    pub fn new(seed: u32) -> Self {
        Self::with_grid(Grid::canonical(), seed)
    }

    /// Engine on an empty grid of custom size
    pub fn with_size(width: u8, height: u8, seed: u32) -> Result<Self, GridError> {
        Ok(Self::with_grid(Grid::new(width, height)?, seed))
    }

    /// Engine on a prepared grid
    ///
    /// The grid is kept as-is by the first [`Engine::start_new_game`] so that
    /// scripted setups survive; later new games start empty.
    pub fn with_grid(grid: Grid, seed: u32) -> Self {
        Self {
            grid,
            active: None,
            next: None,
            bag: Bag::new(seed),
            score: ScoreTracker::new(),
            status: GameStatus::Running,
            game_over_reason: None,
            game_id: 0,
            pieces_locked: 0,
        }
    }

    /// Reset score and bag, spawn the active and next pieces
    ///
    /// Clears the grid unless this is the first game on a prepared grid.
    pub fn start_new_game(&mut self) {
        if self.game_id > 0 {
            self.grid.clear();
        }
        self.game_id = self.game_id.wrapping_add(1);
        self.score.reset();
        self.bag.empty();
        self.pieces_locked = 0;
        self.status = GameStatus::Running;
        self.game_over_reason = None;

        let width = self.grid.width();
        self.next = Some(self.bag.draw(width));
        self.promote_next();
    }

    pub fn started(&self) -> bool {
        self.game_id > 0
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    fn is_running(&self) -> bool {
        self.started() && self.status == GameStatus::Running
    }

    pub fn current_score(&self) -> u32 {
        self.score.score()
    }

    pub fn lines_cleared(&self) -> u32 {
        self.score.rows()
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    /// RNG state of the bag
    pub fn seed(&self) -> u32 {
        self.bag.seed()
    }

    /// Milliseconds until the next automatic descent at the current score
    pub fn tick_interval_ms(&self) -> u32 {
        self.score.tick_interval_ms()
    }

    /// Row the active piece would land on, for ghost rendering
    pub fn ghost_y(&self) -> Option<i8> {
        self.active.as_ref().map(|p| landing_y(p, &self.grid))
    }

    /// One automatic descent step
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }
        if self.try_shift(0, 1) {
            return TickOutcome::Fell;
        }
        match self.lock_active() {
            Some(report) => TickOutcome::Locked(report),
            None => TickOutcome::Idle,
        }
    }

    /// Commit, clear, score, then promote or end the game
    fn lock_active(&mut self) -> Option<LockReport> {
        let piece = self.active.take()?;

        self.grid.commit(&piece);
        let cleared_rows = self.grid.clear_full_rows();
        let points = self.score.add_cleared_rows(cleared_rows);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let game_over = if piece.is_above_grid() {
            // the piece now lives in the grid; nothing is left in play
            self.end_game(GameOverReason::LockOut);
            Some(GameOverReason::LockOut)
        } else if self.promote_next() {
            None
        } else {
            Some(GameOverReason::BlockOut)
        };

        Some(LockReport {
            kind: piece.kind,
            cleared_rows,
            points,
            score: self.score.score(),
            game_over,
        })
    }

    /// Next becomes active, a new next is drawn.
    /// Returns false (and ends the game) if the new active piece is blocked.
    fn promote_next(&mut self) -> bool {
        let width = self.grid.width();
        let piece = match self.next.take() {
            Some(p) => p,
            None => self.bag.draw(width),
        };
        self.active = Some(piece);
        self.next = Some(self.bag.draw(width));

        if collides(&piece, &self.grid) {
            self.end_game(GameOverReason::BlockOut);
            return false;
        }
        true
    }

    fn end_game(&mut self, reason: GameOverReason) {
        self.status = GameStatus::GameOver;
        self.game_over_reason = Some(reason);
    }

    /// Try to move the active piece
    pub(crate) fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        self.try_replace(|p| p.moved(dx, dy))
    }

    /// Apply `f` to the active piece and keep the result only if it fits
    fn try_replace(&mut self, f: impl FnOnce(&Piece) -> Piece) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active.as_ref() else {
            return false;
        };
        let candidate = f(active);
        if collides(&candidate, &self.grid) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    pub fn request_move_left(&mut self) -> bool {
        self.try_shift(-1, 0)
    }

    pub fn request_move_right(&mut self) -> bool {
        self.try_shift(1, 0)
    }

    /// Clockwise rotation with re-centering
    pub fn request_rotate(&mut self) -> bool {
        self.try_replace(Piece::rotated)
    }

    /// Move down one row; never locks
    pub fn request_soft_drop(&mut self) -> bool {
        self.try_shift(0, 1)
    }

    /// Apply a command; returns whether it changed the active piece
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.request_move_left(),
            Command::MoveRight => self.request_move_right(),
            Command::Rotate => self.request_rotate(),
            Command::SoftDrop => self.request_soft_drop(),
        }
    }

    /// Put a specific piece in play, e.g. for scripted setups
    ///
    /// Rejected (returns false) when the game is not running or the piece
    /// does not fit.
    pub fn replace_active(&mut self, piece: Piece) -> bool {
        self.try_replace(|_| piece)
    }

    pub fn snapshot_grid(&self) -> GridSnapshot {
        GridSnapshot::from(&self.grid)
    }

    /// Cells of the active piece (empty before the first game)
    pub fn active_piece_cells(&self) -> PieceCells {
        self.active
            .as_ref()
            .map(Piece::occupied_cells)
            .unwrap_or_default()
    }

    pub fn next_piece_preview(&self) -> Option<PiecePreview> {
        self.next.as_ref().map(PiecePreview::from)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            grid: self.snapshot_grid(),
            active: self.active.as_ref().map(ActiveSnapshot::from),
            next: self.next_piece_preview(),
            score: self.current_score(),
            lines_cleared: self.lines_cleared(),
            pieces_locked: self.pieces_locked,
            game_id: self.game_id,
            status: self.status,
            tick_interval_ms: self.tick_interval_ms(),
        }
    }
}
