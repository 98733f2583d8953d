//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules and state. It has **no**
//! dependency on timers, threads, rendering or I/O:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Testable**: every rule is a plain function or method call
//! - **Allocation-light**: pieces and their cells live on the stack
//!
//! # Module Structure
//!
//! - [`shape`]: boolean shape matrices, clockwise rotation, the canonical table
//! - [`piece`]: a shape with a colour and position; movement and re-centering
//! - [`rng`]: seedable LCG and the 7-bag randomizer
//! - [`grid`]: committed cells, commit, full-row clearing with compaction
//! - [`collision`]: the collision resolver
//! - [`scoring`]: row points and the score-driven speed curve
//! - [`engine`]: the [`Engine`] state machine tying everything together
//! - [`snapshot`]: read-only copies for renderers
//!
//! # Rules
//!
//! - **7-Bag Randomizer**: every run of 7 draws from a fresh bag holds each kind once
//! - **Rotation**: clockwise matrix rotation plus horizontal re-centering, no wall kicks
//! - **Locking**: a piece locks on the first tick it cannot fall
//! - **Scoring**: 100 points per cleared row
//! - **Speed**: `max(300, 1000 - (score / 5) * 25)` ms per row
//!
//! # Example
//!
//! ```
//! use block_drop_core::{Engine, TickOutcome};
//!
//! let mut engine = Engine::new(12345);
//! engine.start_new_game();
//!
//! engine.request_move_left();
//! engine.request_rotate();
//!
//! // drive gravity by hand until the piece locks
//! while !matches!(engine.tick(), TickOutcome::Locked(_)) {}
//!
//! assert_eq!(engine.pieces_locked(), 1);
//! assert!(!engine.is_game_over());
//! ```

pub mod collision;
pub mod engine;
pub mod error;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod snapshot;

pub use block_drop_types as types;

// Re-export commonly used types for convenience
pub use collision::collides;
pub use engine::{Engine, GameOverReason, LockReport, TickOutcome};
pub use error::{GridError, ShapeError};
pub use grid::Grid;
pub use piece::{CellPos, Piece};
pub use rng::{Bag, SimpleRng};
pub use scoring::{tick_interval_ms, ScoreTracker};
pub use shape::{canonical_shape, Shape};
pub use snapshot::{ActiveSnapshot, EngineSnapshot, GridSnapshot, PiecePreview};
