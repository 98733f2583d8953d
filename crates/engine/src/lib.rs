//! Game loop module - drives an [`Engine`](crate::core::Engine) in real time
//!
//! The core crate is a synchronous state machine with no notion of time.
//! This crate adds the scheduler around it:
//!
//! - [`game_loop`]: a tokio task that owns the engine, ticks it at the
//!   score-dependent interval, serves commands and publishes snapshots
//! - [`runtime`]: a runtime-owning wrapper for synchronous callers
//! - [`config`]: environment-driven configuration
//! - [`event_log`]: JSON-lines log of game events
//!
//! # Example
//!
//! ```no_run
//! use block_drop_engine::{spawn_game, LoopConfig};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let (game, task) = spawn_game(LoopConfig::default());
//!
//! game.request_move_left().await?;
//! game.request_rotate().await?;
//! println!("{}", game.snapshot());
//!
//! game.shutdown().await?;
//! let summary = task.await?;
//! println!("played {} game(s)", summary.games);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod event_log;
pub mod game_loop;
pub mod runtime;

pub use block_drop_core as core;
pub use block_drop_types as types;

pub use config::LoopConfig;
pub use event_log::{EventLog, EventRecord, GameEvent};
pub use game_loop::{spawn_game, GameHandle, LoopSummary};
pub use runtime::GameRuntime;
