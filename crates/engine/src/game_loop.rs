//! Timed game loop
//!
//! A single tokio task owns the [`Engine`]. Nothing else can touch it:
//! commands arrive over a bounded `mpsc` queue and are answered through
//! `oneshot` replies, and every change is published as an immutable
//! [`EngineSnapshot`] on a `watch` channel, so readers never see a
//! half-applied lock.
//!
//! The task sleeps until the next tick deadline. Commands do not move the
//! deadline; after each tick it is recomputed from the score-dependent
//! interval. While the game is over no ticks are scheduled, but the task keeps
//! serving requests so a new game can be started. It exits on
//! [`GameHandle::shutdown`] or when every handle has been dropped.

use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::config::LoopConfig;
use crate::core::{Engine, EngineSnapshot, TickOutcome};
use crate::event_log::{EventLog, GameEvent};
use crate::types::Command;

/// Request delivered to the loop task
#[derive(Debug)]
enum Request {
    Command {
        command: Command,
        reply: oneshot::Sender<bool>,
    },
    NewGame {
        reply: oneshot::Sender<()>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// What the loop did over its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopSummary {
    pub games: u32,
    pub ticks: u64,
    pub commands: u64,
    pub last_score: u32,
}

/// Cloneable handle to a running loop
#[derive(Debug, Clone)]
pub struct GameHandle {
    tx: mpsc::Sender<Request>,
    snapshot_rx: watch::Receiver<EngineSnapshot>,
}

/// Start a loop on the current tokio runtime
pub fn spawn_game(config: LoopConfig) -> (GameHandle, JoinHandle<LoopSummary>) {
    let engine = Engine::new(config.resolve_seed());
    let (tx, rx) = mpsc::channel(config.command_capacity.max(1));
    let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());
    let log = match config.event_log_path.clone() {
        Some(path) => EventLog::open(path),
        None => EventLog::disabled(),
    };

    let task = tokio::spawn(run_loop(engine, config.autostart, rx, snapshot_tx, log));

    (GameHandle { tx, snapshot_rx }, task)
}

struct LoopState {
    engine: Engine,
    snapshot_tx: watch::Sender<EngineSnapshot>,
    log: EventLog,
    summary: LoopSummary,
    next_tick: Instant,
}

impl LoopState {
    fn interval(&self) -> Duration {
        Duration::from_millis(self.engine.tick_interval_ms() as u64)
    }

    fn ticking(&self) -> bool {
        self.engine.started() && !self.engine.is_game_over()
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.engine.snapshot());
    }

    fn new_game(&mut self) {
        self.engine.start_new_game();
        self.summary.games += 1;
        let game_id = self.engine.game_id();
        println!("[Loop] Game {} started", game_id);
        self.log.emit(GameEvent::NewGame {
            game_id,
            seed: self.engine.seed(),
        });
        self.check_game_over();
        self.next_tick = Instant::now() + self.interval();
        self.publish();
    }

    fn tick(&mut self) {
        self.summary.ticks += 1;
        let outcome = self.engine.tick();
        if let TickOutcome::Locked(report) = outcome {
            let game_id = self.engine.game_id();
            self.log.emit(GameEvent::piece_locked(game_id, &report));
            if report.cleared_rows > 0 {
                self.log.emit(GameEvent::LinesCleared {
                    game_id,
                    rows: report.cleared_rows,
                    points: report.points,
                    score: report.score,
                    tick_interval_ms: self.engine.tick_interval_ms(),
                });
            }
            self.check_game_over();
        }
        self.next_tick = Instant::now() + self.interval();
        if outcome != TickOutcome::Idle {
            self.publish();
        }
    }

    fn check_game_over(&mut self) {
        let Some(reason) = self.engine.game_over_reason() else {
            return;
        };
        let score = self.engine.current_score();
        self.summary.last_score = score;
        println!(
            "[Loop] Game {} over ({}), score {}",
            self.engine.game_id(),
            reason.as_str(),
            score
        );
        self.log.emit(GameEvent::game_over(
            self.engine.game_id(),
            reason,
            score,
            self.engine.lines_cleared(),
            self.engine.pieces_locked(),
        ));
    }

    fn command(&mut self, command: Command) -> bool {
        self.summary.commands += 1;
        let applied = self.engine.apply(command);
        if applied {
            self.publish();
        }
        applied
    }
}

async fn run_loop(
    engine: Engine,
    autostart: bool,
    mut rx: mpsc::Receiver<Request>,
    snapshot_tx: watch::Sender<EngineSnapshot>,
    log: EventLog,
) -> LoopSummary {
    let mut state = LoopState {
        engine,
        snapshot_tx,
        log,
        summary: LoopSummary::default(),
        next_tick: Instant::now(),
    };
    if autostart {
        state.new_game();
    }

    let mut shutdown_reply = None;

    loop {
        let ticking = state.ticking();
        tokio::select! {
            _ = sleep_until(state.next_tick), if ticking => {
                state.tick();
            }
            request = rx.recv() => match request {
                Some(Request::Command { command, reply }) => {
                    let _ = reply.send(state.command(command));
                }
                Some(Request::NewGame { reply }) => {
                    state.new_game();
                    let _ = reply.send(());
                }
                Some(Request::Shutdown { reply }) => {
                    shutdown_reply = Some(reply);
                    break;
                }
                None => break,
            },
        }
    }

    if !state.engine.is_game_over() {
        state.summary.last_score = state.engine.current_score();
    }
    println!("[Loop] Shutting down after {} game(s)", state.summary.games);
    state.log.emit(GameEvent::Shutdown {
        games: state.summary.games,
    });
    state.log.close().await;

    if let Some(reply) = shutdown_reply {
        let _ = reply.send(());
    }
    state.summary
}

impl GameHandle {
    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Request) -> Result<T> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| anyhow!("game loop has stopped"))?;
        Ok(rx.await?)
    }

    fn request_blocking<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Request) -> Result<T> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .blocking_send(make(reply))
            .map_err(|_| anyhow!("game loop has stopped"))?;
        Ok(rx.blocking_recv()?)
    }

    /// Apply a command; `Ok(false)` means it was rejected
    pub async fn apply(&self, command: Command) -> Result<bool> {
        self.request(|reply| Request::Command { command, reply })
            .await
    }

    pub async fn request_move_left(&self) -> Result<bool> {
        self.apply(Command::MoveLeft).await
    }

    pub async fn request_move_right(&self) -> Result<bool> {
        self.apply(Command::MoveRight).await
    }

    pub async fn request_rotate(&self) -> Result<bool> {
        self.apply(Command::Rotate).await
    }

    pub async fn request_soft_drop(&self) -> Result<bool> {
        self.apply(Command::SoftDrop).await
    }

    /// Reset everything, spawn two pieces and restart the tick clock
    pub async fn start_new_game(&self) -> Result<()> {
        self.request(|reply| Request::NewGame { reply }).await
    }

    /// Stop the loop; returns once the event log is flushed
    pub async fn shutdown(&self) -> Result<()> {
        self.request(|reply| Request::Shutdown { reply }).await
    }

    /// Blocking [`GameHandle::apply`] for threads outside the runtime
    ///
    /// Panics if called from within an async context.
    pub fn apply_blocking(&self, command: Command) -> Result<bool> {
        self.request_blocking(|reply| Request::Command { command, reply })
    }

    /// Blocking [`GameHandle::start_new_game`]
    pub fn start_new_game_blocking(&self) -> Result<()> {
        self.request_blocking(|reply| Request::NewGame { reply })
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> EngineSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver that wakes on every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<EngineSnapshot> {
        self.snapshot_rx.clone()
    }

    pub fn current_score(&self) -> u32 {
        self.snapshot_rx.borrow().score
    }

    pub fn is_game_over(&self) -> bool {
        self.snapshot_rx.borrow().is_game_over()
    }

    /// Whether the loop task has exited
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
