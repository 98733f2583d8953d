//! Runtime integration.
//!
//! Bridges synchronous callers with the async game loop by owning a tokio
//! runtime next to the loop task.

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::config::LoopConfig;
use crate::core::EngineSnapshot;
use crate::game_loop::{spawn_game, GameHandle, LoopSummary};

/// Running game loop with its own runtime
pub struct GameRuntime {
    rt: Runtime,
    handle: GameHandle,
    task: JoinHandle<LoopSummary>,
}

impl GameRuntime {
    /// Create a runtime and start a loop on it
    pub fn start(config: LoopConfig) -> Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let (handle, task) = {
            let _guard = rt.enter();
            spawn_game(config)
        };
        Ok(Self { rt, handle, task })
    }

    /// Handle for commands; its blocking methods work from any other thread
    pub fn handle(&self) -> &GameHandle {
        &self.handle
    }

    /// Block until a snapshot satisfies `f`, calling `on_change` for each
    /// snapshot seen on the way. Returns the matching snapshot.
    pub fn watch_until(
        &self,
        mut on_change: impl FnMut(&EngineSnapshot),
        f: impl Fn(&EngineSnapshot) -> bool,
    ) -> Result<EngineSnapshot> {
        let mut rx = self.handle.subscribe();
        self.rt.block_on(async move {
            loop {
                let snapshot = rx.borrow_and_update().clone();
                on_change(&snapshot);
                if f(&snapshot) {
                    return Ok(snapshot);
                }
                rx.changed().await.context("game loop stopped")?;
            }
        })
    }

    /// Stop the loop and wait for it to finish
    pub fn shutdown(self) -> Result<LoopSummary> {
        let Self { rt, handle, task } = self;
        rt.block_on(async move {
            if !handle.is_closed() {
                handle.shutdown().await?;
            }
            task.await.context("game loop task failed")
        })
    }
}
