//! Headless demo runner (default binary).
//!
//! Starts a game loop from environment configuration and lets a seeded
//! random player send commands from a separate thread until the game is
//! over. The board is printed as ASCII whenever the score changes.

use std::thread;
use std::time::Duration;

use anyhow::Result;

use block_drop::core::SimpleRng;
use block_drop::engine::{GameHandle, GameRuntime, LoopConfig};
use block_drop::types::Command;

/// Pause between two player commands
const COMMAND_INTERVAL: Duration = Duration::from_millis(60);

fn main() -> Result<()> {
    let config = LoopConfig::from_env();
    let player_seed = config.resolve_seed();
    let autostart = config.autostart;
    let runtime = GameRuntime::start(config)?;
    if !autostart {
        runtime.handle().start_new_game_blocking()?;
    }

    let player = {
        let handle = runtime.handle().clone();
        thread::spawn(move || play(handle, player_seed))
    };

    let mut last_score = None;
    let last = runtime.watch_until(
        |snapshot| {
            if last_score != Some(snapshot.score) {
                last_score = Some(snapshot.score);
                println!("{}\n", snapshot);
            }
        },
        |snapshot| snapshot.is_game_over(),
    )?;
    println!("{}\n", last);

    let summary = runtime.shutdown()?;
    if player.join().is_err() {
        eprintln!("[Demo] player thread panicked");
    }
    println!(
        "[Demo] final score {} after {} ticks and {} commands",
        summary.last_score, summary.ticks, summary.commands
    );
    Ok(())
}

/// Random player: mostly soft drops, with some sliding and rotating.
fn play(handle: GameHandle, seed: u32) {
    let mut rng = SimpleRng::new(seed ^ 0x9e37_79b9);
    while !handle.is_game_over() {
        let command = match rng.next_range(8) {
            0 | 1 => Command::MoveLeft,
            2 | 3 => Command::MoveRight,
            4 => Command::Rotate,
            _ => Command::SoftDrop,
        };
        if handle.apply_blocking(command).is_err() {
            break;
        }
        thread::sleep(COMMAND_INTERVAL);
    }
}
