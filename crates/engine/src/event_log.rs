//! JSON-lines event log
//!
//! Game events are stamped with a sequence number and a wall-clock timestamp
//! and handed to a background task that appends one JSON object per line to
//! the configured file. Logging never blocks the game loop; if the file
//! cannot be opened the records are dropped.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::{GameOverReason, LockReport};

/// Something worth recording
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    NewGame {
        game_id: u32,
        seed: u32,
    },
    PieceLocked {
        game_id: u32,
        piece: &'static str,
        cleared_rows: usize,
        score: u32,
    },
    LinesCleared {
        game_id: u32,
        rows: usize,
        points: u32,
        score: u32,
        tick_interval_ms: u32,
    },
    GameOver {
        game_id: u32,
        reason: &'static str,
        score: u32,
        lines: u32,
        pieces: u32,
    },
    Shutdown {
        games: u32,
    },
}

impl GameEvent {
    pub fn piece_locked(game_id: u32, report: &LockReport) -> Self {
        GameEvent::PieceLocked {
            game_id,
            piece: report.kind.as_str(),
            cleared_rows: report.cleared_rows,
            score: report.score,
        }
    }

    pub fn game_over(game_id: u32, reason: GameOverReason, score: u32, lines: u32, pieces: u32) -> Self {
        GameEvent::GameOver {
            game_id,
            reason: reason.as_str(),
            score,
            lines,
            pieces,
        }
    }
}

/// One line of the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub seq: u64,
    /// Milliseconds since the Unix epoch
    pub ts: u64,
    #[serde(flatten)]
    pub event: GameEvent,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Sender side of the event log
#[derive(Debug)]
pub struct EventLog {
    tx: Option<mpsc::UnboundedSender<EventRecord>>,
    writer: Option<JoinHandle<()>>,
    seq: u64,
}

impl EventLog {
    /// Log that drops everything
    pub fn disabled() -> Self {
        Self {
            tx: None,
            writer: None,
            seq: 0,
        }
    }

    /// Start appending to `path`; must be called inside a tokio runtime
    pub fn open(path: String) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<EventRecord>();
        let writer = tokio::spawn(write_records(path, rx));
        Self {
            tx: Some(tx),
            writer: Some(writer),
            seq: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    /// Stamp and queue an event
    pub fn emit(&mut self, event: GameEvent) {
        let Some(tx) = self.tx.as_ref() else {
            return;
        };
        let record = EventRecord {
            seq: self.seq,
            ts: now_ms(),
            event,
        };
        self.seq += 1;
        let _ = tx.send(record);
    }

    /// Stop accepting events and wait until everything queued is on disk
    pub async fn close(&mut self) {
        self.tx = None;
        if let Some(writer) = self.writer.take() {
            let _ = writer.await;
        }
    }
}

async fn write_records(path: String, mut rx: mpsc::UnboundedReceiver<EventRecord>) {
    use tokio::fs::OpenOptions;
    use tokio::io::AsyncWriteExt;

    let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
        Ok(f) => f,
        Err(e) => {
            eprintln!("[EventLog] cannot open {}: {}", path, e);
            return;
        }
    };

    let mut buf: Vec<u8> = Vec::with_capacity(256);

    while let Some(record) = rx.recv().await {
        buf.clear();
        if serde_json::to_writer(&mut buf, &record).is_err() {
            continue;
        }
        buf.push(b'\n');
        if file.write_all(&buf).await.is_err() {
            break;
        }
    }

    let _ = file.flush().await;
}
