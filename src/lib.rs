//! Block Drop (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof:
//! `block_drop::{types, core, engine}`.

pub use block_drop_core as core;
pub use block_drop_engine as engine;
pub use block_drop_types as types;
